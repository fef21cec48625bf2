//! Compiled template arena and per-agent tree execution.
//!
//! # Arena + index
//!
//! Each template is compiled once into a [`CompiledTree`] stored inside the
//! [`TreeEngine`].  An agent never owns a copy of the graph: it owns a
//! [`TreeInstance`], a few words of mutable state (which template, whether
//! it is active, which leaf is mid-`Running` and since when).  Any number of
//! instances can point at the same template without sharing mutable state.
//!
//! # Continuation
//!
//! When a leaf returns `Running` the instance remembers the child index
//! taken at every composite on the way down.  The next evaluation walks
//! straight back to that leaf: siblings before it are not re-run, siblings
//! after it are visited as usual once it settles.  [`TreeInstance::reset`]
//! (used by the scheduler's force calls) drops the path so evaluation starts
//! from the root again.

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use mind_context::{Actuator, DecisionContext, WorldContext};
use mind_core::{AgentId, AgentRng, NodeId, TemplateId, Tick};

use crate::handlers::{HandlerId, LeafContext};
use crate::{HandlerRegistry, NodeDef, Status, TreeError, TreeResult, TreeTemplate};

/// Category used when an agent's life stage has no template of its own.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Adult";

// ── Compiled form ─────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Node {
    Action(HandlerId),
    Condition(HandlerId),
    /// Leaf whose handler name was not registered.  Always fails.
    Unbound(String),
    Selector(Vec<NodeId>),
    Sequence(Vec<NodeId>),
}

/// A template with every handler name resolved.
#[derive(Debug)]
pub struct CompiledTree {
    name:     String,
    category: String,
    nodes:    Vec<Node>,
    root:     NodeId,
}

impl CompiledTree {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// ── TreeInstance ──────────────────────────────────────────────────────────────

/// Per-agent tree state.  Cheap to create, never shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeInstance {
    template:      TemplateId,
    active:        bool,
    running:       Option<NodeId>,
    running_since: Tick,
    /// Child index taken at each composite on the way to `running`.
    resume:        Vec<u32>,
    last_status:   Option<Status>,
    last_action:   Option<NodeId>,
}

impl TreeInstance {
    fn new(template: TemplateId) -> Self {
        Self {
            template,
            active:        true,
            running:       None,
            running_since: Tick::ZERO,
            resume:        Vec::new(),
            last_status:   None,
            last_action:   None,
        }
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Leaf that returned `Running` on the last evaluation, if any.
    pub fn running_leaf(&self) -> Option<NodeId> {
        self.running
    }

    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Drop any in-progress `Running` state; the next evaluation starts
    /// fresh from the root.
    pub fn reset(&mut self) {
        self.running = None;
        self.running_since = Tick::ZERO;
        self.resume.clear();
        self.last_status = None;
        self.last_action = None;
    }
}

// ── TreeEngine ────────────────────────────────────────────────────────────────

/// Shared, read-only store of compiled templates plus the handler registry.
pub struct TreeEngine {
    handlers:    HandlerRegistry,
    trees:       Vec<CompiledTree>,
    by_category: FxHashMap<String, TemplateId>,
    fallback:    String,
}

impl TreeEngine {
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            handlers,
            trees:       Vec::new(),
            by_category: FxHashMap::default(),
            fallback:    DEFAULT_FALLBACK_CATEGORY.to_owned(),
        }
    }

    /// Use `category` instead of "Adult" when a life stage is unknown.
    pub fn with_fallback(mut self, category: impl Into<String>) -> Self {
        self.fallback = category.into();
        self
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback
    }

    /// Validate and compile `template`, registering it for its category.
    ///
    /// Leaf names missing from the registry are compiled into always-failing
    /// leaves and logged; they do not reject the template.
    pub fn add_template(&mut self, template: &TreeTemplate) -> TreeResult<TemplateId> {
        template.validate()?;
        if self.by_category.contains_key(&template.category) {
            return Err(TreeError::DuplicateTemplate(template.category.clone()));
        }
        let id = TemplateId::try_from(self.trees.len())
            .map_err(|_| TreeError::Capacity("tree templates"))?;

        let nodes = template
            .nodes
            .iter()
            .map(|def| self.compile_node(&template.name, def))
            .collect();
        let root = template.root_id().ok_or_else(|| TreeError::EmptyTemplate(template.name.clone()))?;

        self.trees.push(CompiledTree {
            name:     template.name.clone(),
            category: template.category.clone(),
            nodes,
            root,
        });
        self.by_category.insert(template.category.clone(), id);
        debug!(template = %template.name, category = %template.category, "tree template compiled");
        Ok(id)
    }

    fn compile_node(&self, template: &str, def: &NodeDef) -> Node {
        let ids = |c: &[u32]| c.iter().map(|&i| NodeId(i)).collect();
        match def {
            NodeDef::Action { name } => match self.handlers.action_id(name) {
                Some(h) => Node::Action(h),
                None => {
                    warn!(template, action = %name, "unregistered action handler; leaf will always fail");
                    Node::Unbound(name.clone())
                }
            },
            NodeDef::Condition { name } => match self.handlers.condition_id(name) {
                Some(h) => Node::Condition(h),
                None => {
                    warn!(template, condition = %name, "unregistered condition; leaf will always fail");
                    Node::Unbound(name.clone())
                }
            },
            NodeDef::Selector { children } => Node::Selector(ids(children)),
            NodeDef::Sequence { children } => Node::Sequence(ids(children)),
        }
    }

    pub fn template_count(&self) -> usize {
        self.trees.len()
    }

    pub fn tree(&self, id: TemplateId) -> Option<&CompiledTree> {
        self.trees.get(id.index())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.trees.iter().map(|t| t.category.as_str())
    }

    /// Template for `category`, falling back (with a warning) to the
    /// fallback category when unknown.
    pub fn resolve(&self, category: &str) -> TreeResult<TemplateId> {
        if let Some(&id) = self.by_category.get(category) {
            return Ok(id);
        }
        match self.by_category.get(&self.fallback) {
            Some(&id) => {
                warn!(category, fallback = %self.fallback, "unknown life-stage category; using fallback tree");
                Ok(id)
            }
            None => Err(TreeError::MissingFallback {
                category: category.to_owned(),
                fallback: self.fallback.clone(),
            }),
        }
    }

    /// Fresh per-agent instance of the template for `category`.
    pub fn instantiate(&self, category: &str) -> TreeResult<TreeInstance> {
        self.resolve(category).map(TreeInstance::new)
    }

    /// Evaluate `instance` once for `agent`.
    ///
    /// Fails closed: an inactive instance, a dead or invalid agent, or an
    /// instance whose template id is unknown all return `Failure` without
    /// touching any handler.
    pub fn execute(
        &self,
        instance: &mut TreeInstance,
        agent:    AgentId,
        world:    &WorldContext<'_>,
        decision: &DecisionContext,
        actuator: &mut dyn Actuator,
        rng:      &mut AgentRng,
    ) -> Status {
        if !instance.active || !world.is_live(agent) {
            instance.last_status = Some(Status::Failure);
            return Status::Failure;
        }
        let Some(tree) = self.trees.get(instance.template.index()) else {
            warn!(%agent, template = %instance.template, "tree instance points at a missing template");
            instance.last_status = Some(Status::Failure);
            return Status::Failure;
        };

        let mut eval = Eval {
            tree,
            handlers:     &self.handlers,
            leaf: LeafContext {
                agent,
                tick: world.tick,
                world,
                decision,
                actuator,
                rng,
                elapsed: 0,
            },
            prev_running:  instance.running,
            prev_since:    instance.running_since,
            resume:        &instance.resume,
            resuming:      instance.running.is_some(),
            path:          Vec::new(),
            next_running:  None,
            next_path:     Vec::new(),
            last_action:   None,
        };
        let status = eval.node(tree.root);

        let next = eval.next_running;
        let next_path = eval.next_path;
        let last_action = eval.last_action;
        if next != instance.running {
            instance.running_since = world.tick;
        }
        instance.running = next;
        instance.resume = next_path;
        instance.last_action = last_action;
        instance.last_status = Some(status);
        trace!(%agent, tree = %tree.name, %status, "tree evaluated");
        status
    }

    /// Handler name of the last action leaf the instance invoked.
    pub fn last_action_name(&self, instance: &TreeInstance) -> Option<&str> {
        let tree = self.trees.get(instance.template.index())?;
        match tree.nodes.get(instance.last_action?.index())? {
            Node::Action(h) => Some(self.handlers.action_name(*h)),
            _ => None,
        }
    }

    /// One-line description for debug snapshots.
    pub fn describe(&self, instance: &TreeInstance) -> String {
        let tree = self
            .trees
            .get(instance.template.index())
            .map_or("<missing>", |t| t.name.as_str());
        let running = instance
            .running
            .and_then(|n| self.leaf_label(instance.template, n))
            .unwrap_or("-");
        let last = instance.last_status.map_or("-", Status::as_str);
        format!(
            "tree={tree} active={} running={running} last={last}",
            instance.active
        )
    }

    fn leaf_label(&self, template: TemplateId, node: NodeId) -> Option<&str> {
        match self.trees.get(template.index())?.nodes.get(node.index())? {
            Node::Action(h) => Some(self.handlers.action_name(*h)),
            Node::Condition(h) => Some(self.handlers.condition_name(*h)),
            Node::Unbound(name) => Some(name),
            Node::Selector(_) | Node::Sequence(_) => None,
        }
    }
}

// ── Evaluation ────────────────────────────────────────────────────────────────

struct Eval<'a, 'w> {
    tree:         &'a CompiledTree,
    handlers:     &'a HandlerRegistry,
    leaf:         LeafContext<'a, 'w>,
    prev_running: Option<NodeId>,
    prev_since:   Tick,
    resume:       &'a [u32],
    /// Still walking the remembered path towards the running leaf.
    resuming:     bool,
    path:         Vec<u32>,
    next_running: Option<NodeId>,
    next_path:    Vec<u32>,
    last_action:  Option<NodeId>,
}

impl Eval<'_, '_> {
    fn node(&mut self, id: NodeId) -> Status {
        let tree = self.tree;
        let node = &tree.nodes[id.index()];
        if !matches!(node, Node::Selector(_) | Node::Sequence(_)) {
            self.resuming = false;
        }
        match node {
            Node::Action(h) => {
                self.leaf.elapsed = if self.prev_running == Some(id) {
                    self.leaf.tick.since(self.prev_since)
                } else {
                    0
                };
                self.last_action = Some(id);
                let status = self.handlers.run_action(*h, &mut self.leaf);
                if status == Status::Running {
                    self.next_running = Some(id);
                    self.next_path.clone_from(&self.path);
                }
                status
            }
            Node::Condition(h) => {
                Status::from_bool(self.handlers.check(*h, self.leaf.agent, self.leaf.decision))
            }
            Node::Unbound(_) => Status::Failure,
            Node::Selector(children) => {
                let start = self.resume_from(children.len());
                for (i, &child) in children.iter().enumerate().skip(start) {
                    match self.child(i, child) {
                        Status::Failure => continue,
                        other => return other,
                    }
                }
                Status::Failure
            }
            Node::Sequence(children) => {
                let start = self.resume_from(children.len());
                for (i, &child) in children.iter().enumerate().skip(start) {
                    match self.child(i, child) {
                        Status::Success => continue,
                        other => return other,
                    }
                }
                Status::Success
            }
        }
    }

    fn child(&mut self, index: usize, child: NodeId) -> Status {
        self.path.push(index as u32);
        let status = self.node(child);
        self.path.pop();
        status
    }

    /// First child a composite with `len` children should visit.
    fn resume_from(&mut self, len: usize) -> usize {
        if !self.resuming {
            return 0;
        }
        match self.resume.get(self.path.len()) {
            Some(&i) if (i as usize) < len => i as usize,
            _ => {
                self.resuming = false;
                0
            }
        }
    }
}

//! Name-keyed registry of leaf functions.
//!
//! Templates name their leaves; the registry maps those names to functions.
//! Names are resolved once, when a template is compiled, so evaluation never
//! hashes a string.  Registering a name twice replaces the earlier function.

use rustc_hash::FxHashMap;
use tracing::warn;

use mind_context::{Actuator, DecisionContext, WorldContext};
use mind_core::{AgentId, AgentRng, Tick};

use crate::Status;

/// Everything an action handler may read or write.
pub struct LeafContext<'a, 'w> {
    pub agent:    AgentId,
    pub tick:     Tick,
    pub world:    &'a WorldContext<'w>,
    pub decision: &'a DecisionContext,
    pub actuator: &'a mut dyn Actuator,
    pub rng:      &'a mut AgentRng,

    /// Ticks this leaf has been continuously `Running`.  Zero on first entry;
    /// duration-based actions compare it against their own threshold.
    pub elapsed:  u64,
}

/// Side-effecting action body.
pub type ActionFn = Box<dyn Fn(&mut LeafContext<'_, '_>) -> Status + Send + Sync>;

/// Pure condition body.
pub type ConditionFn = Box<dyn Fn(AgentId, &DecisionContext) -> bool + Send + Sync>;

/// Index of a resolved handler inside a [`HandlerRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u32);

struct Table<F> {
    names: Vec<String>,
    funcs: Vec<F>,
    index: FxHashMap<String, HandlerId>,
}

impl<F> Default for Table<F> {
    fn default() -> Self {
        Self { names: Vec::new(), funcs: Vec::new(), index: FxHashMap::default() }
    }
}

impl<F> Table<F> {
    fn insert(&mut self, kind: &'static str, name: &str, f: F) -> HandlerId {
        if let Some(&id) = self.index.get(name) {
            warn!(kind, name, "handler registered twice; replacing");
            self.funcs[id.0 as usize] = f;
            return id;
        }
        let id = HandlerId(self.funcs.len() as u32);
        self.names.push(name.to_owned());
        self.funcs.push(f);
        self.index.insert(name.to_owned(), id);
        id
    }
}

/// Action and condition functions keyed by stable names.
#[derive(Default)]
pub struct HandlerRegistry {
    actions:    Table<ActionFn>,
    conditions: Table<ConditionFn>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_action<F>(&mut self, name: &str, f: F) -> HandlerId
    where
        F: Fn(&mut LeafContext<'_, '_>) -> Status + Send + Sync + 'static,
    {
        self.actions.insert("action", name, Box::new(f))
    }

    pub fn register_condition<F>(&mut self, name: &str, f: F) -> HandlerId
    where
        F: Fn(AgentId, &DecisionContext) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert("condition", name, Box::new(f))
    }

    pub fn action_id(&self, name: &str) -> Option<HandlerId> {
        self.actions.index.get(name).copied()
    }

    pub fn condition_id(&self, name: &str) -> Option<HandlerId> {
        self.conditions.index.get(name).copied()
    }

    pub fn action_name(&self, id: HandlerId) -> &str {
        &self.actions.names[id.0 as usize]
    }

    pub fn condition_name(&self, id: HandlerId) -> &str {
        &self.conditions.names[id.0 as usize]
    }

    pub fn action_count(&self) -> usize {
        self.actions.funcs.len()
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.funcs.len()
    }

    #[inline]
    pub(crate) fn run_action(&self, id: HandlerId, leaf: &mut LeafContext<'_, '_>) -> Status {
        (self.actions.funcs[id.0 as usize])(leaf)
    }

    #[inline]
    pub(crate) fn check(&self, id: HandlerId, agent: AgentId, ctx: &DecisionContext) -> bool {
        (self.conditions.funcs[id.0 as usize])(agent, ctx)
    }
}

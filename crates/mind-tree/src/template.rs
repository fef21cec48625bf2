//! Serializable tree templates.
//!
//! A template is a flat arena of [`NodeDef`]s.  Composite nodes refer to
//! their children by arena index, and every child must come *before* its
//! parent, which makes every valid template acyclic by construction.  Leaf
//! nodes carry only a handler name; the functions themselves live in a
//! [`HandlerRegistry`][crate::HandlerRegistry] and are resolved when the
//! template is compiled into a [`TreeEngine`][crate::TreeEngine].

use serde::{Deserialize, Serialize};

use mind_core::NodeId;

use crate::{TreeError, TreeResult};

/// One node of a template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDef {
    /// Runs the side-effecting handler registered under `name`.
    Action { name: String },

    /// Evaluates the predicate registered under `name`.
    Condition { name: String },

    /// Succeeds on the first succeeding child.
    Selector { children: Vec<u32> },

    /// Fails on the first failing child.
    Sequence { children: Vec<u32> },
}

impl NodeDef {
    pub fn children(&self) -> &[u32] {
        match self {
            NodeDef::Selector { children } | NodeDef::Sequence { children } => children,
            NodeDef::Action { .. } | NodeDef::Condition { .. } => &[],
        }
    }
}

/// A named node graph for one life-stage category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTemplate {
    pub name: String,

    /// Life-stage category this template serves ("Baby", "Adult", ...).
    pub category: String,

    /// Root node index.  Defaults to the last node.
    #[serde(default)]
    pub root: Option<u32>,

    pub nodes: Vec<NodeDef>,
}

impl TreeTemplate {
    pub fn builder(name: impl Into<String>, category: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            name:     name.into(),
            category: category.into(),
            nodes:    Vec::new(),
        }
    }

    /// Resolved root index.
    pub fn root_id(&self) -> Option<NodeId> {
        match self.root {
            Some(r) => Some(NodeId(r)),
            None => self.nodes.len().checked_sub(1).map(|i| NodeId(i as u32)),
        }
    }

    /// Check the arena invariants: non-empty, root in range, every child an
    /// earlier node.
    pub fn validate(&self) -> TreeResult<()> {
        let Some(root) = self.root_id() else {
            return Err(TreeError::EmptyTemplate(self.name.clone()));
        };
        if root.index() >= self.nodes.len() {
            return Err(TreeError::BadRoot { template: self.name.clone(), root: root.0 });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(&child) = node.children().iter().find(|&&c| c as usize >= i) {
                return Err(TreeError::BadChildIndex {
                    template: self.name.clone(),
                    node:     i as u32,
                    child,
                });
            }
        }
        Ok(())
    }
}

/// Fluent, bottom-up template construction.
///
/// ```rust
/// use mind_tree::TreeTemplate;
///
/// let mut b = TreeTemplate::builder("tiny", "Adult");
/// let hungry = b.condition("is_hungry");
/// let eat = b.action("eat");
/// let feed = b.sequence([hungry, eat]);
/// let wander = b.action("wander");
/// let root = b.selector([feed, wander]);
/// let template = b.build(root);
/// assert!(template.validate().is_ok());
/// ```
pub struct TemplateBuilder {
    name:     String,
    category: String,
    nodes:    Vec<NodeDef>,
}

impl TemplateBuilder {
    fn push(&mut self, node: NodeDef) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    pub fn action(&mut self, handler: &str) -> NodeId {
        self.push(NodeDef::Action { name: handler.to_owned() })
    }

    pub fn condition(&mut self, predicate: &str) -> NodeId {
        self.push(NodeDef::Condition { name: predicate.to_owned() })
    }

    pub fn selector(&mut self, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let children = children.into_iter().map(|c| c.0).collect();
        self.push(NodeDef::Selector { children })
    }

    pub fn sequence(&mut self, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let children = children.into_iter().map(|c| c.0).collect();
        self.push(NodeDef::Sequence { children })
    }

    pub fn build(self, root: NodeId) -> TreeTemplate {
        TreeTemplate {
            name:     self.name,
            category: self.category,
            root:     Some(root.0),
            nodes:    self.nodes,
        }
    }
}

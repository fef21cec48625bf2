//! Serializable goal and step definitions.

use serde::{Deserialize, Serialize};

/// Something an agent may want to bring about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalDef {
    pub name:     String,
    pub priority: f32,

    /// Predicate that holds once the goal is met.  A goal without one is
    /// never satisfied.
    #[serde(default)]
    pub satisfied: Option<String>,
}

impl GoalDef {
    pub fn new(name: impl Into<String>, priority: f32) -> Self {
        Self { name: name.into(), priority, satisfied: None }
    }

    pub fn satisfied_when(mut self, predicate: &str) -> Self {
        self.satisfied = Some(predicate.to_owned());
        self
    }
}

/// One plannable step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDef {
    pub name: String,

    /// Ticks the step takes once started.
    #[serde(default)]
    pub duration: u64,

    /// Predicate that must hold for the step to be planned.  None means
    /// always eligible.
    #[serde(default)]
    pub precondition: Option<String>,

    /// Effect run when the step completes.  None is a no-op.
    #[serde(default)]
    pub effect: Option<String>,
}

impl StepDef {
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self { name: name.into(), duration, precondition: None, effect: None }
    }

    pub fn requires(mut self, predicate: &str) -> Self {
        self.precondition = Some(predicate.to_owned());
        self
    }

    pub fn then(mut self, effect: &str) -> Self {
        self.effect = Some(effect.to_owned());
        self
    }
}

//! Agent intents: what an engine decided an agent should do.

use std::fmt;

/// The outcome of one agent evaluation.
///
/// Goal intents are pushed to the actuator via `force_goal`; action intents
/// have already been carried out by their handler and are recorded for
/// observers and the debug snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Intent {
    /// The agent adopted a named goal.
    Goal(String),

    /// The agent performed (or is still performing) a named action.
    Action(String),

    /// Nothing to do this evaluation.
    #[default]
    Idle,
}

impl Intent {
    pub fn name(&self) -> Option<&str> {
        match self {
            Intent::Goal(n) | Intent::Action(n) => Some(n),
            Intent::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Intent::Idle)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Goal(n)   => write!(f, "goal:{n}"),
            Intent::Action(n) => write!(f, "action:{n}"),
            Intent::Idle      => f.write_str("idle"),
        }
    }
}

//! Shared error type for the decision core.
//!
//! Sub-crates define their own construction/loading error enums; `MindError`
//! covers the runtime taxonomy shared by every engine.  Runtime errors are
//! never allowed to escape one agent's evaluation: engines turn them into a
//! `Failure` status or a failed `ActionResult` and log them.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `mind-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MindError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    /// A sensor or actuator is absent for this agent.
    #[error("missing collaborator `{what}` for agent {agent}")]
    MissingCollaborator {
        agent: AgentId,
        what:  &'static str,
    },

    /// An interaction target disappeared between selection and execution.
    #[error("interaction target {0} is no longer valid")]
    InvalidTarget(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MindError {
    /// Shorthand for a [`MindError::MissingCollaborator`].
    pub fn missing(agent: AgentId, what: &'static str) -> Self {
        MindError::MissingCollaborator { agent, what }
    }
}

/// Shorthand result type for all `mind-*` crates.
pub type MindResult<T> = Result<T, MindError>;

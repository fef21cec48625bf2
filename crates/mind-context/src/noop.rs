//! A world with no collaborators behind it.

use mind_core::{AgentId, MindError, MindResult, Position};

use crate::{Actuator, Sensors};

/// Sensors that know nothing and an actuator that reaches nothing.
///
/// Every handle is reported valid and alive so the engines run, but every
/// query comes back empty and every write fails with
/// [`MindError::MissingCollaborator`].  Useful as a placeholder in tests and
/// for exercising degradation paths.
pub struct NullWorld;

impl Sensors for NullWorld {
    fn is_valid(&self, _agent: AgentId) -> bool {
        true
    }

    fn is_alive(&self, _agent: AgentId) -> bool {
        true
    }

    fn position(&self, _agent: AgentId) -> Option<Position> {
        None
    }

    fn normalized_need(&self, _agent: AgentId, _need: &str) -> Option<f32> {
        None
    }
}

impl Actuator for NullWorld {
    fn force_goal(&mut self, agent: AgentId, _goal: &str) -> MindResult<()> {
        Err(MindError::missing(agent, "goal store"))
    }

    fn set_destination(&mut self, agent: AgentId, _destination: Position) -> MindResult<()> {
        Err(MindError::missing(agent, "locomotion"))
    }

    fn fill_need(&mut self, agent: AgentId, _need: &str, _delta: f32) -> MindResult<()> {
        Err(MindError::missing(agent, "needs store"))
    }
}

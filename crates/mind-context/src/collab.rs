//! Collaborator traits: the only way the decision core touches the world.
//!
//! The world simulation implements [`Sensors`] and [`Environment`] (read-only
//! queries) and [`Actuator`] (writes).  Every query is synchronous and must
//! be bounded: the scheduler calls them on the tick thread.
//!
//! Absence is expressed per call rather than per trait: a sensor returning
//! `None`, or an actuator returning [`MindError::MissingCollaborator`], means
//! "this collaborator does not exist for this agent".  Engines treat that as
//! a failed node or action and keep going.
//!
//! [`MindError::MissingCollaborator`]: mind_core::MindError::MissingCollaborator

use mind_core::{AgentId, EmotionKind, MindResult, Position, Weather};

/// Read-only per-agent queries.
///
/// Only the handle checks, [`position`][Self::position] and
/// [`normalized_need`][Self::normalized_need] are required.  The social and
/// emotional queries default to "not available" so simple worlds need not
/// implement them.
pub trait Sensors {
    /// `false` once the handle no longer refers to anything (despawned,
    /// recycled).  The scheduler drops such entries lazily.
    fn is_valid(&self, agent: AgentId) -> bool;

    /// `false` once the creature has died.
    fn is_alive(&self, agent: AgentId) -> bool;

    fn position(&self, agent: AgentId) -> Option<Position>;

    /// Pressure of the named need in [0, 1]; 1.0 is most urgent.
    fn normalized_need(&self, agent: AgentId, need: &str) -> Option<f32>;

    /// Dominant emotion and its intensity in [0, 1].
    fn dominant_emotion(&self, _agent: AgentId) -> Option<(EmotionKind, f32)> {
        None
    }

    /// Relationship of `a` towards `b` in [-1, 1].
    fn relationship(&self, _a: AgentId, _b: AgentId) -> Option<f32> {
        None
    }

    /// All agents within `radius` of `position`, in any order.  May include
    /// the querying agent itself.
    fn nearby_agents(&self, _position: Position, _radius: f32) -> Vec<AgentId> {
        vec![]
    }

    /// Life-stage category used to pick a behavior-tree template
    /// (e.g. "Baby", "Child", "Adult", "Elder").
    fn life_stage(&self, _agent: AgentId) -> Option<String> {
        None
    }
}

/// Global environment queries.
pub trait Environment {
    /// Daylight in [0, 1]; 0 is full night.
    fn sunlight_factor(&self) -> f32;

    fn weather(&self) -> Weather;
}

/// Writes from the decision core back into the world.
pub trait Actuator {
    /// Make `goal` the agent's current goal in the world's goal store.
    fn force_goal(&mut self, agent: AgentId, goal: &str) -> MindResult<()>;

    /// Ask the locomotion system to move the agent.
    fn set_destination(&mut self, agent: AgentId, destination: Position) -> MindResult<()>;

    /// Satisfy the named need by `delta` (the world lowers its pressure).
    /// A negative `delta` makes the need more pressing.
    fn fill_need(&mut self, agent: AgentId, need: &str, delta: f32) -> MindResult<()>;
}

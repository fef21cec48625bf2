//! Read-only world view passed to every engine callback.

use mind_core::{AgentId, Position, Tick, Weather};

use crate::{Environment, Sensors};

/// A read-only view of the world for a single scheduler tick.
///
/// Built once per firing tick by the scheduler and shared by every agent
/// evaluated in that tick.  The environment is optional: a world without a
/// weather/daylight model simply leaves the environment inputs unknown.
#[derive(Clone, Copy)]
pub struct WorldContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    pub sensors: &'a dyn Sensors,

    pub environment: Option<&'a dyn Environment>,
}

impl<'a> WorldContext<'a> {
    #[inline]
    pub fn new(
        tick:        Tick,
        sensors:     &'a dyn Sensors,
        environment: Option<&'a dyn Environment>,
    ) -> Self {
        Self { tick, sensors, environment }
    }

    /// `true` if the handle is valid and the creature alive.
    #[inline]
    pub fn is_live(&self, agent: AgentId) -> bool {
        self.sensors.is_valid(agent) && self.sensors.is_alive(agent)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Position> {
        self.sensors.position(agent)
    }

    /// Position of `agent` if it is still valid and alive.
    pub fn live_position(&self, agent: AgentId) -> Option<Position> {
        if self.is_live(agent) { self.sensors.position(agent) } else { None }
    }

    pub fn sunlight(&self) -> Option<f32> {
        self.environment.map(|e| e.sunlight_factor().clamp(0.0, 1.0))
    }

    pub fn weather(&self) -> Option<Weather> {
        self.environment.map(|e| e.weather())
    }
}

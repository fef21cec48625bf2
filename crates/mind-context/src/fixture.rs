//! `StaticWorld` and `CommandBuffer` — a small in-memory world for tests and
//! demos.
//!
//! Reads and writes are split the same way the scheduler's tick is: during a
//! tick the world is borrowed read-only as `Sensors`/`Environment`, and every
//! write lands in a [`CommandBuffer`].  After the tick the owner calls
//! [`StaticWorld::apply`] to fold the buffered writes into the world.  The
//! buffer keeps the applied calls so tests can assert on exactly what an
//! engine did.

use std::collections::{HashMap, HashSet};

use mind_core::{AgentId, EmotionKind, MindError, MindResult, Position, Weather};

use crate::{Actuator, Environment, Sensors};

/// One creature as seen by [`StaticWorld`].
#[derive(Clone, Debug)]
pub struct AgentRecord {
    pub position:    Position,
    pub alive:       bool,
    pub needs:       HashMap<String, f32>,
    pub emotion:     Option<(EmotionKind, f32)>,
    pub life_stage:  Option<String>,
    pub goal:        Option<String>,
    pub destination: Option<Position>,
}

impl Default for AgentRecord {
    fn default() -> Self {
        Self {
            position:    Position::ORIGIN,
            alive:       true,
            needs:       HashMap::new(),
            emotion:     None,
            life_stage:  None,
            goal:        None,
            destination: None,
        }
    }
}

/// A recorded actuator write.
#[derive(Clone, Debug, PartialEq)]
pub enum ActuatorCall {
    ForceGoal { agent: AgentId, goal: String },
    SetDestination { agent: AgentId, destination: Position },
    FillNeed { agent: AgentId, need: String, delta: f32 },
}

#[derive(Default)]
pub struct StaticWorld {
    pub agents:        HashMap<AgentId, AgentRecord>,
    pub relationships: HashMap<(AgentId, AgentId), f32>,
    pub sunlight:      f32,
    pub weather:       Weather,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self { sunlight: 1.0, ..Self::default() }
    }

    /// Insert (or replace) an agent at `position` and return its record.
    pub fn spawn(&mut self, agent: AgentId, position: Position) -> &mut AgentRecord {
        let slot = self.agents.entry(agent).or_default();
        *slot = AgentRecord { position, ..AgentRecord::default() };
        slot
    }

    /// Set a need's pressure, creating the agent if needed.
    pub fn set_need(&mut self, agent: AgentId, need: &str, value: f32) {
        self.agents
            .entry(agent)
            .or_default()
            .needs
            .insert(need.to_owned(), value);
    }

    pub fn need(&self, agent: AgentId, need: &str) -> Option<f32> {
        self.agents.get(&agent)?.needs.get(need).copied()
    }

    pub fn despawn(&mut self, agent: AgentId) {
        self.agents.remove(&agent);
    }

    pub fn kill(&mut self, agent: AgentId) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.alive = false;
        }
    }

    /// Apply and drain every buffered write.  Writes addressed to agents
    /// that no longer exist are dropped.
    pub fn apply(&mut self, buffer: &mut CommandBuffer) {
        for call in buffer.pending.drain(..) {
            match &call {
                ActuatorCall::ForceGoal { agent, goal } => {
                    if let Some(a) = self.agents.get_mut(agent) {
                        a.goal = Some(goal.clone());
                    }
                }
                ActuatorCall::SetDestination { agent, destination } => {
                    if let Some(a) = self.agents.get_mut(agent) {
                        a.destination = Some(*destination);
                    }
                }
                ActuatorCall::FillNeed { agent, need, delta } => {
                    if let Some(a) = self.agents.get_mut(agent) {
                        let v = a.needs.entry(need.clone()).or_insert(0.0);
                        *v = (*v - delta).clamp(0.0, 1.0);
                    }
                }
            }
            buffer.applied.push(call);
        }
    }
}

impl Sensors for StaticWorld {
    fn is_valid(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }

    fn is_alive(&self, agent: AgentId) -> bool {
        self.agents.get(&agent).is_some_and(|a| a.alive)
    }

    fn position(&self, agent: AgentId) -> Option<Position> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn normalized_need(&self, agent: AgentId, need: &str) -> Option<f32> {
        self.need(agent, need)
    }

    fn dominant_emotion(&self, agent: AgentId) -> Option<(EmotionKind, f32)> {
        self.agents.get(&agent)?.emotion
    }

    fn relationship(&self, a: AgentId, b: AgentId) -> Option<f32> {
        self.relationships.get(&(a, b)).copied()
    }

    fn nearby_agents(&self, position: Position, radius: f32) -> Vec<AgentId> {
        let mut out: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| a.position.within(position, radius))
            .map(|(&id, _)| id)
            .collect();
        // HashMap order is unstable; keep query results deterministic.
        out.sort_unstable();
        out
    }

    fn life_stage(&self, agent: AgentId) -> Option<String> {
        self.agents.get(&agent)?.life_stage.clone()
    }
}

impl Environment for StaticWorld {
    fn sunlight_factor(&self) -> f32 {
        self.sunlight
    }

    fn weather(&self) -> Weather {
        self.weather
    }
}

// ── CommandBuffer ─────────────────────────────────────────────────────────────

/// An [`Actuator`] that records writes for later application.
#[derive(Default)]
pub struct CommandBuffer {
    pending: Vec<ActuatorCall>,

    /// Every call already folded into a world by [`StaticWorld::apply`].
    pub applied: Vec<ActuatorCall>,

    /// Agents with no actuator; writes for them fail as missing.
    pub detached: HashSet<AgentId>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes recorded since the last [`StaticWorld::apply`].
    pub fn pending(&self) -> &[ActuatorCall] {
        &self.pending
    }

    /// Pending and applied calls, oldest first.
    pub fn all_calls(&self) -> impl Iterator<Item = &ActuatorCall> {
        self.applied.iter().chain(self.pending.iter())
    }

    /// Number of recorded `force_goal` calls naming `goal`.
    pub fn goal_calls(&self, goal: &str) -> usize {
        self.all_calls()
            .filter(|c| matches!(c, ActuatorCall::ForceGoal { goal: g, .. } if g == goal))
            .count()
    }

    fn check(&self, agent: AgentId, what: &'static str) -> MindResult<()> {
        if self.detached.contains(&agent) {
            Err(MindError::missing(agent, what))
        } else {
            Ok(())
        }
    }
}

impl Actuator for CommandBuffer {
    fn force_goal(&mut self, agent: AgentId, goal: &str) -> MindResult<()> {
        self.check(agent, "goal store")?;
        self.pending.push(ActuatorCall::ForceGoal { agent, goal: goal.to_owned() });
        Ok(())
    }

    fn set_destination(&mut self, agent: AgentId, destination: Position) -> MindResult<()> {
        self.check(agent, "locomotion")?;
        self.pending.push(ActuatorCall::SetDestination { agent, destination });
        Ok(())
    }

    fn fill_need(&mut self, agent: AgentId, need: &str, delta: f32) -> MindResult<()> {
        self.check(agent, "needs store")?;
        self.pending.push(ActuatorCall::FillNeed { agent, need: need.to_owned(), delta });
        Ok(())
    }
}

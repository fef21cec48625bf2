//! Per-agent decision context: a snapshot of normalized inputs.

use serde::{Deserialize, Serialize};
use tracing::trace;

use mind_core::{AgentId, EmotionKind, Tick};

use crate::{InputKind, WorldContext};

/// How far an agent looks when building its context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Radius (metres) for nearby-agent queries and target selection.
    pub radius: f32,

    /// Nearby-agent count that maps to `Crowding = 1.0`.
    pub crowding_cap: u32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self { radius: 10.0, crowding_cap: 8 }
    }
}

/// A snapshot of one agent's normalized inputs, its interaction target and
/// the tick it was taken at.
///
/// Rebuilt every time the agent is evaluated and owned by that agent's
/// scheduler slot.  Every stored value is clamped to [0, 1].  Inputs whose
/// collaborator was missing read as 0.0 and report `false` from
/// [`is_known`][Self::is_known].
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionContext {
    inputs: [f32; InputKind::COUNT],
    known:  [bool; InputKind::COUNT],

    /// Agent chosen for social or combat interactions, if any.
    pub target: Option<AgentId>,

    /// Tick the snapshot was taken.
    pub built_at: Tick,
}

impl Default for DecisionContext {
    fn default() -> Self {
        Self::empty(Tick::ZERO)
    }
}

impl DecisionContext {
    /// A context with every input unknown.
    pub fn empty(built_at: Tick) -> Self {
        Self {
            inputs: [0.0; InputKind::COUNT],
            known:  [false; InputKind::COUNT],
            target: None,
            built_at,
        }
    }

    /// Query the collaborators for a fresh snapshot of `agent`.
    pub fn build(agent: AgentId, world: &WorldContext<'_>, perception: &PerceptionConfig) -> Self {
        let mut ctx = Self::empty(world.tick);
        ctx.refresh(agent, world, perception);
        ctx
    }

    /// Rebuild this snapshot in place, reusing the allocation.
    pub fn refresh(&mut self, agent: AgentId, world: &WorldContext<'_>, perception: &PerceptionConfig) {
        *self = Self::empty(world.tick);
        let sensors = world.sensors;

        for kind in InputKind::NEEDS {
            if let Some(name) = kind.need_name()
                && let Some(v) = sensors.normalized_need(agent, name)
            {
                self.set(kind, v);
            }
        }
        if self.is_known(InputKind::Fatigue) {
            self.set(InputKind::Energy, 1.0 - self.get(InputKind::Fatigue));
        }

        if let Some((emotion, intensity)) = sensors.dominant_emotion(agent) {
            self.set(InputKind::EmotionIntensity, intensity);
            let fear = if emotion == EmotionKind::Afraid { intensity } else { 0.0 };
            let anger = if emotion == EmotionKind::Angry { intensity } else { 0.0 };
            self.set(InputKind::Fear, fear);
            self.set(InputKind::Aggression, anger);
        }

        if let Some(sun) = world.sunlight() {
            self.set(InputKind::Sunlight, sun);
        }
        if let Some(weather) = world.weather() {
            self.set(InputKind::WeatherSeverity, weather.severity());
        }

        if let Some(pos) = sensors.position(agent) {
            let mut best: Option<(AgentId, f32)> = None;
            let mut neighbours = 0u32;
            for other in sensors.nearby_agents(pos, perception.radius) {
                if other == agent || !world.is_live(other) {
                    continue;
                }
                neighbours += 1;
                let rel = sensors.relationship(agent, other).unwrap_or(0.0);
                // Strictly greater: the first-seen neighbour wins ties.
                if best.is_none_or(|(_, r)| rel > r) {
                    best = Some((other, rel));
                }
            }
            let cap = perception.crowding_cap.max(1) as f32;
            self.set(InputKind::Crowding, neighbours as f32 / cap);
            self.set(InputKind::TargetPresent, if best.is_some() { 1.0 } else { 0.0 });
            if let Some((target, rel)) = best {
                self.target = Some(target);
                self.set(InputKind::Affinity, (rel.clamp(-1.0, 1.0) + 1.0) * 0.5);
            }
        }

        trace!(%agent, tick = %self.built_at, target = ?self.target, "decision context rebuilt");
    }

    /// Normalized value of `kind`; 0.0 if unknown.
    #[inline]
    pub fn get(&self, kind: InputKind) -> f32 {
        self.inputs[kind.index()]
    }

    /// Store `value` clamped to [0, 1] and mark the input known.
    /// NaN is stored as 0.0.
    #[inline]
    pub fn set(&mut self, kind: InputKind, value: f32) {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.inputs[kind.index()] = v;
        self.known[kind.index()] = true;
    }

    /// Builder-style [`set`][Self::set], handy for hand-made snapshots.
    pub fn with(mut self, kind: InputKind, value: f32) -> Self {
        self.set(kind, value);
        self
    }

    #[inline]
    pub fn is_known(&self, kind: InputKind) -> bool {
        self.known[kind.index()]
    }

    /// Iterator over every known input and its value.
    pub fn known_inputs(&self) -> impl Iterator<Item = (InputKind, f32)> + '_ {
        InputKind::ALL
            .into_iter()
            .filter(|k| self.is_known(*k))
            .map(|k| (k, self.get(k)))
    }
}

//! Utility action templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mind_context::{DecisionContext, InputKind};

use crate::ResponseCurve;

// ── ActionKind ────────────────────────────────────────────────────────────────

/// Broad category of an action; scales every score of that kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Survival,
    Rest,
    Social,
    Leisure,
    Exploration,
    /// Requires an interaction target.
    Combat,
}

impl ActionKind {
    pub const COUNT: usize = 6;

    pub const ALL: [ActionKind; Self::COUNT] = [
        ActionKind::Survival,
        ActionKind::Rest,
        ActionKind::Social,
        ActionKind::Leisure,
        ActionKind::Exploration,
        ActionKind::Combat,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn needs_target(self) -> bool {
        matches!(self, ActionKind::Combat)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Survival    => "survival",
            ActionKind::Rest        => "rest",
            ActionKind::Social      => "social",
            ActionKind::Leisure     => "leisure",
            ActionKind::Exploration => "exploration",
            ActionKind::Combat      => "combat",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ActionKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action kind {s:?}"))
    }
}

// ── TypeWeights ───────────────────────────────────────────────────────────────

/// Per-kind score multipliers.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeWeights([f32; ActionKind::COUNT]);

impl Default for TypeWeights {
    fn default() -> Self {
        let mut w = [1.0; ActionKind::COUNT];
        w[ActionKind::Social.index()] = 0.9;
        w[ActionKind::Leisure.index()] = 0.8;
        w[ActionKind::Exploration.index()] = 0.9;
        w[ActionKind::Combat.index()] = 0.7;
        Self(w)
    }
}

impl TypeWeights {
    /// Every kind weighted 1.0.
    pub fn uniform() -> Self {
        Self([1.0; ActionKind::COUNT])
    }

    #[inline]
    pub fn get(&self, kind: ActionKind) -> f32 {
        self.0[kind.index()]
    }

    /// Negative weights are treated as 0.
    pub fn set(&mut self, kind: ActionKind, weight: f32) {
        self.0[kind.index()] = weight.max(0.0);
    }
}

// ── Consideration ─────────────────────────────────────────────────────────────

/// One weighted input feeding an action's score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consideration {
    pub input:  InputKind,
    pub weight: f32,

    /// Input value that normalizes to 0.
    #[serde(default)]
    pub min: f32,

    /// Input value that normalizes to 1.
    #[serde(default = "one")]
    pub max: f32,

    /// `None` is the identity curve.
    #[serde(default)]
    pub curve: Option<ResponseCurve>,
}

fn one() -> f32 {
    1.0
}

impl Consideration {
    /// Full-range, identity-curve consideration.
    pub fn new(input: InputKind, weight: f32) -> Self {
        Self { input, weight, min: 0.0, max: 1.0, curve: None }
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_curve(mut self, curve: ResponseCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// `value` mapped onto [0, 1] by the valid range.
    ///
    /// A degenerate range (`max <= min`) acts as a threshold at `max`.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return if value >= self.max { 1.0 } else { 0.0 };
        }
        let n = (value - self.min) / span;
        if n.is_nan() { 0.0 } else { n.clamp(0.0, 1.0) }
    }

    /// Curve output for the input read from `ctx`.
    pub fn response(&self, ctx: &DecisionContext) -> f32 {
        let n = self.normalize(ctx.get(self.input));
        self.curve.map_or(n, |c| c.evaluate(n))
    }

    /// Multiplier this consideration applies to the running score:
    /// `lerp(0.1, 1.0, response * weight)`, always within [0.1, 1].
    pub fn factor(&self, ctx: &DecisionContext) -> f32 {
        lerp(0.1, 1.0, self.response(ctx) * self.weight)
    }
}

/// Clamped lerp: `t` outside [0, 1] saturates at the ends.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    a + (b - a) * t
}

// ── UtilityAction ─────────────────────────────────────────────────────────────

/// A shared, immutable action template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilityAction {
    pub name: String,
    pub kind: ActionKind,

    /// Starting score, in [0, 1].
    pub base_priority: f32,

    /// Energy the action spends; an agent with less cannot perform it.
    #[serde(default)]
    pub energy_cost: f32,

    /// Cooldown in ticks.  Also sets the recency-penalty window (twice this).
    #[serde(default)]
    pub time_cost: u64,

    #[serde(default)]
    pub considerations: Vec<Consideration>,
}

impl UtilityAction {
    pub fn new(name: impl Into<String>, kind: ActionKind, base_priority: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            base_priority,
            energy_cost: 0.0,
            time_cost: 0,
            considerations: Vec::new(),
        }
    }

    pub fn with_costs(mut self, energy: f32, ticks: u64) -> Self {
        self.energy_cost = energy;
        self.time_cost = ticks;
        self
    }

    pub fn consider(mut self, consideration: Consideration) -> Self {
        self.considerations.push(consideration);
        self
    }

    /// Score before the type weight and recency penalty.
    pub fn raw_score(&self, ctx: &DecisionContext) -> f32 {
        self.considerations
            .iter()
            .fold(self.base_priority.clamp(0.0, 1.0), |score, c| score * c.factor(ctx))
    }
}

//! Scheduler configuration.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! update_interval = 2
//! max_per_tick    = 64
//! default_style   = "utility"
//!
//! [throttle]
//! radius                = 40.0
//! far_evaluation_chance = 0.25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use mind_context::PerceptionConfig;
use mind_tree::DEFAULT_FALLBACK_CATEGORY;

use crate::{SchedError, SchedResult};

/// Which engine drives an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStyle {
    /// Behavior tree picked by life stage.
    #[default]
    Tree,
    /// Goal planner first, utility scorer when the planner has nothing to do.
    Utility,
}

impl DecisionStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionStyle::Tree    => "tree",
            DecisionStyle::Utility => "utility",
        }
    }
}

impl std::fmt::Display for DecisionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance-based evaluation throttle around the focus point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Agents within this many metres of the focus are always evaluated.
    pub radius: f32,

    /// Chance that a selected agent beyond `radius` is evaluated.
    pub far_evaluation_chance: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { radius: 50.0, far_evaluation_chance: 0.1 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minimum ticks between firing ticks.
    pub update_interval: u64,

    /// Agents evaluated per firing tick.
    pub max_per_tick: usize,

    /// Utility-decision debounce, in ticks.
    pub decision_interval: u64,

    /// Global seed for per-agent RNGs.
    pub seed: u64,

    /// Style given to agents registered without one.
    pub default_style: DecisionStyle,

    /// Tree category used for unknown life stages.
    pub fallback_category: String,

    pub perception: PerceptionConfig,

    /// `None` disables throttling.
    pub throttle: Option<ThrottleConfig>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            update_interval:   1,
            max_per_tick:      32,
            decision_interval: 2,
            seed:              0,
            default_style:     DecisionStyle::Tree,
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_owned(),
            perception:        PerceptionConfig::default(),
            throttle:          None,
        }
    }
}

impl SchedulerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> SchedResult<Self> {
        let config: SchedulerConfig =
            toml::from_str(text).map_err(|e| SchedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> SchedResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> SchedResult<()> {
        if self.max_per_tick == 0 {
            return Err(SchedError::Config("max_per_tick must be at least 1".into()));
        }
        if self.fallback_category.trim().is_empty() {
            return Err(SchedError::Config("fallback_category is empty".into()));
        }
        if !non_negative(self.perception.radius) {
            return Err(SchedError::Config("perception radius must be >= 0".into()));
        }
        if let Some(t) = &self.throttle {
            if !non_negative(t.radius) {
                return Err(SchedError::Config(format!("throttle radius {} must be >= 0", t.radius)));
            }
            if !(0.0..=1.0).contains(&t.far_evaluation_chance) {
                return Err(SchedError::Config(format!(
                    "far_evaluation_chance {} is outside [0, 1]",
                    t.far_evaluation_chance
                )));
            }
        }
        Ok(())
    }
}

/// `false` for negative values and NaN.
fn non_negative(x: f32) -> bool {
    x >= 0.0
}

//! The default creature action set.

use crate::{UtilityResult, UtilityScorer, load_actions_reader};

/// Default actions, one row per consideration.
pub const DEFAULT_ACTIONS_CSV: &str = include_str!("../assets/actions.csv");

/// Decision debounce used by [`default_scorer`], in ticks.
pub const DEFAULT_DECISION_INTERVAL: u64 = 2;

/// A scorer holding every default action.
pub fn default_scorer() -> UtilityResult<UtilityScorer> {
    default_scorer_with_interval(DEFAULT_DECISION_INTERVAL)
}

pub fn default_scorer_with_interval(decision_interval: u64) -> UtilityResult<UtilityScorer> {
    let actions = load_actions_reader(DEFAULT_ACTIONS_CSV.as_bytes())?;
    UtilityScorer::new(decision_interval).with_actions(actions)
}

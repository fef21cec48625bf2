//! `mind-utility` — utility-based action scorer.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`curve`]     | `ResponseCurve`                                                |
//! | [`action`]    | `UtilityAction`, `Consideration`, `ActionKind`, `TypeWeights`  |
//! | [`scorer`]    | `UtilityScorer` (shared registry), `UtilityState` (per agent)  |
//! | [`effects`]   | built-in action effects, `ActionResult`, failure reasons       |
//! | [`loader`]    | `load_actions_csv`, `load_actions_reader`                      |
//! | [`presets`]   | the default action set                                         |
//! | [`error`]     | `UtilityError`, `UtilityResult<T>`                             |
//!
//! Action templates are stored once in the scorer and addressed by
//! [`ActionId`][mind_core::ActionId].  Everything that changes per agent
//! (cooldown ticks, the cached choice, last scores) lives in a
//! [`UtilityState`] owned by that agent's scheduler slot.

pub mod action;
pub mod curve;
pub mod effects;
pub mod error;
pub mod loader;
pub mod presets;
pub mod scorer;

#[cfg(test)]
mod tests;

pub use action::{ActionKind, Consideration, TypeWeights, UtilityAction};
pub use curve::ResponseCurve;
pub use effects::{ActionResult, EffectContext, EffectFn, builtin_effect, reason};
pub use error::{UtilityError, UtilityResult};
pub use loader::{load_actions_csv, load_actions_reader};
pub use presets::{DEFAULT_DECISION_INTERVAL, default_scorer, default_scorer_with_interval};
pub use scorer::{UtilityScorer, UtilityState};

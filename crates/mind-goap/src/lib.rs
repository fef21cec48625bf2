//! `mind-goap` — naive goal planner.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`defs`]     | `GoalDef`, `StepDef` — serializable definitions             |
//! | [`registry`] | `PlannerRegistry`, `StepContext` — named predicates/effects |
//! | [`planner`]  | `GoalPlanner`, `PlannerState`, `PlannerPhase`, `PlannerEvent` |
//! | [`loader`]   | `PlanLibrary`, TOML loading                                 |
//! | [`presets`]  | default goals, steps, predicates and effects                |
//! | [`error`]    | `PlannerError`, `PlannerResult<T>`                          |
//!
//! An empty planner (no goals or no steps) is valid: it simply never leaves
//! `Idle` or never builds a plan.

pub mod defs;
pub mod error;
pub mod loader;
pub mod planner;
pub mod presets;
pub mod registry;

#[cfg(test)]
mod tests;

pub use defs::{GoalDef, StepDef};
pub use error::{PlannerError, PlannerResult};
pub use loader::{PlanLibrary, load_plan_library_file, load_plan_library_toml};
pub use planner::{GoalPlanner, PlannerEvent, PlannerPhase, PlannerState};
pub use presets::{builtin_registry, default_planner};
pub use registry::{PlannerRegistry, PredicateFn, StepContext, StepEffectFn};

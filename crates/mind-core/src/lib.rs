//! `mind-core` — foundational types for the creature decision core.
//!
//! This crate is a dependency of every other `mind-*` crate.  It has no
//! `mind-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `TemplateId`, `ActionId`, `GoalId`, `StepId` |
//! | [`geo`]         | `Position`, planar distance                                 |
//! | [`time`]        | `Tick`                                                      |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                   |
//! | [`env`]         | `Weather`, `EmotionKind`                                    |
//! | [`error`]       | `MindError`, `MindResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod env;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use env::{EmotionKind, Weather};
pub use error::{MindError, MindResult};
pub use geo::Position;
pub use ids::{ActionId, AgentId, GoalId, NodeId, StepId, TemplateId};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;

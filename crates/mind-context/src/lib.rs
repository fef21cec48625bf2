//! `mind-context` — the boundary between the decision core and the world.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`collab`]  | `Sensors`, `Environment`, `Actuator` collaborator traits         |
//! | [`world`]   | `WorldContext<'a>` — read-only world view shared within a tick   |
//! | [`input`]   | `InputKind` — the vocabulary of normalized inputs                |
//! | [`context`] | `DecisionContext` snapshot, `PerceptionConfig`                   |
//! | [`intent`]  | `Intent` enum (`Goal`, `Action`, `Idle`)                         |
//! | [`noop`]    | `NullWorld` — collaborators that are never there                 |
//! | [`fixture`] | `StaticWorld` + `CommandBuffer` — in-memory world for tests/demos |
//!
//! # Design notes
//!
//! Engines never hold references to the world between ticks.  Each
//! evaluation receives a `&WorldContext` (reads) and a `&mut dyn Actuator`
//! (writes), and every read is condensed into a `DecisionContext` first so
//! that conditions, considerations and goal predicates are pure functions of
//! a snapshot.

pub mod collab;
pub mod context;
pub mod fixture;
pub mod input;
pub mod intent;
pub mod noop;
pub mod world;


pub use collab::{Actuator, Environment, Sensors};
pub use context::{DecisionContext, PerceptionConfig};
pub use fixture::{ActuatorCall, AgentRecord, CommandBuffer, StaticWorld};
pub use input::InputKind;
pub use intent::Intent;
pub use noop::NullWorld;
pub use world::WorldContext;

//! `mind-sched` — time-sliced scheduler that drives the decision engines.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`config`]    | `SchedulerConfig`, `ThrottleConfig`, `DecisionStyle`          |
//! | [`builder`]   | `SchedulerBuilder` — config + engines → `Scheduler`           |
//! | [`scheduler`] | `Scheduler` — registration, control, the firing-tick loop     |
//! | [`slot`]      | `AgentSlot`, `Mind` — per-agent engine state                  |
//! | [`observer`]  | `SchedulerObserver` trait, `NoopObserver`                     |
//! | [`report`]    | `TickReport`, `SkipReason`                                    |
//! | [`snapshot`]  | `AgentSnapshot` — debug view of one agent                     |
//! | [`error`]     | `SchedError`, `SchedResult<T>`                                |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let mut scheduler = SchedulerBuilder::new(SchedulerConfig::default()).build()?;
//! scheduler.register_agent(AgentId(0));
//!
//! let mut commands = CommandBuffer::new();
//! for t in 0..100 {
//!     scheduler.tick(Tick(t), &world, Some(&world), &mut commands);
//!     world.apply(&mut commands);
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod report;
pub mod scheduler;
pub mod slot;
pub mod snapshot;


pub use builder::SchedulerBuilder;
pub use config::{DecisionStyle, SchedulerConfig, ThrottleConfig};
pub use error::{SchedError, SchedResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use report::{SkipReason, TickReport};
pub use scheduler::Scheduler;
pub use slot::{AgentSlot, Mind};
pub use snapshot::AgentSnapshot;

//! Hooks into the firing-tick loop.

use mind_context::Intent;
use mind_core::{AgentId, Tick};

use crate::{SkipReason, TickReport};

/// Receives every decision [`Scheduler::tick_observed`][crate::Scheduler::tick_observed]
/// makes.  Non-firing ticks produce no calls.  Every hook defaults to doing
/// nothing.
///
/// # Example: decision printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SchedulerObserver for Printer {
///     fn on_agent_evaluated(&mut self, agent: AgentId, intent: &Intent) {
///         println!("{agent} -> {intent}");
///     }
/// }
/// ```
pub trait SchedulerObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the agent's engine ran, with what it settled on.
    fn on_agent_evaluated(&mut self, _agent: AgentId, _intent: &Intent) {}

    /// Called for throttled agents too.
    fn on_agent_skipped(&mut self, _agent: AgentId, _reason: SkipReason) {}

    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}
}

/// Observer used by [`Scheduler::tick`][crate::Scheduler::tick].
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}

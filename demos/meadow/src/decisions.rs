//! CSV decision log — one row per evaluated agent.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use mind_context::Intent;
use mind_core::{AgentId, Tick};
use mind_sched::{SchedulerObserver, SkipReason, TickReport};

#[derive(Serialize)]
struct DecisionRow<'a> {
    tick:   u64,
    agent:  u32,
    kind:   &'a str,
    name:   &'a str,
}

/// A [`SchedulerObserver`] that writes `decisions.csv` and keeps running
/// totals.
///
/// Observer methods cannot fail, so the first write error is stored; check
/// [`take_error`][Self::take_error] after the run.
pub struct DecisionLog {
    writer:     Writer<File>,
    tick:       Tick,
    pub rows:   usize,
    pub skips:  usize,
    pub totals: TickReport,
    last_error: Option<csv::Error>,
}

impl DecisionLog {
    pub fn create(path: &Path) -> csv::Result<Self> {
        Ok(Self {
            writer:     Writer::from_path(path)?,
            tick:       Tick::ZERO,
            rows:       0,
            skips:      0,
            totals:     TickReport::default(),
            last_error: None,
        })
    }

    pub fn take_error(&mut self) -> Option<csv::Error> {
        self.last_error.take()
    }

    pub fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn store_err(&mut self, result: csv::Result<()>) {
        if let Err(e) = result
            && self.last_error.is_none()
        {
            self.last_error = Some(e);
        }
    }
}

impl SchedulerObserver for DecisionLog {
    fn on_tick_start(&mut self, tick: Tick) {
        self.tick = tick;
    }

    fn on_agent_evaluated(&mut self, agent: AgentId, intent: &Intent) {
        let kind = match intent {
            Intent::Goal(_)   => "goal",
            Intent::Action(_) => "action",
            Intent::Idle      => "idle",
        };
        let row = DecisionRow {
            tick:  self.tick.0,
            agent: agent.0,
            kind,
            name:  intent.name().unwrap_or(""),
        };
        let result = self.writer.serialize(row);
        self.rows += 1;
        self.store_err(result);
    }

    fn on_agent_skipped(&mut self, _agent: AgentId, _reason: SkipReason) {
        self.skips += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.totals.evaluated += report.evaluated;
        self.totals.skipped += report.skipped;
        self.totals.throttled += report.throttled;
        self.totals.removed += report.removed;
    }
}

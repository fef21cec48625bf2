//! Per-tick outcome counters.

use std::fmt;

use mind_core::Tick;

/// Why a selected agent was not evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The handle no longer refers to anything; the entry is removed at the
    /// end of the tick.
    InvalidHandle,
    Dead,
    Inactive,
    /// Beyond the throttle radius and the random gate said no.
    Throttled,
    /// No tree template for the agent's life stage and no fallback.
    NoTemplate,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::InvalidHandle => "invalid handle",
            SkipReason::Dead          => "dead",
            SkipReason::Inactive      => "inactive",
            SkipReason::Throttled     => "throttled",
            SkipReason::NoTemplate    => "no template",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one call to [`Scheduler::tick`][crate::Scheduler::tick] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:      Tick,
    /// `false` when the update interval had not yet elapsed.
    pub fired:     bool,
    pub evaluated: usize,
    /// Skipped for any reason other than throttling.
    pub skipped:   usize,
    pub throttled: usize,
    /// Entries dropped for invalid handles.
    pub removed:   usize,
}

impl TickReport {
    pub(crate) fn idle(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// Agents selected this tick.
    pub fn selected(&self) -> usize {
        self.evaluated + self.skipped + self.throttled
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.fired {
            return write!(f, "{}: idle", self.tick);
        }
        write!(
            f,
            "{}: evaluated={} skipped={} throttled={} removed={}",
            self.tick, self.evaluated, self.skipped, self.throttled, self.removed
        )
    }
}

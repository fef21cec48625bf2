//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter supplied by whoever owns
//! the simulation loop.  Every duration in the decision core (update
//! interval, decision debounce, action cooldowns, plan-step durations) is a
//! whole number of ticks, so cooldown and debounce comparisons are exact and
//! never drift the way accumulated floating-point seconds would.
//!
//! The core never advances time on its own: `Scheduler::tick(now)` is handed
//! the current tick and derives elapsed counters from it.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A point on the simulation clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `n` ticks later.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    ///
    /// Callers may hand the scheduler a tick that is older than the last one
    /// it saw (e.g. after a rewind in a test harness); that reads as "no time
    /// has passed" rather than underflowing.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` if fewer than `window` ticks have passed since `earlier`.
    ///
    /// `None` (never happened) is never within any window.
    #[inline]
    pub fn within(self, earlier: Option<Tick>, window: u64) -> bool {
        earlier.is_some_and(|e| self.since(e) < window)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

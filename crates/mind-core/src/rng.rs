//! Seeded random streams for agents and for the world.
//!
//! Every registered agent owns an [`AgentRng`] seeded from the run seed and
//! its id:
//!
//!   seed = global_seed XOR (agent_id * GOLDEN)
//!
//! `GOLDEN` is the 64-bit fractional part of the golden ratio, so adjacent
//! ids land far apart in seed space.  Because the stream lives in the
//! agent's scheduler slot, other agents joining or leaving never shift it,
//! and a fixed seed plus a fixed tick sequence replays every random gate.
//!
//! [`SimRng`] is the same thing for code that belongs to no agent (weather
//! rolls, spawn placement).

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

/// Draws shared by both stream types.
macro_rules! draws {
    ($name:ident) => {
        impl $name {
            /// A `Standard`-distributed value (`f32` in [0, 1), any integer, ...).
            #[inline]
            pub fn random<T>(&mut self) -> T
            where
                Standard: Distribution<T>,
            {
                self.0.r#gen()
            }

            #[inline]
            pub fn gen_range<T, R>(&mut self, range: R) -> T
            where
                T: SampleUniform,
                R: SampleRange<T>,
            {
                self.0.gen_range(range)
            }

            /// `true` with probability `p`.  Out-of-range `p` is clamped and
            /// NaN never fires.
            #[inline]
            pub fn gen_bool(&mut self, p: f64) -> bool {
                if p.is_nan() {
                    return false;
                }
                self.0.gen_bool(p.clamp(0.0, 1.0))
            }
        }
    };
}

/// Per-agent stream, stored in the agent's scheduler slot.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        AgentRng(SmallRng::seed_from_u64(global_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN)))
    }
}

draws!(AgentRng);

/// World-level stream.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream, so one subsystem's draws do not
    /// shift another's.
    pub fn child(&mut self, salt: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ salt.wrapping_mul(GOLDEN);
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

draws!(SimRng);

//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Every operation that
//! depends on time (`request`, `tick`, queue eviction) takes `now: Tick`
//! explicitly; there is no ambient clock inside the core.  The threaded
//! runtime in `cs-sim` maps wall time to ticks using
//! [`SimConfig::tick_duration_millis`].
//!
//! Integer ticks keep wait-time arithmetic exact: "waited longer than
//! `max_wait`" is a plain `>` on `u64`.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built by the application crate (or deserialized with the
/// `serde` feature) and handed to the `cs-sim` runtime.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Wall-clock milliseconds one tick lasts in the threaded runtime.
    pub tick_duration_millis: u64,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces the same fleet.
    pub seed: u64,
}

impl SimConfig {
    /// The first tick that is *not* simulated.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    #[inline]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_millis)
    }

    /// Reject configurations the runtime cannot drive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_millis == 0 {
            return Err(CoreError::Config("tick_duration_millis must be > 0".into()));
        }
        if self.total_ticks == 0 {
            return Err(CoreError::Config("total_ticks must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_millis: 10,
            total_ticks:          1_000,
            seed:                 0,
        }
    }
}

//! Where `now` comes from.
//!
//! The station engine never reads a clock itself; the runtime asks a
//! [`Clock`] and passes the answer in.  [`WallClock`] maps elapsed real time
//! to ticks for live runs, [`ManualClock`] is advanced explicitly for
//! deterministic runs and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use cs_core::{SimConfig, Tick};

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Tick;
}

// ── WallClock ─────────────────────────────────────────────────────────────────

/// Tick `n` covers wall time `[n * tick_duration, (n + 1) * tick_duration)`
/// since construction.
#[derive(Copy, Clone, Debug)]
pub struct WallClock {
    start:         Instant,
    tick_duration: Duration,
}

impl WallClock {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_tick_duration(config.tick_duration())
    }

    /// A zero duration is treated as one nanosecond.
    pub fn with_tick_duration(tick_duration: Duration) -> Self {
        Self { start: Instant::now(), tick_duration }
    }

    #[inline]
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}

impl Clock for WallClock {
    fn now(&self) -> Tick {
        let per_tick = self.tick_duration.as_nanos().max(1);
        let ticks = self.start.elapsed().as_nanos() / per_tick;
        Tick(u64::try_from(ticks).unwrap_or(u64::MAX))
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A shared counter.  Clones observe and advance the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    tick: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self { tick: Arc::new(AtomicU64::new(start.0)) }
    }

    /// Move forward `n` ticks and return the new time.
    pub fn advance(&self, n: u64) -> Tick {
        Tick(self.tick.fetch_add(n, Ordering::AcqRel) + n)
    }

    pub fn set(&self, now: Tick) {
        self.tick.store(now.0, Ordering::Release);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Tick {
        Tick(self.tick.load(Ordering::Acquire))
    }
}

//! `Ticker` — the background thread that drives one station's clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cs_core::{StationId, Tick};
use cs_station::Departure;

use crate::{Clock, SimError, SimResult, StationHandle, StationObserver};

/// Calls [`StationHandle::tick`] for every tick the clock has passed,
/// sleeping `interval` between polls.
///
/// If the clock jumps several ticks between polls, the missed ticks are
/// processed one by one in order, so charging always happens once per tick.
/// Ticks another caller already processed are not reported to the observer.
/// The thread owns its observer and hands it back from [`Ticker::stop`] or
/// [`Ticker::shutdown`].
pub struct Ticker<O> {
    station: StationId,
    handle:  StationHandle,
    stop:    Arc<AtomicBool>,
    join:    JoinHandle<O>,
}

impl<O: StationObserver + Send + 'static> Ticker<O> {
    pub fn spawn<C: Clock>(
        handle:       StationHandle,
        clock:        C,
        interval:     Duration,
        mut observer: O,
    ) -> SimResult<Self> {
        let station = handle.id();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let ticked = handle.clone();

        let join = thread::Builder::new()
            .name(format!("ticker-{}", station.0))
            .spawn(move || {
                let mut last: Option<Tick> = None;
                while !flag.load(Ordering::Acquire) {
                    let now = clock.now();
                    let from = last.map_or(now, |l| l.offset(1));
                    for t in from.0..=now.0 {
                        let report = ticked.tick(Tick(t));
                        if report.applied {
                            observer.on_tick(station, &report);
                        }
                    }
                    if last.is_none_or(|l| now > l) {
                        last = Some(now);
                    }
                    thread::sleep(interval);
                }
                tracing::debug!(%station, last = ?last, "ticker stopped");
                observer
            })
            .map_err(|source| SimError::Spawn { what: format!("ticker for {station}"), source })?;

        Ok(Self { station, handle, stop, join })
    }

    #[inline]
    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Stop after the current poll and return the observer.
    pub fn stop(self) -> SimResult<O> {
        self.stop.store(true, Ordering::Release);
        self.join
            .join()
            .map_err(|_| SimError::WorkerPanicked(format!("ticker for {}", self.station)))
    }

    /// Stop ticking, shut the station down at `now` and report the
    /// departures to the observer before handing it back.
    pub fn shutdown(self, now: Tick) -> SimResult<(O, Vec<Departure>)> {
        let station = self.station;
        let handle = self.handle.clone();
        let mut observer = self.stop()?;
        let departures = handle.shutdown(now);
        observer.on_shutdown(station, &departures);
        Ok((observer, departures))
    }
}

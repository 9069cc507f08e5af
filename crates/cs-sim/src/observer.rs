//! Station observer trait for progress reporting and data collection.

use cs_core::StationId;
use cs_station::{Departure, TickReport};

/// Callbacks invoked by a [`Ticker`](crate::Ticker) (or by
/// [`StationSet::tick_all`](crate::StationSet::tick_all) callers) after each
/// station tick, and by [`Ticker::shutdown`](crate::Ticker::shutdown) when the
/// station closes.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Completed(usize);
///
/// impl StationObserver for Completed {
///     fn on_tick(&mut self, _station: StationId, report: &TickReport) {
///         self.0 += report.completed.len();
///     }
/// }
/// ```
pub trait StationObserver {
    /// Called after every applied tick.
    fn on_tick(&mut self, _station: StationId, _report: &TickReport) {}

    /// Called when the station is shut down with the vehicles it sent away.
    fn on_shutdown(&mut self, _station: StationId, _departures: &[Departure]) {}
}

/// A [`StationObserver`] that does nothing.
pub struct NoopObserver;

impl StationObserver for NoopObserver {}

/// Logs every non-quiet tick through `tracing` and keeps running totals.
#[derive(Clone, Debug, Default)]
pub struct TracingObserver {
    pub ticks:     u64,
    pub completed: u64,
    pub evicted:   u64,
    pub dispensed: f64,
}

impl StationObserver for TracingObserver {
    fn on_tick(&mut self, station: StationId, report: &TickReport) {
        if !report.applied {
            return;
        }
        self.ticks += 1;
        self.completed += report.completed.len() as u64;
        self.evicted += report.evicted.len() as u64;
        self.dispensed += report.dispensed.gas + report.dispensed.electric;

        if !report.is_quiet() {
            tracing::info!(
                %station,
                now = %report.now,
                promoted = report.promoted.len(),
                completed = report.completed.len(),
                evicted = report.evicted.len(),
                "station tick"
            );
        }
        for kind in &report.exhausted {
            tracing::warn!(%station, %kind, now = %report.now, "occupants stalled on empty reserve");
        }
    }

    fn on_shutdown(&mut self, station: StationId, departures: &[Departure]) {
        tracing::info!(%station, sent_away = departures.len(), "station shut down");
    }
}

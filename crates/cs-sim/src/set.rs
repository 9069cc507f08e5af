//! `StationSet` — every station of a run, addressable by id.

use std::time::Duration;

use cs_core::{FuelKind, StationId, Tick};
use cs_station::{Departure, IdMap, Station, StationConfig, TickReport};

use crate::{Clock, SimError, SimResult, StationHandle, StationObserver, Ticker};

#[derive(Debug, Default)]
pub struct StationSet {
    handles: Vec<StationHandle>,
    index:   IdMap<StationId, usize>,
}

impl StationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every station; the first construction error aborts.
    pub fn from_configs(configs: impl IntoIterator<Item = StationConfig>) -> SimResult<Self> {
        let mut set = Self::new();
        for config in configs {
            set.insert(Station::new(config)?)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, station: Station) -> SimResult<StationHandle> {
        let id = station.id();
        if self.index.contains_key(&id) {
            return Err(SimError::DuplicateStation(id));
        }
        let handle = StationHandle::new(station);
        self.index.insert(id, self.handles.len());
        self.handles.push(handle.clone());
        Ok(handle)
    }

    pub fn get(&self, id: StationId) -> SimResult<&StationHandle> {
        self.index
            .get(&id)
            .map(|&i| &self.handles[i])
            .ok_or(SimError::UnknownStation(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StationHandle> + '_ {
        self.handles.iter()
    }

    /// The station with the shortest estimated wait for `kind`, ties going
    /// to the earlier-inserted station.  `None` if no station serves `kind`.
    pub fn best_for(&self, kind: FuelKind) -> Option<&StationHandle> {
        self.handles
            .iter()
            .filter_map(|h| h.estimated_wait_ticks(kind).map(|w| (w, h)))
            .min_by_key(|(w, _)| *w)
            .map(|(_, h)| h)
    }

    /// Tick every station once, returning reports in insertion order.
    ///
    /// With the `parallel` feature stations are ticked on Rayon's pool.
    pub fn tick_all(&self, now: Tick) -> Vec<(StationId, TickReport)> {
        #[cfg(not(feature = "parallel"))]
        {
            self.handles.iter().map(|h| (h.id(), h.tick(now))).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.handles.par_iter().map(|h| (h.id(), h.tick(now))).collect()
        }
    }

    /// One [`Ticker`] per station, each with its own observer from
    /// `make_observer`.
    pub fn spawn_tickers<C, O>(
        &self,
        clock:             &C,
        interval:          Duration,
        mut make_observer: impl FnMut(StationId) -> O,
    ) -> SimResult<Vec<Ticker<O>>>
    where
        C: Clock + Clone,
        O: StationObserver + Send + 'static,
    {
        self.handles
            .iter()
            .map(|h| Ticker::spawn(h.clone(), clock.clone(), interval, make_observer(h.id())))
            .collect()
    }

    /// Shut every station down and return all departures.
    ///
    /// No observer sees these; stations driven by a [`Ticker`] close through
    /// [`Ticker::shutdown`] instead.
    pub fn shutdown_all(&self, now: Tick) -> Vec<Departure> {
        self.handles.iter().flat_map(|h| h.shutdown(now)).collect()
    }
}

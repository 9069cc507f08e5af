//! `WaitQueue` — vehicles waiting for a slot, priority first, then FIFO.
//!
//! # Ordering
//!
//! The queue is always partitioned: every priority entry precedes every
//! non-priority entry, and each class is in arrival order.  Enqueue keeps the
//! partition with a single `partition_point` search:
//!
//! ```text
//!   [ P P P | N N N N ]
//!           ^ priority vehicles insert here, others append at the end
//! ```
//!
//! Priority is read once, at enqueue time.  Entries never move between
//! classes while queued.
//!
//! A membership set makes duplicate detection O(1); a vehicle appears at
//! most once.

use std::collections::VecDeque;

use cs_core::{FuelKind, Tick, VehicleId};
use cs_vehicle::Vehicle;

use crate::IdSet;

/// One queued vehicle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    pub vehicle:     VehicleId,
    pub kind:        FuelKind,
    pub priority:    bool,
    pub enqueued_at: Tick,
    /// The vehicle's own acceptable wait, copied at enqueue time.
    pub max_wait:    u64,
}

impl QueueEntry {
    /// Ticks spent in the queue as of `now`.
    #[inline]
    pub fn waited(&self, now: Tick) -> u64 {
        now.since(self.enqueued_at)
    }

    /// The wait limit actually applied: the vehicle's own limit, capped by
    /// the station's ceiling when there is one.
    #[inline]
    pub fn limit(&self, ceiling: Option<u64>) -> u64 {
        ceiling.map_or(self.max_wait, |c| c.min(self.max_wait))
    }

    /// `true` once the entry has waited strictly longer than its limit.
    #[inline]
    pub fn is_stale(&self, now: Tick, ceiling: Option<u64>) -> bool {
        self.waited(now) > self.limit(ceiling)
    }
}

#[derive(Debug, Default)]
pub struct WaitQueue {
    entries: VecDeque<QueueEntry>,
    members: IdSet<VehicleId>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `vehicle` as of `now` and return its 0-based position.
    ///
    /// Returns `None` (and changes nothing) if the vehicle is already queued.
    pub fn enqueue(&mut self, vehicle: &Vehicle, now: Tick) -> Option<usize> {
        if !self.members.insert(vehicle.id()) {
            return None;
        }
        let entry = QueueEntry {
            vehicle:     vehicle.id(),
            kind:        vehicle.kind(),
            priority:    vehicle.is_priority(),
            enqueued_at: now,
            max_wait:    vehicle.max_wait(),
        };
        let pos = if entry.priority {
            self.entries.partition_point(|e| e.priority)
        } else {
            self.entries.len()
        };
        self.entries.insert(pos, entry);
        Some(pos)
    }

    /// Remove and return every entry with `now - enqueued_at` greater than
    /// its limit (see [`QueueEntry::limit`]).  Survivors keep their order.
    pub fn evict_stale(&mut self, now: Tick, ceiling: Option<u64>) -> Vec<QueueEntry> {
        self.take_where(usize::MAX, |e| e.is_stale(now, ceiling))
    }

    /// Remove and return the first `n` entries in queue order.
    pub fn dequeue_up_to(&mut self, n: usize) -> Vec<QueueEntry> {
        let n = n.min(self.entries.len());
        let taken: Vec<QueueEntry> = self.entries.drain(..n).collect();
        for e in &taken {
            self.members.remove(&e.vehicle);
        }
        taken
    }

    /// Remove and return the first `n` entries of `kind` in queue order.
    /// Entries of other kinds keep their positions.
    pub fn dequeue_kind_up_to(&mut self, kind: FuelKind, n: usize) -> Vec<QueueEntry> {
        self.take_where(n, |e| e.kind == kind)
    }

    /// Put back an entry whose promotion failed, at the head of its priority
    /// class.  Returns `false` if the vehicle is already queued.
    pub fn restore(&mut self, entry: QueueEntry) -> bool {
        if !self.members.insert(entry.vehicle) {
            return false;
        }
        let pos = if entry.priority {
            0
        } else {
            self.entries.partition_point(|e| e.priority)
        };
        self.entries.insert(pos, entry);
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, vehicle: VehicleId) -> bool {
        self.members.contains(&vehicle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, vehicle: VehicleId) -> Option<usize> {
        if !self.contains(vehicle) {
            return None;
        }
        self.entries.iter().position(|e| e.vehicle == vehicle)
    }

    pub fn count_kind(&self, kind: FuelKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.entries.iter()
    }

    /// `true` if no non-priority entry precedes a priority entry.
    pub(crate) fn is_partitioned(&self) -> bool {
        let boundary = self.entries.partition_point(|e| e.priority);
        self.entries.iter().skip(boundary).all(|e| !e.priority)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Remove up to `limit` entries matching `pred`, preserving the relative
    /// order of both the removed and the remaining entries.
    fn take_where(&mut self, limit: usize, mut pred: impl FnMut(&QueueEntry) -> bool) -> Vec<QueueEntry> {
        let mut taken = Vec::new();
        if limit == 0 {
            return taken;
        }
        let mut kept = VecDeque::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if taken.len() < limit && pred(&entry) {
                taken.push(entry);
            } else {
                kept.push_back(entry);
            }
        }
        self.entries = kept;
        for e in &taken {
            self.members.remove(&e.vehicle);
        }
        taken
    }
}

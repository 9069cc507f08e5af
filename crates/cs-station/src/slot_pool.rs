//! `SlotPool` — the fixed set of charging positions at one station.
//!
//! Slots are grouped by fuel kind; each kind has a fixed-size ordered array
//! and a claim always takes the lowest free index.  A station-wide occupant
//! index guarantees that a vehicle sits in at most one slot across *all*
//! kinds.
//!
//! The pool itself has no lock.  It is only reachable through `&mut
//! Station`, and the runtime hands out `&mut Station` under the station's
//! single mutex, so concurrent `try_acquire` callers are serialized there:
//! exactly one caller can observe a given slot as free.

use cs_core::{FuelKind, PerKind, SlotIndex, VehicleId};
use cs_vehicle::Vehicle;

use crate::IdMap;

/// Address of one slot: its kind and its index within that kind's array.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SlotHandle {
    pub kind:  FuelKind,
    pub index: SlotIndex,
}

impl std::fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.index.0)
    }
}

#[derive(Debug)]
pub struct SlotPool {
    slots:     PerKind<Vec<Option<VehicleId>>>,
    occupied:  PerKind<usize>,
    occupants: IdMap<VehicleId, SlotHandle>,
}

impl SlotPool {
    /// A pool with `capacity[kind]` empty slots per kind.
    pub fn new(capacity: PerKind<u16>) -> Self {
        Self {
            slots:     capacity.map(|_, n| vec![None; n as usize]),
            occupied:  PerKind::default(),
            occupants: IdMap::default(),
        }
    }

    /// Claim the first free slot of `vehicle`'s kind.
    ///
    /// Returns `None` if every slot of that kind is taken, or if the vehicle
    /// already holds a slot anywhere in the pool.
    pub fn try_acquire(&mut self, vehicle: &Vehicle) -> Option<SlotHandle> {
        let id = vehicle.id();
        if self.occupants.contains_key(&id) {
            return None;
        }
        let kind = vehicle.kind();
        let pos = self.slots[kind].iter().position(Option::is_none)?;
        self.slots[kind][pos] = Some(id);
        self.occupied[kind] += 1;

        // Capacity came from a u16, so every index fits.
        let handle = SlotHandle { kind, index: SlotIndex(pos as u16) };
        self.occupants.insert(id, handle);
        Some(handle)
    }

    /// Free the slot held by `vehicle`.
    ///
    /// Idempotent: releasing a vehicle that holds no slot changes nothing and
    /// returns `None`.
    pub fn release(&mut self, vehicle: VehicleId) -> Option<SlotHandle> {
        let handle = self.occupants.remove(&vehicle)?;
        self.slots[handle.kind][handle.index.index()] = None;
        self.occupied[handle.kind] -= 1;
        Some(handle)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn occupant_of(&self, kind: FuelKind, index: SlotIndex) -> Option<VehicleId> {
        self.slots[kind].get(index.index()).copied().flatten()
    }

    /// `true` when no slot of `kind` is free (including kinds with 0 slots).
    #[inline]
    pub fn is_full(&self, kind: FuelKind) -> bool {
        self.free_count(kind) == 0
    }

    #[inline]
    pub fn free_count(&self, kind: FuelKind) -> usize {
        self.capacity(kind) - self.occupied[kind]
    }

    #[inline]
    pub fn capacity(&self, kind: FuelKind) -> usize {
        self.slots[kind].len()
    }

    #[inline]
    pub fn occupied_count(&self, kind: FuelKind) -> usize {
        self.occupied[kind]
    }

    #[inline]
    pub fn contains(&self, vehicle: VehicleId) -> bool {
        self.occupants.contains_key(&vehicle)
    }

    /// Every occupied slot, gas first, then by ascending index.
    pub fn occupied(&self) -> Vec<(SlotHandle, VehicleId)> {
        let mut out = Vec::with_capacity(self.occupants.len());
        for (kind, slots) in self.slots.iter() {
            for (i, slot) in slots.iter().enumerate() {
                if let Some(id) = slot {
                    out.push((SlotHandle { kind, index: SlotIndex(i as u16) }, *id));
                }
            }
        }
        out
    }

    /// Cross-check the slot arrays against the occupant index.
    pub(crate) fn check(&self) -> Result<(), String> {
        let mut seen = 0;
        for (kind, slots) in self.slots.iter() {
            let count = slots.iter().filter(|s| s.is_some()).count();
            if count != self.occupied[kind] {
                return Err(format!(
                    "{kind}: {count} occupied slots but counter says {}",
                    self.occupied[kind]
                ));
            }
            seen += count;
        }
        if seen != self.occupants.len() {
            return Err(format!(
                "{seen} occupied slots but {} indexed occupants (vehicle in two slots?)",
                self.occupants.len()
            ));
        }
        for (id, handle) in &self.occupants {
            if self.occupant_of(handle.kind, handle.index) != Some(*id) {
                return Err(format!("{id} indexed at {handle} but slot holds someone else"));
            }
        }
        Ok(())
    }
}

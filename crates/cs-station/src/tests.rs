//! Unit tests for cs-station.

use cs_core::{FuelKind, GeoPoint, SlotIndex, StationId, Tick, VehicleId};
use cs_vehicle::{DepartureReason, Vehicle, VehicleBuilder, VehicleState};

use crate::{
    ChargeOutcome, ConstructionError, RejectReason, RequestOutcome, ResourceAccount, SlotPool,
    Station, StationBuilder, StationError, WaitQueue,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn car(id: u32, kind: FuelKind, capacity: f64, level: f64) -> Vehicle {
    VehicleBuilder::new(VehicleId(id), kind, capacity).level(level).build().unwrap()
}

fn waiter(id: u32, kind: FuelKind, max_wait: u64, priority: bool) -> Vehicle {
    VehicleBuilder::new(VehicleId(id), kind, 50.0)
        .max_wait(max_wait)
        .priority(priority)
        .build()
        .unwrap()
}

/// One gas slot (5/tick) and one electric slot (2/tick), deep reserves.
fn one_each() -> Station {
    StationBuilder::new(StationId(1))
        .fuel(FuelKind::Gas, 1, 5.0, 1_000.0)
        .fuel(FuelKind::Electric, 1, 2.0, 1_000.0)
        .build()
        .unwrap()
}

fn gas_only(slots: i32) -> Station {
    StationBuilder::new(StationId(2))
        .fuel(FuelKind::Gas, slots, 5.0, 1_000.0)
        .build()
        .unwrap()
}

fn ids(queue: &WaitQueue) -> Vec<u32> {
    queue.iter().map(|e| e.vehicle.0).collect()
}

// ── SlotPool ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slot_pool {
    use cs_core::PerKind;

    use super::*;

    fn pool() -> SlotPool {
        SlotPool::new(PerKind::new(2, 1))
    }

    #[test]
    fn acquire_takes_lowest_free_index() {
        let mut p = pool();
        let a = p.try_acquire(&car(1, FuelKind::Gas, 10.0, 0.0)).unwrap();
        let b = p.try_acquire(&car(2, FuelKind::Gas, 10.0, 0.0)).unwrap();
        assert_eq!(a.index, SlotIndex(0));
        assert_eq!(b.index, SlotIndex(1));
        assert!(p.is_full(FuelKind::Gas));
        assert!(p.try_acquire(&car(3, FuelKind::Gas, 10.0, 0.0)).is_none());
        // Other kind unaffected.
        assert_eq!(p.free_count(FuelKind::Electric), 1);

        p.release(VehicleId(1));
        let c = p.try_acquire(&car(3, FuelKind::Gas, 10.0, 0.0)).unwrap();
        assert_eq!(c.index, SlotIndex(0));
        assert_eq!(p.occupant_of(FuelKind::Gas, SlotIndex(0)), Some(VehicleId(3)));
    }

    #[test]
    fn vehicle_never_holds_two_slots() {
        let mut p = pool();
        let v = car(1, FuelKind::Gas, 10.0, 0.0);
        assert!(p.try_acquire(&v).is_some());
        assert!(p.try_acquire(&v).is_none());
        assert_eq!(p.occupied_count(FuelKind::Gas), 1);
        assert!(p.check().is_ok());
    }

    #[test]
    fn release_is_idempotent() {
        let mut p = pool();
        p.try_acquire(&car(1, FuelKind::Gas, 10.0, 0.0));
        p.try_acquire(&car(2, FuelKind::Electric, 10.0, 0.0));

        assert!(p.release(VehicleId(1)).is_some());
        let once = (p.occupied(), p.free_count(FuelKind::Gas), p.free_count(FuelKind::Electric));
        assert!(p.release(VehicleId(1)).is_none());
        let twice = (p.occupied(), p.free_count(FuelKind::Gas), p.free_count(FuelKind::Electric));
        assert_eq!(once, twice);
        assert!(p.check().is_ok());
    }

    #[test]
    fn zero_capacity_kind_is_always_full() {
        let mut p = SlotPool::new(PerKind::new(1, 0));
        assert!(p.is_full(FuelKind::Electric));
        assert!(p.try_acquire(&car(1, FuelKind::Electric, 10.0, 0.0)).is_none());
        assert!(p.occupant_of(FuelKind::Electric, SlotIndex(0)).is_none());
    }
}

// ── WaitQueue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait_queue {
    use super::*;

    #[test]
    fn priority_first_then_fifo() {
        // A (priority, t=0), B (regular, t=1), C (priority, t=2) → [A, C, B].
        let mut q = WaitQueue::new();
        assert_eq!(q.enqueue(&waiter(0xA, FuelKind::Gas, 100, true), Tick(0)), Some(0));
        assert_eq!(q.enqueue(&waiter(0xB, FuelKind::Gas, 100, false), Tick(1)), Some(1));
        assert_eq!(q.enqueue(&waiter(0xC, FuelKind::Gas, 100, true), Tick(2)), Some(1));
        assert_eq!(ids(&q), vec![0xA, 0xC, 0xB]);
        assert!(q.is_partitioned());
    }

    #[test]
    fn duplicate_enqueue_is_ignored() {
        let mut q = WaitQueue::new();
        let v = waiter(1, FuelKind::Gas, 100, false);
        assert!(q.enqueue(&v, Tick(0)).is_some());
        assert!(q.enqueue(&v, Tick(3)).is_none());
        assert_eq!(q.len(), 1);
        assert_eq!(q.iter().next().unwrap().enqueued_at, Tick(0));
    }

    #[test]
    fn eviction_is_strictly_after_max_wait() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 10, false), Tick(0));
        assert!(q.evict_stale(Tick(10), None).is_empty());
        let evicted = q.evict_stale(Tick(11), None);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].vehicle, VehicleId(1));
        assert!(q.is_empty());
        assert!(!q.contains(VehicleId(1)));
    }

    #[test]
    fn ceiling_caps_vehicle_limit() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(2, FuelKind::Gas, 2, false), Tick(0));
        // Vehicle 2's own limit is tighter than the ceiling.
        assert_eq!(q.evict_stale(Tick(3), Some(5)).len(), 1);
        assert_eq!(ids(&q), vec![1]);
        assert!(q.evict_stale(Tick(5), Some(5)).is_empty());
        assert_eq!(q.evict_stale(Tick(6), Some(5)).len(), 1);
    }

    #[test]
    fn eviction_keeps_survivor_order() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(2, FuelKind::Gas, 1, false), Tick(0));
        q.enqueue(&waiter(3, FuelKind::Gas, 100, false), Tick(0));
        q.evict_stale(Tick(2), None);
        assert_eq!(ids(&q), vec![1, 3]);
    }

    #[test]
    fn dequeue_kind_leaves_other_kinds_in_place() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(2, FuelKind::Electric, 100, false), Tick(0));
        q.enqueue(&waiter(3, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(4, FuelKind::Electric, 100, false), Tick(0));

        let taken = q.dequeue_kind_up_to(FuelKind::Electric, 1);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].vehicle, VehicleId(2));
        assert_eq!(ids(&q), vec![1, 3, 4]);
        assert_eq!(q.count_kind(FuelKind::Electric), 1);
        assert!(q.dequeue_kind_up_to(FuelKind::Gas, 0).is_empty());
    }

    #[test]
    fn dequeue_up_to_caps_at_len() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(2, FuelKind::Gas, 100, false), Tick(0));
        assert_eq!(q.dequeue_up_to(5).len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn restore_returns_to_head_of_class() {
        let mut q = WaitQueue::new();
        q.enqueue(&waiter(1, FuelKind::Gas, 100, true), Tick(0));
        q.enqueue(&waiter(2, FuelKind::Gas, 100, false), Tick(0));
        q.enqueue(&waiter(3, FuelKind::Gas, 100, false), Tick(0));

        let regular = q.dequeue_kind_up_to(FuelKind::Gas, 3).pop().unwrap();
        assert_eq!(regular.vehicle, VehicleId(3));
        assert!(q.is_empty());

        q.enqueue(&waiter(4, FuelKind::Gas, 100, true), Tick(1));
        q.enqueue(&waiter(5, FuelKind::Gas, 100, false), Tick(1));
        assert!(q.restore(regular.clone()));
        assert!(!q.restore(regular));
        assert_eq!(ids(&q), vec![4, 3, 5]);
        assert_eq!(q.position(VehicleId(3)), Some(1));
    }
}

// ── ResourceAccount ───────────────────────────────────────────────────────────

#[cfg(test)]
mod account {
    use super::*;

    #[test]
    fn transfer_is_min_of_output_missing_reserve() {
        let mut acc = ResourceAccount::new(FuelKind::Gas, 10.0, 4.0, 0.0);
        let mut v = car(1, FuelKind::Gas, 20.0, 14.0);

        assert_eq!(acc.charge_tick(&mut v), ChargeOutcome::Transferred(4.0));
        assert_eq!(acc.reserve(), 6.0);
        // Missing 2: exact fill.
        assert_eq!(acc.charge_tick(&mut v), ChargeOutcome::Transferred(2.0));
        assert_eq!(v.level(), v.capacity());
        assert_eq!(acc.charge_tick(&mut v), ChargeOutcome::AlreadyFull);
        assert_eq!(acc.reserve(), 4.0);
        assert_eq!(acc.dispensed(), 6.0);
    }

    #[test]
    fn exhausted_reserve_never_goes_negative() {
        let mut acc = ResourceAccount::new(FuelKind::Electric, 3.0, 5.0, 0.0);
        let mut v = car(1, FuelKind::Electric, 10.0, 0.0);

        assert_eq!(acc.charge_tick(&mut v).amount(), 3.0);
        assert_eq!(acc.reserve(), 0.0);
        assert_eq!(acc.charge_tick(&mut v), ChargeOutcome::Exhausted);
        assert_eq!(v.level(), 3.0);
        assert!(acc.reserve() >= 0.0);
    }

    #[test]
    fn zero_output_dispenses_nothing() {
        let mut acc = ResourceAccount::new(FuelKind::Gas, 10.0, 0.0, 0.0);
        let mut v = car(1, FuelKind::Gas, 10.0, 0.0);
        assert_eq!(acc.charge_tick(&mut v), ChargeOutcome::NoOutput);
        assert_eq!(acc.reserve(), 10.0);
    }

    #[test]
    fn replenish_adds_rate() {
        let mut acc = ResourceAccount::new(FuelKind::Gas, 1.0, 5.0, 2.5);
        assert_eq!(acc.replenish(), 2.5);
        assert_eq!(acc.reserve(), 3.5);
        assert_eq!(acc.replenished(), 2.5);
    }

    #[test]
    fn set_reserve_validates() {
        let mut acc = ResourceAccount::new(FuelKind::Gas, 1.0, 5.0, 0.0);
        assert!(acc.set_reserve(40.0).is_ok());
        assert_eq!(acc.reserve(), 40.0);
        assert!(matches!(acc.set_reserve(-1.0), Err(StationError::InvalidReserve { .. })));
        assert!(acc.set_reserve(f64::NAN).is_err());
        assert_eq!(acc.reserve(), 40.0);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn no_slots_rejected() {
        let err = StationBuilder::new(StationId(0)).build().unwrap_err();
        assert_eq!(err, ConstructionError::NoSlots);
    }

    #[test]
    fn output_for_zero_slot_kind_rejected() {
        let err = StationBuilder::new(StationId(0))
            .fuel(FuelKind::Gas, 0, 5.0, 0.0)
            .fuel(FuelKind::Electric, 2, 1.0, 10.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::ResourceWithoutSlots { kind: FuelKind::Gas, field: "output_per_tick", .. }
        ));
    }

    #[test]
    fn reserve_and_replenish_for_zero_slot_kind_rejected() {
        let reserve = StationBuilder::new(StationId(0))
            .fuel(FuelKind::Gas, 1, 1.0, 1.0)
            .fuel(FuelKind::Electric, 0, 0.0, 10.0)
            .build();
        assert!(matches!(reserve, Err(ConstructionError::ResourceWithoutSlots { .. })));

        let replenish = StationBuilder::new(StationId(0))
            .fuel(FuelKind::Gas, 1, 1.0, 1.0)
            .replenish(FuelKind::Electric, 1.0)
            .build();
        assert!(matches!(replenish, Err(ConstructionError::ResourceWithoutSlots { .. })));
    }

    #[test]
    fn negative_values_rejected() {
        let slots = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, -1, 1.0, 1.0).build();
        assert!(matches!(slots, Err(ConstructionError::NegativeSlots { count: -1, .. })));

        let output = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, 1, -1.0, 1.0).build();
        assert!(matches!(output, Err(ConstructionError::NegativeOutput { .. })));

        let reserve = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, 1, 1.0, -1.0).build();
        assert!(matches!(reserve, Err(ConstructionError::NegativeReserve { .. })));

        let replenish = StationBuilder::new(StationId(0))
            .fuel(FuelKind::Gas, 1, 1.0, 1.0)
            .replenish(FuelKind::Gas, -0.5)
            .build();
        assert!(matches!(replenish, Err(ConstructionError::NegativeReplenish { .. })));
    }

    #[test]
    fn non_finite_and_oversized_rejected() {
        let nan = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, 1, f64::NAN, 1.0).build();
        assert!(matches!(nan, Err(ConstructionError::NonFinite { field: "output_per_tick", .. })));

        let inf = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, 1, 1.0, f64::INFINITY).build();
        assert!(matches!(inf, Err(ConstructionError::NonFinite { field: "reserve", .. })));

        let huge = StationBuilder::new(StationId(0)).fuel(FuelKind::Gas, 70_000, 1.0, 1.0).build();
        assert!(matches!(huge, Err(ConstructionError::TooManySlots { .. })));
    }

    #[test]
    fn no_storage_and_no_replenishment_rejected() {
        let err = StationBuilder::new(StationId(9))
            .fuel(FuelKind::Gas, 2, 5.0, 0.0)
            .fuel(FuelKind::Electric, 2, 5.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::NoResource);

        // Either a reserve or a replenish rate on one kind is enough.
        let stocked = StationBuilder::new(StationId(9))
            .fuel(FuelKind::Gas, 2, 5.0, 0.0)
            .fuel(FuelKind::Electric, 2, 5.0, 1.0)
            .build();
        assert!(stocked.is_ok());
        let refilled = StationBuilder::new(StationId(9))
            .fuel(FuelKind::Gas, 2, 5.0, 0.0)
            .replenish(FuelKind::Gas, 1.0)
            .build();
        assert!(refilled.is_ok());
    }

    #[test]
    fn location_out_of_range_rejected() {
        let err = StationBuilder::new(StationId(0))
            .location(GeoPoint::new(91.0, 0.0))
            .fuel(FuelKind::Gas, 1, 1.0, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidLocation(_)));
    }

    #[test]
    fn valid_single_kind_station() {
        let s = StationBuilder::new(StationId(7))
            .location(GeoPoint::new(52.52, 13.405))
            .fuel(FuelKind::Electric, 3, 1.5, 0.0)
            .replenish(FuelKind::Electric, 0.5)
            .wait_ceiling(30)
            .build()
            .unwrap();
        assert_eq!(s.id(), StationId(7));
        assert_eq!(s.slot_count(FuelKind::Electric), 3);
        assert_eq!(s.slot_count(FuelKind::Gas), 0);
        assert_eq!(s.wait_ceiling(), Some(30));
        assert_eq!(s.queue_length(), 0);
        assert!(s.check_invariants().is_ok());
    }
}

// ── Station: request ──────────────────────────────────────────────────────────

#[cfg(test)]
mod request {
    use super::*;

    #[test]
    fn accepts_then_queues() {
        let mut s = one_each();
        let first = s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));
        assert!(matches!(first, RequestOutcome::Accepted(h) if h.kind == FuelKind::Gas));
        assert_eq!(s.state_of(VehicleId(1)), Some(VehicleState::Charging));
        assert_eq!(s.vehicle(VehicleId(1)).unwrap().station(), Some(StationId(1)));

        let second = s.request(car(2, FuelKind::Gas, 100.0, 0.0), Tick(0));
        assert_eq!(second, RequestOutcome::Queued { position: 0 });
        assert_eq!(s.state_of(VehicleId(2)), Some(VehicleState::Waiting));
        assert_eq!(s.vehicle(VehicleId(2)).unwrap().arrival(), Some(Tick(0)));

        // Electric slot still free.
        assert_eq!(s.free_slots(FuelKind::Electric), 1);
        assert_eq!(s.free_slots(FuelKind::Gas), 0);
        assert_eq!(s.vehicle_count(), 2);
    }

    #[test]
    fn priority_never_preempts_occupant() {
        let mut s = gas_only(1);
        s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));
        s.request(waiter(2, FuelKind::Gas, 100, false), Tick(0));
        let vip = s.request(waiter(3, FuelKind::Gas, 100, true), Tick(1));
        assert_eq!(vip, RequestOutcome::Queued { position: 0 });
        assert_eq!(s.occupant_of(FuelKind::Gas, SlotIndex(0)).map(Vehicle::id), Some(VehicleId(1)));
        assert_eq!(ids(s.queue()), vec![3, 2]);
    }

    #[test]
    fn rejections_hand_vehicle_back() {
        let mut s = gas_only(1);
        s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));

        match s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0)) {
            RequestOutcome::Rejected(v, RejectReason::Duplicate) => assert_eq!(v.id(), VehicleId(1)),
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
        match s.request(car(2, FuelKind::Electric, 100.0, 0.0), Tick(0)) {
            RequestOutcome::Rejected(v, RejectReason::UnsupportedFuel) => {
                assert_eq!(v.state(), VehicleState::Idle);
            }
            other => panic!("expected unsupported fuel, got {other:?}"),
        }
        assert!(matches!(
            s.request(car(3, FuelKind::Gas, 10.0, 10.0), Tick(0)),
            RequestOutcome::Rejected(_, RejectReason::AlreadyFull)
        ));
        assert_eq!(s.vehicle_count(), 1);
        assert!(s.check_invariants().is_ok());
    }
}

// ── Station: tick ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use super::*;

    #[test]
    fn evicts_at_first_tick_past_max_wait() {
        let mut s = gas_only(1);
        // Blocker needs 200 ticks at 5/tick.
        s.request(car(1, FuelKind::Gas, 1_000.0, 0.0), Tick(0));
        s.request(waiter(2, FuelKind::Gas, 10, false), Tick(0));

        for t in 1..=10 {
            let report = s.tick(Tick(t));
            assert!(report.evicted.is_empty(), "evicted early at t={t}");
            assert_eq!(s.state_of(VehicleId(2)), Some(VehicleState::Waiting));
        }
        let report = s.tick(Tick(11));
        assert_eq!(report.evicted.len(), 1);
        let gone = &report.evicted[0];
        assert_eq!(gone.id(), VehicleId(2));
        assert_eq!(gone.reason, DepartureReason::Timeout);
        assert_eq!(gone.at, Tick(11));
        assert_eq!(gone.vehicle.state(), VehicleState::Departed(DepartureReason::Timeout));
        assert!(s.vehicle(VehicleId(2)).is_none());
    }

    #[test]
    fn wait_ceiling_caps_vehicle_patience() {
        let mut s = StationBuilder::new(StationId(3))
            .fuel(FuelKind::Gas, 1, 5.0, 1_000.0)
            .wait_ceiling(3)
            .build()
            .unwrap();
        s.request(car(1, FuelKind::Gas, 1_000.0, 0.0), Tick(0));
        s.request(waiter(2, FuelKind::Gas, 100, false), Tick(0));
        assert!(s.tick(Tick(3)).evicted.is_empty());
        assert_eq!(s.tick(Tick(4)).evicted.len(), 1);
    }

    #[test]
    fn promoted_vehicle_charges_next_tick() {
        let mut s = gas_only(1);
        s.request(car(1, FuelKind::Gas, 10.0, 5.0), Tick(0));
        s.request(car(2, FuelKind::Gas, 20.0, 0.0), Tick(0));

        let r1 = s.tick(Tick(1));
        assert_eq!(r1.completed.len(), 1);
        assert_eq!(r1.completed[0].reason, DepartureReason::Full);
        assert_eq!(r1.completed[0].vehicle.level(), 10.0);
        assert!(r1.promoted.is_empty(), "slot freed only after promotion step");

        let r2 = s.tick(Tick(2));
        assert_eq!(r2.promoted, vec![VehicleId(2)]);
        assert_eq!(s.vehicle(VehicleId(2)).unwrap().level(), 0.0);
        assert_eq!(s.state_of(VehicleId(2)), Some(VehicleState::Charging));
        assert!(s.vehicle(VehicleId(2)).unwrap().arrival().is_none());

        s.tick(Tick(3));
        assert_eq!(s.vehicle(VehicleId(2)).unwrap().level(), 5.0);
    }

    #[test]
    fn promotion_skips_other_kinds() {
        let mut s = one_each();
        s.request(car(1, FuelKind::Gas, 1_000.0, 0.0), Tick(0));
        // Fills in one tick at 2/tick.
        s.request(car(2, FuelKind::Electric, 2.0, 0.0), Tick(0));
        s.request(car(3, FuelKind::Gas, 100.0, 0.0), Tick(0));
        s.request(car(4, FuelKind::Electric, 100.0, 0.0), Tick(0));
        assert_eq!(ids(s.queue()), vec![3, 4]);

        s.tick(Tick(1));
        let r2 = s.tick(Tick(2));
        assert_eq!(r2.promoted, vec![VehicleId(4)]);
        assert_eq!(s.queue().position(VehicleId(3)), Some(0));
        assert_eq!(s.charging_count(FuelKind::Electric), 1);
    }

    #[test]
    fn repeated_tick_is_noop() {
        let mut s = gas_only(1);
        s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));
        assert!(s.tick(Tick(1)).applied);
        let level = s.vehicle(VehicleId(1)).unwrap().level();

        let again = s.tick(Tick(1));
        assert!(!again.applied);
        assert!(s.tick(Tick(0)).is_quiet());
        assert_eq!(s.vehicle(VehicleId(1)).unwrap().level(), level);
        assert_eq!(s.last_tick(), Some(Tick(1)));
    }

    #[test]
    fn exhaustion_keeps_slot_until_replenished() {
        let mut s = StationBuilder::new(StationId(4))
            .fuel(FuelKind::Gas, 1, 5.0, 0.0)
            .replenish(FuelKind::Gas, 2.0)
            .build()
            .unwrap();
        s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));

        let r1 = s.tick(Tick(1));
        assert_eq!(r1.exhausted, vec![FuelKind::Gas]);
        assert_eq!(s.vehicle(VehicleId(1)).unwrap().level(), 0.0);
        assert_eq!(s.reserve_level(FuelKind::Gas), 2.0);
        assert_eq!(s.charging_count(FuelKind::Gas), 1);

        let r2 = s.tick(Tick(2));
        assert_eq!(r2.dispensed.gas, 2.0);
        assert_eq!(s.vehicle(VehicleId(1)).unwrap().level(), 2.0);
        assert_eq!(s.reserve_level(FuelKind::Gas), 2.0);
    }

    #[test]
    fn resource_is_conserved_per_kind() {
        let mut s = StationBuilder::new(StationId(5))
            .fuel(FuelKind::Gas, 2, 3.0, 50.0)
            .fuel(FuelKind::Electric, 2, 2.0, 30.0)
            .build()
            .unwrap();

        let mut fleet = Vec::new();
        for i in 0..4 {
            fleet.push(car(i, FuelKind::Gas, 30.0, 0.0));
        }
        for i in 4..7 {
            fleet.push(car(i, FuelKind::Electric, 10.0, 2.0));
        }
        let initial: Vec<(VehicleId, FuelKind, f64)> =
            fleet.iter().map(|v| (v.id(), v.kind(), v.level())).collect();
        let start_reserve = [s.reserve_level(FuelKind::Gas), s.reserve_level(FuelKind::Electric)];
        for v in fleet {
            s.request(v, Tick(0));
        }

        let mut finished = Vec::new();
        let mut saw_exhaustion = false;
        for t in 1..=40 {
            let report = s.tick(Tick(t));
            saw_exhaustion |= report.exhausted.contains(&FuelKind::Gas);
            for kind in FuelKind::ALL {
                assert!(s.reserve_level(kind) >= 0.0);
            }
            finished.extend(report.into_departures().map(|d| d.vehicle));
        }
        finished.extend(s.shutdown(Tick(41)).into_iter().map(|d| d.vehicle));
        assert_eq!(finished.len(), 7);
        assert!(saw_exhaustion, "gas demand (120) exceeds the 50-unit reserve");

        for (i, kind) in FuelKind::ALL.into_iter().enumerate() {
            let gained: f64 = finished
                .iter()
                .filter(|v| v.kind() == kind)
                .map(|v| {
                    let (_, _, before) = initial.iter().find(|(id, ..)| *id == v.id()).unwrap();
                    v.level() - before
                })
                .sum();
            let spent = start_reserve[i] - s.reserve_level(kind);
            assert!((gained - spent).abs() < 1e-9, "{kind}: gained {gained}, spent {spent}");
            assert!((s.account(kind).dispensed() - spent).abs() < 1e-9);
        }
    }
}

// ── Station: shutdown & queries ───────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn shutdown_sends_everyone_away() {
        let mut s = gas_only(1);
        s.request(car(1, FuelKind::Gas, 100.0, 0.0), Tick(0));
        s.request(car(2, FuelKind::Gas, 100.0, 0.0), Tick(0));
        s.request(car(3, FuelKind::Gas, 100.0, 0.0), Tick(1));

        let gone = s.shutdown(Tick(5));
        let order: Vec<u32> = gone.iter().map(|d| d.id().0).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert!(gone.iter().all(|d| d.reason == DepartureReason::Shutdown && d.at == Tick(5)));
        assert!(gone.iter().all(|d| d.vehicle.station().is_none()));
        assert_eq!(s.vehicle_count(), 0);
        assert_eq!(s.free_slots(FuelKind::Gas), 1);
        assert!(s.shutdown(Tick(6)).is_empty());
    }

    #[test]
    fn estimated_wait() {
        let mut s = gas_only(2);
        assert_eq!(s.estimated_wait_ticks(FuelKind::Gas), Some(0));
        assert_eq!(s.estimated_wait_ticks(FuelKind::Electric), None);

        s.request(car(1, FuelKind::Gas, 10.0, 0.0), Tick(0));
        s.request(car(2, FuelKind::Gas, 10.0, 0.0), Tick(0));
        s.request(car(3, FuelKind::Gas, 10.0, 0.0), Tick(0));
        // 30 missing across 2 slots at 5/tick.
        assert_eq!(s.estimated_wait_ticks(FuelKind::Gas), Some(3));
    }

    #[test]
    fn set_reserve_rules() {
        let mut s = gas_only(1);
        assert!(s.set_reserve(FuelKind::Gas, 12.0).is_ok());
        assert_eq!(s.reserve_level(FuelKind::Gas), 12.0);
        assert_eq!(
            s.set_reserve(FuelKind::Electric, 5.0),
            Err(StationError::UnsupportedFuel(FuelKind::Electric))
        );
        assert!(s.set_reserve(FuelKind::Gas, -3.0).is_err());
    }
}

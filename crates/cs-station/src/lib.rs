//! `cs-station` — the slot-allocation and queueing engine of one station.
//!
//! # Per-tick processing
//!
//! ```text
//! request(vehicle, now):
//!   free slot of the vehicle's kind?  → Accepted (Charging)
//!   otherwise                          → Queued   (Waiting)
//!
//! tick(now):
//!   ① Evict    — queue entries that waited past their limit depart (Timeout).
//!   ② Promote  — each free slot takes the next queued vehicle of its kind.
//!   ③ Charge   — every occupant not promoted this tick draws from its
//!                kind's reserve; full tanks release their slot (Full).
//!   ④ Replenish — every reserve grows by its replenish rate.
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`slot_pool`]   | `SlotPool`, `SlotHandle`                                  |
//! | [`wait_queue`]  | `WaitQueue`, `QueueEntry`                                 |
//! | [`account`]     | `ResourceAccount`, `ChargeOutcome`                        |
//! | [`config`]      | `StationConfig`, `KindConfig`, `StationBuilder`           |
//! | [`station`]     | `Station` (the controller)                                |
//! | [`report`]      | `RequestOutcome`, `RejectReason`, `Departure`, `TickReport` |
//! | [`error`]       | `ConstructionError`, `StationError`                       |
//!
//! `Station` is a plain single-threaded value.  Concurrency lives one layer
//! up (`cs-sim`), which wraps each station in exactly one lock so the three
//! structures are never observed half-updated.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for id lookups.              |
//! | `serde`   | `Serialize`/`Deserialize` on `StationConfig`.          |

pub mod account;
pub mod config;
pub mod error;
pub mod report;
pub mod slot_pool;
pub mod station;
pub mod wait_queue;

#[cfg(test)]
mod tests;

pub use account::{ChargeOutcome, ResourceAccount};
pub use config::{KindConfig, StationBuilder, StationConfig};
pub use error::{ConstructionError, StationError, StationResult};
pub use report::{Departure, RejectReason, RequestOutcome, TickReport};
pub use slot_pool::{SlotHandle, SlotPool};
pub use station::Station;
pub use wait_queue::{QueueEntry, WaitQueue};

/// Map keyed by a typed id; FxHash with the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub type IdMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub type IdMap<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
pub type IdSet<K> = rustc_hash::FxHashSet<K>;
#[cfg(not(feature = "fx-hash"))]
pub type IdSet<K> = std::collections::HashSet<K>;

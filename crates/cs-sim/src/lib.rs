//! `cs-sim` — threaded runtime for the charging-station fleet simulator.
//!
//! # Threads
//!
//! ```text
//!   vehicle-N  ──request──►  StationHandle  ◄──tick(now)──  ticker-S
//!      │                 (one Mutex per station:               │
//!      │                  Station + waiter registry)           │
//!      └──── blocks on Ticket ◄── Departure (mpsc, 1 slot) ─────┘
//! ```
//!
//! - One [`VehicleAgent`] thread per vehicle: request, then block on its
//!   [`Ticket`] until the station reports a terminal transition.  No polling.
//! - One [`Ticker`] thread per station: calls `tick(clock.now())` on an
//!   interval and hands each [`TickReport`](cs_station::TickReport) to a
//!   [`StationObserver`].
//! - Every station has exactly one lock.  Nothing locks two stations at once,
//!   so there is no global serialization and no lock ordering to get wrong.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`handle`]   | `StationHandle`, `Admission`, `Ticket`              |
//! | [`ticker`]   | `Ticker`                                            |
//! | [`agent`]    | `VehicleAgent`, `AgentHandle`, `AgentOutcome`       |
//! | [`clock`]    | `Clock`, `WallClock`, `ManualClock`                 |
//! | [`observer`] | `StationObserver`, `NoopObserver`, `TracingObserver`|
//! | [`set`]      | `StationSet`                                        |
//! | [`error`]    | `SimError`, `SimResult`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `StationSet::tick_all` ticks stations on Rayon's pool.  |
//! | `fx-hash`  | FxHash for every id-keyed map, including `cs-station`.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let clock = WallClock::new(&config);
//! let stations = StationSet::from_configs(configs)?;
//! let tickers = stations.spawn_tickers(&clock, config.tick_duration(), |_| TracingObserver::default())?;
//!
//! let agents = fleet
//!     .into_iter()
//!     .map(|v| VehicleAgent::new(v, stations.get(StationId(0))?.clone()).spawn(clock.clone()))
//!     .collect::<SimResult<Vec<_>>>()?;
//! for agent in agents {
//!     println!("{:?}", agent.join()?);
//! }
//! ```

pub mod agent;
pub mod clock;
pub mod error;
pub mod handle;
pub mod observer;
pub mod set;
pub mod ticker;


pub use agent::{AgentHandle, AgentOutcome, VehicleAgent};
pub use clock::{Clock, ManualClock, WallClock};
pub use error::{SimError, SimResult};
pub use handle::{Admission, StationHandle, Ticket};
pub use observer::{NoopObserver, StationObserver, TracingObserver};
pub use set::StationSet;
pub use ticker::Ticker;

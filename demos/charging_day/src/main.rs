//! charging_day — a compressed day at three charging stations.
//!
//! A small hand-written fleet (embedded CSV) plus a seeded random fleet
//! arrive at staggered times.  Each vehicle is its own thread; each station
//! is driven by its own ticker thread on a wall clock.  At the end of the run
//! every station shuts down and the outcome of each visit is tallied.
//!
//! `RUST_LOG=debug` shows every admission, promotion and departure.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cs_core::{FuelKind, GeoPoint, SimConfig, SimRng, StationId};
use cs_sim::{AgentHandle, Clock, StationSet, TracingObserver, VehicleAgent, WallClock};
use cs_station::{StationBuilder, StationConfig};
use cs_vehicle::{FleetGenerator, load_fleet_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const TICK_DURATION_MILLIS: u64 = 5;
const TOTAL_TICKS:          u64 = 600;
const GENERATED_VEHICLES:   u32 = 60;
const MAX_ARRIVAL_GAP:      u64 = 4; // ticks between consecutive arrivals

// ── Fleet CSV ─────────────────────────────────────────────────────────────────

// Empty level / max_wait / priority cells fall back to the loader defaults.
const FLEET_CSV: &str = "\
vehicle_id,fuel,capacity,level,max_wait,priority\n\
0,gas,60,12,40,false\n\
1,gas,45,5,,true\n\
2,electric,75,20,90,false\n\
3,electric,40,,30,true\n\
4,gas,70,35,25,\n\
5,electric,60,6,60,false\n\
6,gas,50,,15,false\n\
7,electric,85,40,,\n\
";

// ── Stations ──────────────────────────────────────────────────────────────────

fn station_configs() -> Vec<StationConfig> {
    vec![
        // Downtown: mixed, small electric reserve refilled slowly.
        StationBuilder::new(StationId(0))
            .location(GeoPoint::new(30.6954, -88.0399))
            .fuel(FuelKind::Gas, 2, 4.0, 1_500.0)
            .fuel(FuelKind::Electric, 3, 1.5, 400.0)
            .replenish(FuelKind::Electric, 1.0)
            .wait_ceiling(80)
            .config(),
        // Highway: gas only, fast pumps.
        StationBuilder::new(StationId(1))
            .location(GeoPoint::new(30.6741, -88.1176))
            .fuel(FuelKind::Gas, 4, 6.0, 3_000.0)
            .config(),
        // Depot: electric only, many slow chargers.
        StationBuilder::new(StationId(2))
            .location(GeoPoint::new(30.7346, -88.0843))
            .fuel(FuelKind::Electric, 6, 1.0, 2_000.0)
            .replenish(FuelKind::Electric, 2.0)
            .config(),
    ]
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    println!("=== charging_day — charging-station fleet simulator ===");
    println!("Ticks: {TOTAL_TICKS} × {TICK_DURATION_MILLIS} ms  |  Seed: {SEED}");
    println!();

    // 1. Run configuration.
    let config = SimConfig {
        tick_duration_millis: TICK_DURATION_MILLIS,
        total_ticks:          TOTAL_TICKS,
        seed:                 SEED,
    };
    config.validate()?;

    // 2. Stations.
    let stations = StationSet::from_configs(station_configs())?;
    println!("Stations: {}", stations.len());

    // 3. Fleet: the embedded CSV plus a generated tail with ids from 100.
    let mut fleet = load_fleet_reader(Cursor::new(FLEET_CSV)).context("loading embedded fleet")?;
    let csv_count = fleet.len();
    fleet.extend(FleetGenerator::new(SEED).generate(100, GENERATED_VEHICLES)?);
    println!("Fleet: {csv_count} from CSV + {GENERATED_VEHICLES} generated");

    let mut rng = SimRng::new(SEED);
    rng.shuffle(&mut fleet);

    // 4. One ticker per station on a shared wall clock.
    let clock = WallClock::new(&config);
    let tickers = stations.spawn_tickers(&clock, config.tick_duration() / 2, |_| TracingObserver::default())?;

    // 5. Staggered arrivals, each vehicle routed to the station with the
    //    shortest estimated wait for its fuel.
    let t0 = Instant::now();
    let mut agents: Vec<AgentHandle> = Vec::with_capacity(fleet.len());
    for vehicle in fleet {
        let gap: u64 = rng.gen_range(0..=MAX_ARRIVAL_GAP);
        thread::sleep(config.tick_duration() * gap as u32);

        let Some(station) = stations.best_for(vehicle.kind()) else {
            tracing::warn!(vehicle = %vehicle.id(), kind = %vehicle.kind(), "no station serves this fuel");
            continue;
        };
        agents.push(VehicleAgent::new(vehicle, station.clone()).spawn(clock)?);
    }
    println!("All {} vehicles dispatched by {}", agents.len(), clock.now());

    // 6. Let the day run out, then stop every ticker and close its station.
    while clock.now() < config.end_tick() && !agents.iter().all(AgentHandle::is_finished) {
        thread::sleep(config.tick_duration() * 10);
    }
    let closing = clock.now();
    let mut observers = Vec::with_capacity(tickers.len());
    let mut sent_home = 0;
    for ticker in tickers {
        let station = ticker.station();
        let (obs, departures) = ticker.shutdown(closing)?;
        sent_home += departures.len();
        observers.push((station, obs));
    }
    println!("Closed at {closing}: {sent_home} vehicles sent home unfinished");

    // 7. Tally outcomes.
    let mut by_reason: BTreeMap<String, usize> = BTreeMap::new();
    for agent in agents {
        let outcome = agent.join()?;
        let label = match outcome.reason() {
            Some(reason) => reason.to_string(),
            None => "rejected".to_string(),
        };
        *by_reason.entry(label).or_default() += 1;
    }

    println!();
    println!("Outcomes:");
    for (reason, count) in &by_reason {
        println!("  {reason:<10} {count}");
    }
    println!();
    println!("{:<12} {:>6} {:>10} {:>10} {:>10} {:>10}", "station", "ticks", "completed", "evicted", "gas left", "kWh left");
    for (id, obs) in &observers {
        let handle = stations.get(*id)?;
        println!(
            "{:<12} {:>6} {:>10} {:>10} {:>10.1} {:>10.1}",
            id.to_string(),
            obs.ticks,
            obs.completed,
            obs.evicted,
            handle.reserve_level(FuelKind::Gas),
            handle.reserve_level(FuelKind::Electric),
        );
    }
    println!();
    println!("Wall time: {:.2?}", t0.elapsed());
    Ok(())
}

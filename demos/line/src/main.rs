//! line — run the reference 21-position pallet loop and print its report.
//!
//! ```text
//! line [LAYOUT_CSV] [RUN_SECS]
//! ```
//!
//! `LAYOUT_CSV` replaces the reference ring topology
//! (`position,station_id,transit_secs,cycle_secs`); the station cells stay
//! wired to the same ordinals, so the replacement must have at least 21
//! positions.  Trace lines for positions 10 and 11 go through `tracing`;
//! `RUST_LOG` controls the filter.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use pl_layout::load_layout_csv;
use pl_sim::{NoopObserver, SimBuilder, reference_line};

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["pl_sim=info", "pl_ring=info", "pl_station=info"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    init_logging();
    let mut args = std::env::args().skip(1);

    let mut line = reference_line().context("reference layout")?;
    if let Some(path) = args.next().map(PathBuf::from) {
        line.layout = load_layout_csv(&path).with_context(|| format!("loading {}", path.display()))?;
        line.final_position = None;
    }
    if let Some(secs) = args.next() {
        line.run.run_secs = secs.parse().with_context(|| format!("run length {secs:?}"))?;
    }

    println!("=== line — pallet loop simulation ===");
    println!(
        "Positions: {}  |  Pallets: {}  |  Run: {} s  |  Seed: {}",
        line.layout.len(),
        line.pallet_count,
        line.run.run_secs,
        line.run.seed
    );
    println!();

    let mut sim = SimBuilder::new(line).build()?;
    let t0 = Instant::now();
    sim.run(&mut NoopObserver)?;
    info!(wall_ms = t0.elapsed().as_millis() as u64, "run finished");

    println!();
    println!("{}", sim.report());
    Ok(())
}

//! Curation Example
//!
//! Loads a listing fixture set and prints the dashboard figures: market value,
//! sweep values, vault progress and the cheapest Black Check cover.
//!
//! Use `-f` to load a listing fixture set by name
//! Use `-w` to load a weight table fixture instead of the built-in Checks table
//! Use `--vault 80,40` to report progress for the grid sizes a vault holds

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;

use vvalue::{
    allocation::Allocation,
    fixtures::Fixture,
    format::format_eth,
    market::{MarketSummary, SWEEP_SIZE},
    utils::ExampleCurateArgs,
    weights::WeightTable,
};

/// Curation Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCurateArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let fixture = Fixture::from_set(&args.fixture)?;

    let table = match args.weights.as_deref() {
        Some(name) => fixture.load_weights(name)?,
        None => WeightTable::checks(),
    };

    let start = Instant::now();

    let summary = MarketSummary::compute(fixture.originals(), fixture.editions(), &table);

    let elapsed = start.elapsed();

    match summary.market_value {
        Some(listing) => println!(
            "Market value:       {} ({})",
            format_eth(*listing.price().amount()),
            listing.id()
        ),
        None => println!("Market value:       no single-check originals listed"),
    }

    println!("Sweep {SWEEP_SIZE} editions:  {}", format_eth(*summary.sweeps.editions.amount()));
    println!("Sweep {SWEEP_SIZE} opensea:   {}", format_eth(*summary.sweeps.opensea.amount()));
    println!("Sweep {SWEEP_SIZE} tokenworks: {}", format_eth(*summary.sweeps.tokenworks.amount()));

    if let Some(per_check) = summary.curated_per_check(&table) {
        println!("Curated per check:  {}", format_eth(*per_check.amount()));
    }

    if !args.vault.is_empty() {
        let allocation = Allocation::from_holdings(args.vault.iter().copied(), &table);

        println!(
            "Checks allocated:   {allocation} ({}%)",
            allocation.progress_percent()
        );
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.curation.write_to(&mut handle)?;

    println!("Solution: {}", elapsed.human(Truncate::Nano));

    Ok(())
}

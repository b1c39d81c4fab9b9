//! Run a sampling-distribution exercise from the command line
//!
//! Usage: cargo run --example collect_trials -- [successes] [failures] [trials]
//!
//! Set `RUST_LOG=propsim=debug` to watch batches being folded in.

use anyhow::{Context, Result};
use propsim::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<u64> = std::env::args()
        .skip(1)
        .map(|a| a.parse::<u64>().with_context(|| format!("not a count: {a}")))
        .collect::<Result<_>>()?;
    let successes = args.first().copied().unwrap_or(3);
    let failures = args.get(1).copied().unwrap_or(7);
    let trials = args.get(2).copied().unwrap_or(10_000) as usize;

    let sample = Sample::new("success", successes, "failure", failures)?;
    println!("Sample: {sample}");

    let mut sim = Simulation::default();
    sim.select_sample(sample)?;
    let mut source = RngSource::from_entropy();

    // Collect in a few batches, as an interactive host would
    let batch = (trials / 4).max(1);
    let mut collected = 0;
    while collected < trials {
        let count = batch.min(trials - collected);
        if let Some(summary) = sim.collect(count, &mut source)? {
            println!(
                "collected {:>6} (total {:>7}), last proportion {:.3}",
                summary.batch_size,
                summary.total_trials,
                summary.last_proportion.unwrap_or_default()
            );
        }
        collected += count;
    }

    println!();
    for tail in [Tail::Left, Tail::Right, Tail::Two] {
        sim.set_tail(tail);
        for level in ConfidenceLevel::STANDARD {
            sim.set_level(Some(level));
            println!("{:>5} tail: {}", tail.name(), sim.describe_bound());
        }
    }

    let columns = sim.plot();
    println!(
        "\nplot: {:?} layout, {} points, {} in tail",
        columns.layout,
        columns.len(),
        columns.tail_points()
    );
    Ok(())
}

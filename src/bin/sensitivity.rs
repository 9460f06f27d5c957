//! Sweep nominal returns across every scenario in a session
//!
//! Prints years-to-enough and years-to-coast per (return, scenario) pair.
//! Projections run in parallel; pass --json for machine-readable output.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use liquidity_planner::format::{format_optional, format_percent};
use liquidity_planner::storage::DEFAULT_STATE_PATH;
use liquidity_planner::{compute_kpis, simulate, GlobalInputs, Session, StateStore};

#[derive(Parser)]
#[command(name = "sensitivity")]
#[command(about = "Milestone timing across a grid of nominal returns")]
struct Cli {
    /// Session state file
    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[arg(long, default_value_t = 0.03)]
    min_return: f64,

    #[arg(long, default_value_t = 0.10)]
    max_return: f64,

    #[arg(long, default_value_t = 0.01)]
    step: f64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepPoint {
    nominal_return: f64,
    scenario_id: String,
    years_to_enough: Option<u32>,
    years_to_coast: Option<u32>,
    retirement_net_worth: Option<f64>,
}

fn return_grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    (0..count)
        // Snap to basis points so 0.07 prints as 0.07
        .map(|i| ((min + step * i as f64) * 10_000.0).round() / 10_000.0)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.step <= 0.0 || cli.min_return > cli.max_return {
        bail!("need step > 0 and min-return <= max-return");
    }
    if cli.min_return < 0.0 || cli.max_return > 1.0 {
        bail!("returns must lie between 0 and 1");
    }

    let session = Session::restore(&StateStore::new(cli.state.clone()));
    let grid = return_grid(cli.min_return, cli.max_return, cli.step);
    let jobs: Vec<(f64, usize)> = grid
        .iter()
        .flat_map(|&r| (0..session.scenarios().len()).map(move |i| (r, i)))
        .collect();

    let start = Instant::now();
    let points: Vec<SweepPoint> = jobs
        .par_iter()
        .map(|&(nominal_return, index)| {
            let inputs = GlobalInputs {
                nominal_return,
                ..session.inputs().clone()
            };
            let scenario = &session.scenarios()[index];
            let rows = simulate(&inputs, scenario);
            let kpis = compute_kpis(&inputs, &rows);
            SweepPoint {
                nominal_return,
                scenario_id: scenario.id.clone(),
                years_to_enough: kpis.years_to_enough,
                years_to_coast: kpis.years_to_coast,
                retirement_net_worth: kpis.retirement_net_worth,
            }
        })
        .collect();
    log::info!("{} projections in {:?}", points.len(), start.elapsed());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{:>8} {:<24} {:>8} {:>8}", "Return", "Scenario", "Enough", "Coast");
    println!("{}", "-".repeat(52));
    for point in &points {
        println!(
            "{:>8} {:<24} {:>8} {:>8}",
            format_percent(point.nominal_return),
            point.scenario_id,
            format_optional(point.years_to_enough, |y| y.to_string()),
            format_optional(point.years_to_coast, |y| y.to_string()),
        );
    }
    Ok(())
}

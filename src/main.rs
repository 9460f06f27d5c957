//! Liquidity Planner CLI
//!
//! Keeps a planning session in a JSON state file and prints projections,
//! KPIs and segment issues for its scenarios.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};

use liquidity_planner::assumptions::loader::{set_named_field, FIELD_NAMES};
use liquidity_planner::assumptions::load_inputs_csv;
use liquidity_planner::format::{format_currency, format_number, format_optional, format_percent};
use liquidity_planner::milestones::{compare_to_baseline, enough_number, security_number_at_year};
use liquidity_planner::plan::load_segments;
use liquidity_planner::projection::export_rows_csv;
use liquidity_planner::scenario::{ExpenseRule, SuggestionMode, SuggestionParams};
use liquidity_planner::storage::DEFAULT_STATE_PATH;
use liquidity_planner::{compute_kpis, GlobalInputs, Kpis, ProjectionEngine, Scenario, Session, StateStore, YearRow};

#[derive(Parser)]
#[command(name = "liquidity_planner")]
#[command(version)]
#[command(about = "Project net worth across life scenarios and track financial-independence milestones")]
struct Cli {
    /// Session state file
    #[arg(long, global = true, default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh session with the preset scenarios
    Init {
        /// Load inputs from a name,value CSV instead of the defaults
        #[arg(long)]
        inputs: Option<PathBuf>,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },
    /// Print the year-by-year ledger for a scenario
    Project {
        #[command(flatten)]
        source: ScenarioSource,

        /// Also write the ledger as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Calendar year of projection year 1 (defaults to this year)
        #[arg(long)]
        base_year: Option<i32>,
    },
    /// Print milestone KPIs and the trade-off against the baseline
    Kpis {
        #[command(flatten)]
        source: ScenarioSource,
    },
    /// Report segment issues for every scenario
    Validate,
    /// Change one input by name (e.g. retirementSpending 150000)
    Set { name: String, value: String },
    /// Add a scenario derived from the active one
    Suggest {
        #[command(subcommand)]
        mode: SuggestCommand,
    },
}

#[derive(Args)]
struct ScenarioSource {
    /// Scenario id (defaults to the active scenario)
    #[arg(long)]
    scenario: Option<String>,

    /// Override the session inputs with a name,value CSV
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Project segments from a CSV file instead of a stored scenario
    #[arg(long, conflicts_with = "scenario")]
    segments: Option<PathBuf>,
}

#[derive(Args)]
struct RangeArgs {
    #[arg(long, default_value_t = 3)]
    start: i64,
    #[arg(long, default_value_t = 10)]
    end: i64,
    #[arg(long, default_value_t = 0.67)]
    multiplier: f64,
    #[arg(long, default_value_t = 11)]
    zero_after: i64,
}

impl RangeArgs {
    fn params(&self) -> SuggestionParams {
        SuggestionParams {
            reduce_start_year: self.start,
            reduce_end_year: self.end,
            reduce_multiplier: self.multiplier,
            zero_income_after_year: self.zero_after,
        }
    }
}

#[derive(Subcommand)]
enum SuggestCommand {
    /// Current income, reduced inside a range and zero afterwards
    Income {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Flat or inflating expenses with optional step changes
    Expenses {
        #[command(flatten)]
        range: RangeArgs,

        /// Base annual expense (defaults to retirement spending)
        #[arg(long)]
        base: Option<f64>,

        /// Grow expenses with inflation
        #[arg(long)]
        inflation: bool,

        /// Step change as YEAR or YEAR:VALUE; repeatable
        #[arg(long = "rule", value_parser = parse_rule)]
        rules: Vec<ExpenseRule>,
    },
}

fn parse_rule(raw: &str) -> Result<ExpenseRule, String> {
    let (year, value) = match raw.split_once(':') {
        Some((year, value)) => (year, Some(value)),
        None => (raw, None),
    };
    let start_year = year.trim().parse::<u32>().map_err(|e| format!("bad rule year \"{}\": {}", year, e))?;
    let expense_value = value
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("bad rule value \"{}\": {}", v, e)))
        .transpose()?;
    Ok(ExpenseRule { start_year, expense_value })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = StateStore::new(cli.state.clone());

    match cli.command {
        Commands::Init { inputs, force } => init(&store, inputs.as_deref(), force),
        Commands::Project { source, csv, base_year } => {
            let session = Session::restore(&store);
            let (inputs, scenario) = resolve_source(&session, &source)?;
            let result = ProjectionEngine::new(inputs).project_scenario(&scenario);

            let base_year = base_year.unwrap_or_else(|| chrono::Local::now().year());
            println!("{} ({})", scenario.name, scenario.id);
            print_issues(&result.issues);
            print_rows(&result.rows, base_year);

            let summary = result.summary();
            println!();
            println!("Total work income: {}", format_currency(summary.total_work_income));
            println!("Total expenses:    {}", format_currency(summary.total_expenses));
            println!("Total growth:      {}", format_currency(summary.total_growth));
            println!("Shortfall years:   {}", summary.shortfall_years);

            if let Some(path) = csv {
                export_rows_csv(&path, &result.rows)
                    .with_context(|| format!("writing ledger to {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Kpis { source } => {
            let session = Session::restore(&store);
            let (inputs, scenario) = resolve_source(&session, &source)?;
            kpis(&session, &inputs, &scenario);
            Ok(())
        }
        Commands::Validate => {
            let session = Session::restore(&store);
            let issues = session.issues();
            for scenario in session.scenarios() {
                match issues.get(&scenario.id) {
                    Some(found) => {
                        println!("{} ({}): {} issue(s)", scenario.name, scenario.id, found.len());
                        for issue in found {
                            println!("  - {}", issue);
                        }
                    }
                    None => println!("{} ({}): ok", scenario.name, scenario.id),
                }
            }
            Ok(())
        }
        Commands::Set { name, value } => {
            let mut session = Session::restore(&store);
            let mut inputs = session.inputs().clone();
            set_named_field(&mut inputs, &name, &value)
                .with_context(|| format!("setting {} (known fields: {})", name, FIELD_NAMES.join(", ")))?;
            let refreshed = session.set_inputs(inputs).context("applying new inputs")?;
            session.save(&store).context("saving session")?;
            println!("Set {} = {} ({} preset scenario(s) refreshed)", name, value, refreshed);
            Ok(())
        }
        Commands::Suggest { mode } => {
            let mut session = Session::restore(&store);
            let (params, mode) = match mode {
                SuggestCommand::Income { range } => (range.params(), SuggestionMode::Income),
                SuggestCommand::Expenses { range, base, inflation, rules } => (
                    range.params(),
                    SuggestionMode::Expenses {
                        base,
                        inflation,
                        reduce: !rules.is_empty(),
                        rules,
                    },
                ),
            };
            let id = session.create_suggested_scenario(&params, &mode);
            session.save(&store).context("saving session")?;
            let scenario = session.scenario(&id)?;
            println!("Added {} ({})", scenario.name, scenario.id);
            println!("{}", scenario.description.text());
            Ok(())
        }
    }
}

fn init(store: &StateStore, inputs: Option<&Path>, force: bool) -> Result<()> {
    if store.path().exists() && !force {
        bail!("{} already exists; pass --force to overwrite", store.path().display());
    }
    let inputs = match inputs {
        Some(path) => load_inputs_csv(path).with_context(|| format!("loading inputs from {}", path.display()))?,
        None => GlobalInputs::default(),
    };
    let session = Session::new(inputs);
    session.save(store).context("saving session")?;
    println!("Wrote {} scenarios to {}", session.scenarios().len(), store.path().display());
    Ok(())
}

fn resolve_source(session: &Session, source: &ScenarioSource) -> Result<(GlobalInputs, Scenario)> {
    let inputs = match &source.inputs {
        Some(path) => load_inputs_csv(path).with_context(|| format!("loading inputs from {}", path.display()))?,
        None => session.inputs().clone(),
    };

    let scenario = match (&source.segments, &source.scenario) {
        (Some(path), _) => {
            let segments = load_segments(path).with_context(|| format!("loading segments from {}", path.display()))?;
            Scenario::new("file", path.display().to_string(), segments)
        }
        (None, Some(id)) => session.scenario(id)?.clone(),
        (None, None) => session.active_scenario().clone(),
    };
    Ok((inputs, scenario))
}

fn print_issues(issues: &[String]) {
    for issue in issues {
        println!("warning: {}", issue);
    }
}

fn print_rows(rows: &[YearRow], base_year: i32) {
    println!(
        "{:>4} {:>6} {:>14} {:>14} {:>12} {:>12} {:>12} {:>14} {:>14}",
        "Year", "Cal", "Start Total", "Start Liquid", "Income", "Expenses", "Growth", "End Total", "End Liquid"
    );
    println!("{}", "-".repeat(110));
    for row in rows {
        println!(
            "{:>4} {:>6} {:>14} {:>14} {:>12} {:>12} {:>12} {:>14} {:>14}",
            row.year,
            base_year + row.year as i32 - 1,
            format_currency(row.start_total_nw),
            format_currency(row.start_accessible_nw),
            format_currency(row.work_income),
            format_currency(row.expenses),
            format_currency(row.growth_total),
            format_currency(row.end_total_nw),
            format_currency(row.end_accessible_nw),
        );
    }
}

fn kpis(session: &Session, inputs: &GlobalInputs, scenario: &Scenario) {
    let engine = ProjectionEngine::new(inputs.clone());
    let rows = engine.project_scenario(scenario).rows;
    let kpis = compute_kpis(inputs, &rows);

    println!("{} ({})", scenario.name, scenario.id);
    println!("Enough number:             {}", format_currency(enough_number(inputs)));
    println!("Security number today:     {}", format_currency(security_number_at_year(inputs, 1)));
    print_kpis(&kpis);

    let baseline = session.baseline_scenario();
    let baseline_rows = engine.project_scenario(baseline).rows;
    let comparison = compare_to_baseline(
        &rows,
        &kpis,
        &baseline_rows,
        &compute_kpis(inputs, &baseline_rows),
        inputs.years_until_retirement,
    );
    let is_baseline = session.is_baseline(&scenario.id) && baseline.segments == scenario.segments;

    println!();
    println!("{}", comparison.tradeoff(is_baseline).summary());
}

fn print_kpis(kpis: &Kpis) {
    let year = |y: u32| format!("year {}", y);
    println!("Years to coast:            {}", format_optional(kpis.years_to_coast, year));
    println!("Years to enough:           {}", format_optional(kpis.years_to_enough, year));
    println!("Earliest sabbatical:       {}", format_optional(kpis.earliest_sabbatical_year, year));
    println!("Accessible runway:         {}", format_optional(kpis.accessible_runway_years, |v| format!("{} years", format_number(v))));
    println!("Capital coverage:          {}", format_optional(kpis.capital_coverage_accessible, format_percent));
    println!("Net worth at retirement:   {}", format_optional(kpis.retirement_net_worth, format_currency));
    println!("Bridge gap:                {}", format_optional(kpis.bridge_gap_years, |y| format!("{} years", y)));
}

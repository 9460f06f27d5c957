//! Preset scenario family derived from the baseline projection

use super::templates::{baseline_segments, TemplateScale};
use crate::assumptions::{GlobalInputs, DEFAULT_CURRENT_YEAR_INCOME, DEFAULT_RETIREMENT_SPENDING};
use crate::milestones::compute_kpis;
use crate::plan::{describe_segments, segments_match, split_list_around_year, Description, Scenario, Segment, SegmentPatch};
use crate::projection::simulate;

pub const BASELINE_ID: &str = "baseline";
pub const SABBATICAL_ID: &str = "sabbatical";
pub const CRUISE_ID: &str = "cruise";

/// Share of full income kept during the cruise phase
const CRUISE_INCOME_FRACTION: f64 = 2.0 / 3.0;

/// Build baseline, sabbatical and cruise presets for `inputs`
///
/// Deterministic: the same inputs always give the same scenarios, ids included.
pub fn build_default_scenarios(inputs: &GlobalInputs) -> Vec<Scenario> {
    let scale = TemplateScale::from_inputs(inputs);
    let segments = baseline_segments(&scale, BASELINE_ID);
    let baseline = Scenario::new(BASELINE_ID, "Baseline", segments.clone())
        .with_description(Description::Auto(describe_segments(&segments)));

    let base_rows = simulate(inputs, &baseline);
    let base_kpis = compute_kpis(inputs, &base_rows);

    let horizon = inputs.projection_years.max(1);
    let gap_year = 1u32
        .max(base_kpis.earliest_sabbatical_year.unwrap_or(1) + 1)
        .max(base_kpis.years_to_coast.unwrap_or(1) + 1)
        .min(horizon);
    let sabbatical = Scenario::new(
        SABBATICAL_ID,
        "Sabbatical",
        split_list_around_year(
            &baseline.segments,
            gap_year as i32,
            &SegmentPatch::income(0.0),
            &mut prefixed_ids(SABBATICAL_ID),
        ),
    )
    .with_description(Description::Custom(format!(
        "Take year {} off, then return to your prior income afterward.",
        gap_year
    )));

    let cruise = cruise_scenario(inputs, &scale, base_kpis.years_to_coast);

    log::info!(
        "built default scenarios: sabbatical gap year {}, cruise from year {:?}",
        gap_year,
        base_kpis.years_to_coast
    );
    vec![baseline, sabbatical, cruise]
}

/// Full income until coast, reduced income to retirement, then nothing
fn cruise_scenario(inputs: &GlobalInputs, scale: &TemplateScale, coast_year: Option<u32>) -> Scenario {
    let horizon = inputs.projection_years.max(1) as i32;
    let retirement = inputs.years_until_retirement as i32;
    let coast = coast_year.map_or(retirement + 1, |year| year as i32);

    let full_income = scale.income(DEFAULT_CURRENT_YEAR_INCOME);
    let reduced_income = (full_income * CRUISE_INCOME_FRACTION).round();
    let expenses = scale.expenses(DEFAULT_RETIREMENT_SPENDING);

    let phases = [
        (1, (coast - 1).min(retirement), full_income),
        (coast.max(1), retirement, reduced_income),
        (retirement + 1, horizon, 0.0),
    ];

    let mut next_id = prefixed_ids(CRUISE_ID);
    let segments: Vec<Segment> = phases
        .iter()
        .filter_map(|&(start, end, income)| {
            let start = start.max(1);
            let end = end.min(horizon);
            (start <= end).then(|| Segment::new(next_id(), start, end, income, expenses))
        })
        .collect();

    let description = if coast <= retirement {
        format!(
            "Work full-time until year {}, then about two-thirds income until retirement in year {}.",
            coast.max(1),
            retirement
        )
    } else {
        format!("Work full-time until retirement in year {}; coast is not reached earlier.", retirement)
    };

    Scenario::new(CRUISE_ID, "Cruise", segments).with_description(Description::Custom(description))
}

/// Replace preset scenarios the user has not customized
///
/// Runs only when income or spending changed. A scenario is refreshed when
/// its segments still match what `previous` would have produced for it.
/// Returns how many scenarios were replaced.
pub fn refresh_default_scenarios(previous: &GlobalInputs, next: &GlobalInputs, scenarios: &mut [Scenario]) -> usize {
    if previous.current_year_income == next.current_year_income
        && previous.retirement_spending == next.retirement_spending
    {
        return 0;
    }

    let previous_defaults = build_default_scenarios(previous);
    let next_defaults = build_default_scenarios(next);
    let mut refreshed = 0;

    for scenario in scenarios.iter_mut() {
        let Some(previous_default) = previous_defaults.iter().find(|s| s.id == scenario.id) else {
            continue;
        };
        let Some(next_default) = next_defaults.iter().find(|s| s.id == scenario.id) else {
            continue;
        };
        if !segments_match(&scenario.segments, &previous_default.segments) {
            log::debug!("scenario \"{}\" was customized; leaving it alone", scenario.id);
            continue;
        }
        scenario.segments = next_default.segments.clone();
        scenario.description = next_default.description.clone();
        refreshed += 1;
    }

    log::info!("refreshed {} default scenarios", refreshed);
    refreshed
}

fn prefixed_ids(prefix: &'static str) -> impl FnMut() -> String {
    let mut counter = 0;
    move || {
        counter += 1;
        format!("{}-{}", prefix, counter)
    }
}

//! Milestone and KPI derivation from a simulated ledger

use serde::{Deserialize, Serialize};

use super::targets::enough_number;
use crate::assumptions::GlobalInputs;
use crate::projection::YearRow;

/// Derived summary of one projection
///
/// Every field is `None` when the milestone is not reached within the
/// horizon or the ratio is undefined (zero expenses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// First year whose opening total reaches that year's Coast target
    pub years_to_coast: Option<u32>,

    /// First year whose opening total reaches the enough number
    #[serde(alias = "yearsToFire")]
    pub years_to_enough: Option<u32>,

    /// First year whose opening liquid balance covers that year's expenses
    pub earliest_sabbatical_year: Option<u32>,

    /// Today's liquid balance in years of first-year expenses
    pub accessible_runway_years: Option<f64>,

    /// Share of first-year expenses covered by a safe withdrawal from liquid assets
    pub capital_coverage_accessible: Option<f64>,

    /// Closing total net worth in the retirement year
    pub retirement_net_worth: Option<f64>,

    /// Longest pre-retirement run of zero-income years the liquid bucket cannot cover
    pub bridge_gap_years: Option<u32>,
}

/// Derive all KPIs from a row sequence; never re-runs the simulation
pub fn compute_kpis(inputs: &GlobalInputs, rows: &[YearRow]) -> Kpis {
    let enough = enough_number(inputs);

    let years_to_coast = first_year(rows, |row| row.start_total_nw >= row.coast_fire_number);
    let years_to_enough = first_year(rows, |row| row.start_total_nw >= enough);
    let earliest_sabbatical_year = first_year(rows, |row| row.start_accessible_nw >= row.expenses);

    let first = rows.first();
    let accessible_runway_years = first
        .filter(|row| row.expenses > 0.0)
        .map(|row| row.start_accessible_nw / row.expenses)
        .filter(|v| v.is_finite());
    let capital_coverage_accessible = first
        .filter(|row| row.expenses > 0.0)
        .map(|row| row.start_accessible_nw * inputs.safe_withdrawal_rate / row.expenses)
        .filter(|v| v.is_finite());

    let retirement_net_worth = rows
        .iter()
        .find(|row| row.year == inputs.years_until_retirement)
        .map(|row| row.end_total_nw)
        .filter(|v| v.is_finite());

    Kpis {
        years_to_coast,
        years_to_enough,
        earliest_sabbatical_year,
        accessible_runway_years,
        capital_coverage_accessible,
        retirement_net_worth,
        bridge_gap_years: bridge_gap_years(inputs, rows),
    }
}

fn first_year(rows: &[YearRow], reached: impl Fn(&YearRow) -> bool) -> Option<u32> {
    rows.iter().find(|row| reached(row)).map(|row| row.year)
}

/// Longest consecutive run of years up to retirement with no work income
/// where the opening liquid balance falls short of that year's expenses
fn bridge_gap_years(inputs: &GlobalInputs, rows: &[YearRow]) -> Option<u32> {
    let mut longest = 0u32;
    let mut current = 0u32;

    for row in rows.iter().take_while(|row| row.year <= inputs.years_until_retirement) {
        if row.work_income == 0.0 && row.start_accessible_nw < row.expenses {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    (longest > 0).then_some(longest)
}

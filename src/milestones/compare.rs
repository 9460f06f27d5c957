//! Scenario-versus-baseline deltas and trade-off narrative

use serde::Serialize;

use super::kpis::Kpis;
use crate::format::format_currency;
use crate::projection::YearRow;

/// How a scenario differs from the baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    /// Positive means the scenario reaches enough later
    pub delta_years_to_enough: Option<i64>,
    pub delta_years_to_coast: Option<i64>,
    pub delta_retirement_net_worth: Option<f64>,
    /// Sum over the horizon of scenario minus baseline work income
    pub total_income_change: f64,
    pub total_expense_change: f64,
    /// First pre-retirement year with no income where the baseline had some
    pub year_off: Option<u32>,
}

/// Which difference dominates, checked in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tradeoff {
    /// The scenario is the baseline itself
    Baseline,
    EnoughLater { years: u32, year_off: Option<u32> },
    EnoughSooner { years: u32, year_off: Option<u32>, driver: Driver },
    CoastLater { years: u32, year_off: Option<u32> },
    CoastSooner { years: u32, year_off: Option<u32> },
    LessAtRetirement { amount: f64, year_off: Option<u32>, spends_more: bool },
    MoreAtRetirement { amount: f64, earns_more: bool },
    YearOff { year: u32 },
    Similar,
}

/// What made a faster path possible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    EarningMore,
    SpendingLess,
    Mixed,
}

/// Compare a scenario's rows and KPIs against the baseline's
pub fn compare_to_baseline(
    scenario_rows: &[YearRow],
    scenario_kpis: &Kpis,
    baseline_rows: &[YearRow],
    baseline_kpis: &Kpis,
    years_until_retirement: u32,
) -> ScenarioComparison {
    let delta = |a: Option<u32>, b: Option<u32>| match (a, b) {
        (Some(a), Some(b)) => Some(a as i64 - b as i64),
        _ => None,
    };

    let baseline_at = |index: usize| baseline_rows.get(index);
    let total_income_change = scenario_rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.work_income - baseline_at(i).map_or(0.0, |b| b.work_income))
        .sum();
    let total_expense_change = scenario_rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.expenses - baseline_at(i).map_or(0.0, |b| b.expenses))
        .sum();

    let year_off = scenario_rows
        .iter()
        .enumerate()
        .find(|(i, row)| {
            row.year < years_until_retirement
                && row.work_income == 0.0
                && baseline_at(*i).is_some_and(|b| b.work_income > 0.0)
        })
        .map(|(_, row)| row.year);

    ScenarioComparison {
        delta_years_to_enough: delta(scenario_kpis.years_to_enough, baseline_kpis.years_to_enough),
        delta_years_to_coast: delta(scenario_kpis.years_to_coast, baseline_kpis.years_to_coast),
        delta_retirement_net_worth: match (scenario_kpis.retirement_net_worth, baseline_kpis.retirement_net_worth) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        },
        total_income_change,
        total_expense_change,
        year_off,
    }
}

impl ScenarioComparison {
    /// Pick the dominating difference: enough timing, then coast timing,
    /// then retirement net worth, then a year off
    pub fn tradeoff(&self, is_baseline: bool) -> Tradeoff {
        if is_baseline {
            return Tradeoff::Baseline;
        }
        let year_off = self.year_off;

        if let Some(delta) = self.delta_years_to_enough.filter(|d| *d != 0) {
            let years = delta.unsigned_abs() as u32;
            if delta > 0 {
                return Tradeoff::EnoughLater { years, year_off };
            }
            let driver = if self.total_income_change > 0.0 && self.total_expense_change <= 0.0 {
                Driver::EarningMore
            } else if self.total_expense_change < 0.0 && self.total_income_change <= 0.0 {
                Driver::SpendingLess
            } else {
                Driver::Mixed
            };
            return Tradeoff::EnoughSooner { years, year_off, driver };
        }

        if let Some(delta) = self.delta_years_to_coast.filter(|d| *d != 0) {
            let years = delta.unsigned_abs() as u32;
            return if delta > 0 {
                Tradeoff::CoastLater { years, year_off }
            } else {
                Tradeoff::CoastSooner { years, year_off }
            };
        }

        if let Some(delta) = self.delta_retirement_net_worth.filter(|d| *d != 0.0) {
            return if delta < 0.0 {
                Tradeoff::LessAtRetirement {
                    amount: -delta,
                    year_off,
                    spends_more: self.total_expense_change > 0.0,
                }
            } else {
                Tradeoff::MoreAtRetirement {
                    amount: delta,
                    earns_more: self.total_income_change > 0.0,
                }
            };
        }

        match year_off {
            Some(year) => Tradeoff::YearOff { year },
            None => Tradeoff::Similar,
        }
    }
}

impl Tradeoff {
    /// One-sentence narrative for display next to the KPIs
    pub fn summary(&self) -> String {
        match *self {
            Tradeoff::Baseline => "This is the default balance of time and money.".to_string(),
            Tradeoff::EnoughLater { years, year_off: Some(year) } => format!(
                "You reach enough to quit {} later but take {} off, gaining time to reset now while still building toward independence.",
                year_span(years),
                year_label(year)
            ),
            Tradeoff::EnoughLater { years, year_off: None } => format!(
                "You reach enough to quit {} later, gaining room to earn less, change what you work on, or take a reset.",
                year_span(years)
            ),
            Tradeoff::EnoughSooner { years, year_off: Some(year), .. } => format!(
                "You reach enough to quit {} sooner even with {} off, gaining both time now and independence earlier.",
                year_span(years),
                year_label(year)
            ),
            Tradeoff::EnoughSooner { years, driver: Driver::EarningMore, .. } => format!(
                "You reach enough to quit {} sooner by earning more while holding expenses steady.",
                year_span(years)
            ),
            Tradeoff::EnoughSooner { years, driver: Driver::SpendingLess, .. } => format!(
                "You reach enough to quit {} sooner by spending less, on a lifestyle you can sustain.",
                year_span(years)
            ),
            Tradeoff::EnoughSooner { years, driver: Driver::Mixed, .. } => format!(
                "You reach enough to quit {} sooner, shortening the path to financial independence.",
                year_span(years)
            ),
            Tradeoff::CoastLater { years, year_off: Some(year) } => format!(
                "You reach coast {} later but take {} off while keeping your path to security.",
                year_span(years),
                year_label(year)
            ),
            Tradeoff::CoastLater { years, year_off: None } => format!(
                "You reach coast {} later, with more flexibility in how you earn along the way.",
                year_span(years)
            ),
            Tradeoff::CoastSooner { years, year_off: Some(year) } => format!(
                "You reach coast {} sooner even with {} off, gaining time now and security earlier.",
                year_span(years),
                year_label(year)
            ),
            Tradeoff::CoastSooner { years, year_off: None } => format!(
                "You reach coast {} sooner, so lower-paying meaningful work becomes an option earlier.",
                year_span(years)
            ),
            Tradeoff::LessAtRetirement { amount, year_off: Some(year), .. } => format!(
                "You retire with {} less because you take {} off, in exchange for rest when you need it.",
                format_currency(amount),
                year_label(year)
            ),
            Tradeoff::LessAtRetirement { amount, spends_more: true, .. } => format!(
                "You retire with {} less in exchange for a higher quality of life while working.",
                format_currency(amount)
            ),
            Tradeoff::LessAtRetirement { amount, .. } => format!(
                "You retire with {} less and more room to breathe now.",
                format_currency(amount)
            ),
            Tradeoff::MoreAtRetirement { amount, earns_more: true } => format!(
                "You retire with {} more from higher earnings, a bigger cushion for surprises or legacy goals.",
                format_currency(amount)
            ),
            Tradeoff::MoreAtRetirement { amount, earns_more: false } => format!(
                "You retire with {} more, a bigger cushion later.",
                format_currency(amount)
            ),
            Tradeoff::YearOff { year } => format!(
                "You take {} off to reset, explore, or focus on what matters beyond work.",
                year_label(year)
            ),
            Tradeoff::Similar => {
                "This scenario mixes work and spending differently while tracking similar outcomes.".to_string()
            }
        }
    }
}

fn year_span(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{} years", years)
    }
}

fn year_label(year: u32) -> String {
    if year == 1 {
        "this year".to_string()
    } else {
        format!("year {}", year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::GlobalInputs;
    use crate::milestones::compute_kpis;
    use crate::plan::{Scenario, Segment};
    use crate::projection::simulate;

    fn comparison() -> ScenarioComparison {
        ScenarioComparison {
            delta_years_to_enough: None,
            delta_years_to_coast: None,
            delta_retirement_net_worth: None,
            total_income_change: 0.0,
            total_expense_change: 0.0,
            year_off: None,
        }
    }

    #[test]
    fn test_sabbatical_against_baseline() {
        let inputs = GlobalInputs {
            projection_years: 12,
            years_until_retirement: 10,
            ..Default::default()
        };
        let baseline = Scenario::new("baseline", "Baseline", vec![Segment::new("b", 1, 12, 200_000.0, 150_000.0)]);
        let sabbatical = Scenario::new(
            "sabbatical",
            "Sabbatical",
            vec![
                Segment::new("a", 1, 2, 200_000.0, 150_000.0),
                Segment::new("gap", 3, 3, 0.0, 150_000.0),
                Segment::new("c", 4, 12, 200_000.0, 150_000.0),
            ],
        );
        let base_rows = simulate(&inputs, &baseline);
        let sab_rows = simulate(&inputs, &sabbatical);
        let comparison = compare_to_baseline(
            &sab_rows,
            &compute_kpis(&inputs, &sab_rows),
            &base_rows,
            &compute_kpis(&inputs, &base_rows),
            inputs.years_until_retirement,
        );

        assert_eq!(comparison.year_off, Some(3));
        assert_eq!(comparison.total_income_change, -200_000.0);
        assert_eq!(comparison.total_expense_change, 0.0);
        assert!(comparison.delta_retirement_net_worth.unwrap() < 0.0);
    }

    #[test]
    fn test_enough_timing_takes_priority() {
        let comparison = ScenarioComparison {
            delta_years_to_enough: Some(-2),
            delta_years_to_coast: Some(5),
            delta_retirement_net_worth: Some(-1.0),
            total_expense_change: -10_000.0,
            ..comparison()
        };
        assert_eq!(
            comparison.tradeoff(false),
            Tradeoff::EnoughSooner { years: 2, year_off: None, driver: Driver::SpendingLess }
        );
        assert!(comparison.tradeoff(false).summary().starts_with("You reach enough to quit 2 years sooner by spending less"));
    }

    #[test]
    fn test_falls_through_to_coast_then_net_worth_then_year_off() {
        let coast = ScenarioComparison {
            delta_years_to_enough: Some(0),
            delta_years_to_coast: Some(1),
            year_off: Some(4),
            ..comparison()
        };
        assert_eq!(coast.tradeoff(false), Tradeoff::CoastLater { years: 1, year_off: Some(4) });
        assert_eq!(
            coast.tradeoff(false).summary(),
            "You reach coast 1 year later but take year 4 off while keeping your path to security."
        );

        let worth = ScenarioComparison {
            delta_retirement_net_worth: Some(25_000.0),
            total_income_change: 30_000.0,
            ..comparison()
        };
        assert_eq!(worth.tradeoff(false), Tradeoff::MoreAtRetirement { amount: 25_000.0, earns_more: true });
        assert!(worth.tradeoff(false).summary().contains("$25,000 more"));

        let off = ScenarioComparison {
            year_off: Some(1),
            ..comparison()
        };
        assert_eq!(off.tradeoff(false).summary(), "You take this year off to reset, explore, or focus on what matters beyond work.");
        assert_eq!(comparison().tradeoff(false), Tradeoff::Similar);
    }

    #[test]
    fn test_baseline_short_circuits() {
        let comparison = ScenarioComparison {
            delta_years_to_enough: Some(3),
            ..comparison()
        };
        assert_eq!(comparison.tradeoff(true), Tradeoff::Baseline);
    }
}

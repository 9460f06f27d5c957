//! Core year-by-year projection engine

use super::rows::{ProjectionResult, YearRow};
use super::state::ProjectionState;
use crate::assumptions::GlobalInputs;
use crate::milestones::security_number_at_year;
use crate::plan::{resolve_year_plans, Scenario, YearPlan};

/// Main projection engine
///
/// Holds no state between runs: every call resolves the segments and walks
/// the whole horizon again.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    inputs: GlobalInputs,
}

impl ProjectionEngine {
    /// Create a new projection engine for an assumption set
    pub fn new(inputs: GlobalInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &GlobalInputs {
        &self.inputs
    }

    /// Resolve and simulate one scenario
    pub fn project_scenario(&self, scenario: &Scenario) -> ProjectionResult {
        let (plans, issues) = resolve_year_plans(&self.inputs, &scenario.segments);
        if !issues.is_empty() {
            log::warn!(
                "scenario \"{}\" has {} segment issues; resolving with first-claim-wins",
                scenario.id,
                issues.len()
            );
        }

        let mut result = ProjectionResult::new(scenario.id.clone());
        for row in self.project_plans(&plans) {
            result.add_row(row);
        }
        result.issues = issues;

        log::debug!(
            "projected scenario \"{}\" over {} years",
            scenario.id,
            result.rows.len()
        );
        result
    }

    /// Simulate an already-resolved plan; `plans[0]` is year 1
    pub fn project_plans(&self, plans: &[YearPlan]) -> Vec<YearRow> {
        let mut state = ProjectionState::from_inputs(&self.inputs);
        let mut rows = Vec::with_capacity(plans.len());

        for plan in plans {
            state.advance_year();
            let row = self.calculate_year(&state, plan);
            state.carry_forward(row.end_total_nw, row.end_accessible_nw);
            rows.push(row);
        }

        rows
    }

    /// One simple annual step: growth on opening balances, then net savings
    ///
    /// Negative savings are absorbed arithmetically; balances are never
    /// clamped and may go negative.
    fn calculate_year(&self, state: &ProjectionState, plan: &YearPlan) -> YearRow {
        let inputs = &self.inputs;
        let start_total_nw = state.total_nw;
        let start_accessible_nw = state.accessible_nw;

        let work_income = plan.work_income;
        let expenses = plan.expenses;
        let savings = work_income - expenses;

        // restricted share is capped by income and never exceeds actual savings
        let restricted_savings = if savings > 0.0 {
            savings.min(work_income * inputs.restricted_savings_rate)
        } else {
            0.0
        };
        let accessible_savings = savings - restricted_savings;

        let growth_total = start_total_nw * inputs.nominal_return;
        let growth_accessible = start_accessible_nw * inputs.nominal_return;
        let withdrawal_needed = (-savings).max(0.0);

        // total absorbs all savings, accessible only its share
        let end_total_nw = start_total_nw + growth_total + savings;
        let end_accessible_nw = start_accessible_nw + growth_accessible + accessible_savings;

        YearRow {
            year: state.year,
            start_total_nw,
            start_accessible_nw,
            work_income,
            expenses,
            savings,
            restricted_savings,
            accessible_savings,
            growth_total,
            growth_accessible,
            withdrawal_needed,
            end_total_nw,
            end_accessible_nw,
            capital_income_total: start_total_nw * inputs.safe_withdrawal_rate,
            capital_income_accessible: start_accessible_nw * inputs.safe_withdrawal_rate,
            coast_fire_number: security_number_at_year(inputs, state.year),
        }
    }
}

/// Simulate a scenario over the full horizon
pub fn simulate(inputs: &GlobalInputs, scenario: &Scenario) -> Vec<YearRow> {
    compute_scenario(inputs, scenario).rows
}

/// Simulate a scenario and keep its segment issues alongside the rows
pub fn compute_scenario(inputs: &GlobalInputs, scenario: &Scenario) -> ProjectionResult {
    ProjectionEngine::new(inputs.clone()).project_scenario(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Segment;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn example_inputs() -> GlobalInputs {
        GlobalInputs {
            projection_years: 5,
            years_until_retirement: 5,
            starting_total_nw: 100_000.0,
            starting_accessible_nw: 100_000.0,
            nominal_return: 0.07,
            inflation: 0.0,
            fees: 0.0,
            safe_withdrawal_rate: 0.04,
            retirement_spending: 40_000.0,
            restricted_savings_rate: 0.0,
            current_year_income: 40_000.0,
        }
    }

    fn break_even_scenario() -> Scenario {
        Scenario::new("flat", "Flat", vec![Segment::new("s1", 1, 5, 40_000.0, 40_000.0)])
    }

    #[test]
    fn test_zero_savings_compounds_nominal_return() {
        let rows = simulate(&example_inputs(), &break_even_scenario());

        assert_eq!(rows.len(), 5);
        assert_relative_eq!(rows[0].growth_total, 7_000.0, max_relative = 1e-12);
        assert_relative_eq!(rows[0].end_total_nw, 107_000.0, max_relative = 1e-12);
        assert_eq!(rows[0].savings, 0.0);
        assert_eq!(rows[0].withdrawal_needed, 0.0);

        for (index, row) in rows.iter().enumerate() {
            let expected = 100_000.0 * 1.07f64.powi(index as i32 + 1);
            assert_relative_eq!(row.end_total_nw, expected, max_relative = 1e-12);
            assert_relative_eq!(row.end_accessible_nw, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_rows_are_numbered_and_chained() {
        let rows = simulate(&example_inputs(), &break_even_scenario());
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row.year, index as u32 + 1);
        }
        for pair in rows.windows(2) {
            assert_eq!(pair[0].end_total_nw, pair[1].start_total_nw);
            assert_eq!(pair[0].end_accessible_nw, pair[1].start_accessible_nw);
        }
        assert_eq!(rows[0].start_total_nw, 100_000.0);
    }

    #[test]
    fn test_restricted_savings_capped_by_income_share() {
        let mut inputs = example_inputs();
        inputs.restricted_savings_rate = 0.1;
        let scenario = Scenario::new("s", "S", vec![Segment::new("a", 1, 5, 100_000.0, 60_000.0)]);
        let row = &simulate(&inputs, &scenario)[0];

        assert_eq!(row.savings, 40_000.0);
        assert_eq!(row.restricted_savings, 10_000.0);
        assert_eq!(row.accessible_savings, 30_000.0);
        assert_relative_eq!(row.end_total_nw, 100_000.0 + 7_000.0 + 40_000.0, max_relative = 1e-12);
        assert_relative_eq!(row.end_accessible_nw, 100_000.0 + 7_000.0 + 30_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_restricted_savings_never_exceed_savings() {
        let mut inputs = example_inputs();
        inputs.restricted_savings_rate = 0.5;
        let scenario = Scenario::new("s", "S", vec![Segment::new("a", 1, 5, 100_000.0, 95_000.0)]);
        let row = &simulate(&inputs, &scenario)[0];

        assert_eq!(row.restricted_savings, 5_000.0);
        assert_eq!(row.accessible_savings, 0.0);
    }

    #[test]
    fn test_shortfall_reduces_both_buckets_without_clamping() {
        let mut inputs = example_inputs();
        inputs.nominal_return = 0.0;
        inputs.starting_total_nw = 50_000.0;
        inputs.starting_accessible_nw = 20_000.0;
        inputs.restricted_savings_rate = 0.2;
        let scenario = Scenario::new("s", "S", vec![]);
        let rows = simulate(&inputs, &scenario);

        assert_eq!(rows[0].savings, -40_000.0);
        assert_eq!(rows[0].withdrawal_needed, 40_000.0);
        assert_eq!(rows[0].restricted_savings, 0.0);
        assert_eq!(rows[0].end_accessible_nw, -20_000.0);
        assert_eq!(rows[1].end_total_nw, -30_000.0);
        assert_eq!(rows[4].end_accessible_nw, -180_000.0);
    }

    #[test]
    fn test_capital_income_and_coast_number_use_opening_balances() {
        let rows = simulate(&example_inputs(), &break_even_scenario());
        assert_relative_eq!(rows[0].capital_income_total, 4_000.0, max_relative = 1e-12);
        assert_relative_eq!(rows[1].capital_income_accessible, 107_000.0 * 0.04, max_relative = 1e-12);
        // real return 7%, 5 years to go in year 1
        assert_relative_eq!(
            rows[0].coast_fire_number,
            1_000_000.0 / 1.07f64.powi(5),
            max_relative = 1e-12
        );
        assert_relative_eq!(rows[4].coast_fire_number, 1_000_000.0 / 1.07, max_relative = 1e-12);
    }

    #[test]
    fn test_compute_scenario_keeps_issues() {
        let scenario = Scenario::new(
            "s",
            "S",
            vec![
                Segment::new("a", 1, 3, 10.0, 10.0),
                Segment::new("b", 3, 5, 20.0, 20.0),
            ],
        );
        let result = compute_scenario(&example_inputs(), &scenario);
        assert_eq!(result.scenario_id, "s");
        assert_eq!(result.rows.len(), 5);
        assert_eq!(result.issues, vec!["Year 3 overlaps between segment \"a\" and \"b\"."]);
        assert_eq!(result.rows[2].work_income, 10.0);
        let (plans, _) = crate::plan::resolve_year_plans(&example_inputs(), &scenario.segments);
        assert_eq!(result.rows, ProjectionEngine::new(example_inputs()).project_plans(&plans));
    }

    #[test]
    fn test_summary_totals() {
        let mut inputs = example_inputs();
        inputs.nominal_return = 0.0;
        let scenario = Scenario::new("s", "S", vec![Segment::new("a", 1, 2, 50_000.0, 30_000.0)]);
        let summary = compute_scenario(&inputs, &scenario).summary();

        assert_eq!(summary.total_years, 5);
        assert_eq!(summary.total_work_income, 100_000.0);
        assert_eq!(summary.total_expenses, 60_000.0 + 3.0 * 40_000.0);
        assert_eq!(summary.shortfall_years, 3);
        assert_eq!(summary.final_total_nw, 100_000.0 + 40_000.0 - 120_000.0);
        assert_eq!(summary.min_accessible_nw, Some(20_000.0));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_simulation_is_deterministic_and_chained(
            years in 1u32..60,
            total in 0u32..3_000_000,
            accessible_pct in 0u32..=100,
            return_bp in 0u32..1500,
            restricted_bp in 0u32..5000,
            income in 0u32..500_000,
            expenses in 0u32..300_000,
            split in 1i32..60,
        ) {
            let inputs = GlobalInputs {
                projection_years: years,
                starting_total_nw: total as f64,
                starting_accessible_nw: total as f64 * accessible_pct as f64 / 100.0,
                nominal_return: return_bp as f64 / 10_000.0,
                restricted_savings_rate: restricted_bp as f64 / 10_000.0,
                ..Default::default()
            };
            let scenario = Scenario::new("p", "P", vec![
                Segment::new("work", 1, split, income as f64, expenses as f64),
                Segment::new("rest", split + 1, 80, 0.0, expenses as f64),
            ]);

            let first = simulate(&inputs, &scenario);
            let second = simulate(&inputs, &scenario);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), years as usize);

            for pair in first.windows(2) {
                prop_assert_eq!(pair[0].end_total_nw, pair[1].start_total_nw);
                prop_assert_eq!(pair[0].end_accessible_nw, pair[1].start_accessible_nw);
            }
            for row in &first {
                prop_assert!(row.restricted_savings >= 0.0);
                prop_assert!(row.restricted_savings <= row.savings.max(0.0));
                prop_assert!(row.withdrawal_needed >= 0.0);
            }
        }

        #[test]
        fn prop_empty_scenario_uses_default_fill(
            years in 1u32..80,
            spending in 0u32..400_000,
        ) {
            let inputs = GlobalInputs {
                projection_years: years,
                retirement_spending: spending as f64,
                ..Default::default()
            };
            let rows = simulate(&inputs, &Scenario::new("empty", "Empty", vec![]));
            prop_assert_eq!(rows.len(), years as usize);
            for row in rows {
                prop_assert_eq!(row.work_income, 0.0);
                prop_assert_eq!(row.expenses, spending as f64);
            }
        }
    }
}

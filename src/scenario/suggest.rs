//! Quick-edit suggestions that rewrite an existing projection's income or
//! expense column and turn the result into a new scenario

use crate::assumptions::GlobalInputs;
use crate::plan::{PlanSource, YearPlan};
use crate::projection::YearRow;

/// Year range and multiplier shared by both suggestion modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionParams {
    pub reduce_start_year: i64,
    pub reduce_end_year: i64,
    /// Fraction of current income kept inside the reduced range
    pub reduce_multiplier: f64,
    /// First year with no work income at all
    pub zero_income_after_year: i64,
}

impl Default for SuggestionParams {
    fn default() -> Self {
        Self {
            reduce_start_year: 3,
            reduce_end_year: 10,
            reduce_multiplier: 0.67,
            zero_income_after_year: 11,
        }
    }
}

/// Parameters clamped to the projection horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSuggestion {
    pub reduce_start_year: u32,
    pub reduce_end_year: u32,
    pub reduce_multiplier: f64,
    pub zero_income_after_year: u32,
}

impl SuggestionParams {
    pub fn normalize(&self, projection_years: u32) -> NormalizedSuggestion {
        let max_year = projection_years.max(1) as i64;
        let reduce_start_year = self.reduce_start_year.clamp(1, max_year);
        let reduce_end_year = self.reduce_end_year.clamp(reduce_start_year, max_year);
        let zero_income_after_year = self.zero_income_after_year.clamp(1, max_year + 1);
        let reduce_multiplier = if self.reduce_multiplier.is_nan() {
            0.0
        } else {
            self.reduce_multiplier.clamp(0.0, 1.0)
        };

        NormalizedSuggestion {
            reduce_start_year: reduce_start_year as u32,
            reduce_end_year: reduce_end_year as u32,
            reduce_multiplier,
            zero_income_after_year: zero_income_after_year as u32,
        }
    }
}

/// Spending level from `start_year` on; `None` falls back to the base expense
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseRule {
    pub start_year: u32,
    pub expense_value: Option<f64>,
}

/// Which column a suggestion rewrites
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionMode {
    /// Current income, scaled down inside the range and zeroed afterwards
    Income,
    /// Base expense with optional inflation growth and step rules
    Expenses {
        base: Option<f64>,
        inflation: bool,
        reduce: bool,
        rules: Vec<ExpenseRule>,
    },
}

/// Rewrite `rows` into a per-year plan; the untouched column is kept as is
pub fn suggest_plans(
    inputs: &GlobalInputs,
    rows: &[YearRow],
    params: &SuggestionParams,
    mode: &SuggestionMode,
) -> Vec<YearPlan> {
    let normalized = params.normalize(inputs.projection_years);

    rows.iter()
        .map(|row| {
            let (work_income, expenses) = match mode {
                SuggestionMode::Income => (suggested_income(inputs, &normalized, row.year), row.expenses),
                SuggestionMode::Expenses { base, inflation, reduce, rules } => {
                    let base = base.filter(|v| v.is_finite()).unwrap_or(inputs.retirement_spending);
                    let rules = effective_rules(&normalized, *reduce, rules);
                    (row.work_income, suggested_expense(inputs, base, *inflation, &rules, row.year))
                }
            };
            YearPlan {
                work_income,
                expenses,
                source: PlanSource::Segment,
            }
        })
        .collect()
}

fn suggested_income(inputs: &GlobalInputs, params: &NormalizedSuggestion, year: u32) -> f64 {
    if year >= params.zero_income_after_year {
        return 0.0;
    }
    let income = inputs.current_year_income;
    if (params.reduce_start_year..=params.reduce_end_year).contains(&year) {
        (income * params.reduce_multiplier).round()
    } else {
        income
    }
}

/// Rules sorted by start year; an enabled reduction with no rules gets one
/// open rule at the range start
fn effective_rules(params: &NormalizedSuggestion, reduce: bool, rules: &[ExpenseRule]) -> Vec<ExpenseRule> {
    if !reduce {
        return Vec::new();
    }
    if rules.is_empty() {
        return vec![ExpenseRule {
            start_year: params.reduce_start_year,
            expense_value: None,
        }];
    }
    let mut sorted = rules.to_vec();
    sorted.sort_by_key(|rule| rule.start_year);
    sorted
}

fn suggested_expense(inputs: &GlobalInputs, base: f64, inflation: bool, rules: &[ExpenseRule], year: u32) -> f64 {
    let active = rules.iter().filter(|rule| rule.start_year <= year).last();
    let rule_year = active.map_or(1, |rule| rule.start_year);
    let value = active
        .and_then(|rule| rule.expense_value)
        .filter(|v| v.is_finite())
        .unwrap_or(base);

    let factor = if inflation {
        (1.0 + inputs.inflation).powi(year.saturating_sub(rule_year) as i32)
    } else {
        1.0
    };
    (value * factor).round()
}

/// Display name for a suggested scenario
pub fn suggestion_name(params: &NormalizedSuggestion, mode: &SuggestionMode) -> String {
    match mode {
        SuggestionMode::Income => format!(
            "Income {}-{} @ {}% + 0 after {}",
            params.reduce_start_year,
            params.reduce_end_year,
            (params.reduce_multiplier * 100.0).round(),
            params.zero_income_after_year
        ),
        SuggestionMode::Expenses { inflation, reduce, .. } => format!(
            "Expenses{} after {}{}",
            if *inflation { " (inflation)" } else { "" },
            params.reduce_start_year,
            if *reduce { " + reductions" } else { "" }
        ),
    }
}

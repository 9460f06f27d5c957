//! Canonical preset segments, scaled to the user's own numbers

use crate::assumptions::{GlobalInputs, DEFAULT_CURRENT_YEAR_INCOME, DEFAULT_RETIREMENT_SPENDING};
use crate::plan::Segment;

/// Canonical baseline: (start, end, income, expenses)
const BASELINE_TEMPLATE: [(i32, i32, f64, f64); 4] = [
    (1, 2, 403_000.0, 216_000.0),
    (3, 8, 403_000.0, 204_000.0),
    (9, 11, 403_000.0, 180_000.0),
    (12, 40, 0.0, 180_000.0),
];

/// Ratio of live income and spending to the canonical defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateScale {
    pub income: f64,
    pub expenses: f64,
}

impl TemplateScale {
    pub fn from_inputs(inputs: &GlobalInputs) -> Self {
        Self {
            income: ratio(inputs.current_year_income, DEFAULT_CURRENT_YEAR_INCOME),
            expenses: ratio(inputs.retirement_spending, DEFAULT_RETIREMENT_SPENDING),
        }
    }

    /// Scale a canonical income to whole currency units
    pub fn income(&self, canonical: f64) -> f64 {
        (canonical * self.income).round()
    }

    /// Scale a canonical expense to whole currency units
    pub fn expenses(&self, canonical: f64) -> f64 {
        (canonical * self.expenses).round()
    }
}

fn ratio(live: f64, canonical: f64) -> f64 {
    if canonical > 0.0 {
        live / canonical
    } else {
        1.0
    }
}

/// Baseline template segments with ids `"{prefix}-N"`
pub fn baseline_segments(scale: &TemplateScale, prefix: &str) -> Vec<Segment> {
    BASELINE_TEMPLATE
        .iter()
        .enumerate()
        .map(|(index, &(start, end, income, expenses))| {
            Segment::new(
                format!("{}-{}", prefix, index + 1),
                start,
                end,
                scale.income(income),
                scale.expenses(expenses),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_reproduce_template() {
        let scale = TemplateScale::from_inputs(&GlobalInputs::default());
        let segments = baseline_segments(&scale, "baseline");

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::new("baseline-1", 1, 2, 403_000.0, 216_000.0));
        assert_eq!(segments[3], Segment::new("baseline-4", 12, 40, 0.0, 180_000.0));
    }

    #[test]
    fn test_scaling_rounds_to_whole_units() {
        let inputs = GlobalInputs {
            current_year_income: 200_000.0,
            retirement_spending: 90_000.0,
            ..Default::default()
        };
        let scale = TemplateScale::from_inputs(&inputs);
        let segments = baseline_segments(&scale, "b");

        assert_eq!(segments[0].annual_work_income, 200_000.0);
        assert_eq!(segments[0].annual_expenses, 108_000.0);
        assert_eq!(segments[1].annual_expenses, 102_000.0);
        assert_eq!(scale.income(268_667.0), (268_667.0_f64 * 200_000.0 / 403_000.0).round());
    }
}

//! Resolve sparse segments into a dense per-year plan

use serde::Serialize;

use super::segment::Segment;
use super::validate::{sorted_by_start, validate_segments};
use crate::assumptions::GlobalInputs;

/// Where a resolved year's figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// No segment covers the year: zero income, baseline spending
    Default,
    /// Claimed by the first segment (in start-year order) covering it
    Segment,
}

/// Resolved income and expenses for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPlan {
    pub work_income: f64,
    pub expenses: f64,
    pub source: PlanSource,
}

impl YearPlan {
    fn default_fill(inputs: &GlobalInputs) -> Self {
        Self {
            work_income: 0.0,
            expenses: inputs.retirement_spending,
            source: PlanSource::Default,
        }
    }
}

/// Build one plan per year `1..=projection_years`
///
/// Segments are visited in start-year order (stable for ties) and each year
/// inside `[1, projection_years]` goes to the first segment that reaches it.
/// Later overlapping segments are ignored for already-claimed years; the
/// overlap itself is reported through the returned issues.
pub fn resolve_year_plans(inputs: &GlobalInputs, segments: &[Segment]) -> (Vec<YearPlan>, Vec<String>) {
    let issues = validate_segments(segments);
    let horizon = inputs.projection_years as i64;
    let mut plans = vec![YearPlan::default_fill(inputs); inputs.projection_years as usize];

    for segment in sorted_by_start(segments) {
        let first = (segment.start_year as i64).max(1);
        let last = (segment.end_year as i64).min(horizon);
        for year in first..=last {
            let slot = &mut plans[(year - 1) as usize];
            if slot.source == PlanSource::Segment {
                continue;
            }
            *slot = YearPlan {
                work_income: segment.annual_work_income,
                expenses: segment.annual_expenses,
                source: PlanSource::Segment,
            };
        }
    }

    log::debug!(
        "resolved {} segments into {} year plans ({} issues)",
        segments.len(),
        plans.len(),
        issues.len()
    );

    (plans, issues)
}

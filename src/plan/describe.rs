//! Segment summaries, normalized comparison and plan compression

use std::cmp::Ordering;

use super::resolver::YearPlan;
use super::segment::Segment;
use super::validate::sorted_by_start;
use crate::format::format_currency;

/// Ranges listed before the summary collapses into a count
const MAX_DESCRIBED_RANGES: usize = 5;

/// One-paragraph, human-readable summary of a segment list
///
/// Adjacent segments with identical income and expenses are merged first.
pub fn describe_segments(segments: &[Segment]) -> String {
    let mut merged: Vec<Segment> = Vec::new();
    for segment in sorted_by_start(segments) {
        if let Some(last) = merged.last_mut() {
            if last.end_year.checked_add(1) == Some(segment.start_year)
                && last.annual_work_income == segment.annual_work_income
                && last.annual_expenses == segment.annual_expenses
            {
                last.end_year = segment.end_year;
                continue;
            }
        }
        merged.push(segment.clone());
    }

    let summary = merged
        .iter()
        .take(MAX_DESCRIBED_RANGES)
        .map(|segment| {
            let range = if segment.start_year == segment.end_year {
                format!("Year {}", segment.start_year)
            } else {
                format!("Years {}-{}", segment.start_year, segment.end_year)
            };
            format!(
                "{}: work income {}, expenses {}.",
                range,
                format_currency(segment.annual_work_income),
                format_currency(segment.annual_expenses)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let remaining = merged.len().saturating_sub(MAX_DESCRIBED_RANGES);
    if remaining == 0 {
        return summary;
    }
    let last_year = merged.last().map(|s| s.end_year).unwrap_or(0);
    format!("{} + {} more segments through year {}.", summary, remaining, last_year)
}

/// Segment fields without ids, in a canonical order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSegment {
    pub start_year: i32,
    pub end_year: i32,
    pub annual_work_income: f64,
    pub annual_expenses: f64,
}

/// Strip ids and sort by (start, end, income, expenses)
pub fn normalize_segments(segments: &[Segment]) -> Vec<NormalizedSegment> {
    let mut normalized: Vec<NormalizedSegment> = segments
        .iter()
        .map(|s| NormalizedSegment {
            start_year: s.start_year,
            end_year: s.end_year,
            annual_work_income: s.annual_work_income,
            annual_expenses: s.annual_expenses,
        })
        .collect();
    normalized.sort_by(|a, b| {
        a.start_year
            .cmp(&b.start_year)
            .then(a.end_year.cmp(&b.end_year))
            .then(a.annual_work_income.partial_cmp(&b.annual_work_income).unwrap_or(Ordering::Equal))
            .then(a.annual_expenses.partial_cmp(&b.annual_expenses).unwrap_or(Ordering::Equal))
    });
    normalized
}

/// Field-wise equality of two segment lists, ignoring ids and order
pub fn segments_match(left: &[Segment], right: &[Segment]) -> bool {
    left.len() == right.len() && normalize_segments(left) == normalize_segments(right)
}

/// Compress consecutive years with equal income and expenses into segments
///
/// `plans[0]` is year 1. Each produced segment takes its id from `next_id`.
pub fn plans_to_segments(plans: &[YearPlan], mut next_id: impl FnMut() -> String) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (index, plan) in plans.iter().enumerate() {
        let year = index as i32 + 1;
        if let Some(current) = segments.last_mut() {
            if current.annual_work_income == plan.work_income && current.annual_expenses == plan.expenses {
                current.end_year = year;
                continue;
            }
        }
        segments.push(Segment::new(next_id(), year, year, plan.work_income, plan.expenses));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::resolver::PlanSource;

    fn plan(income: f64, expenses: f64) -> YearPlan {
        YearPlan {
            work_income: income,
            expenses,
            source: PlanSource::Segment,
        }
    }

    #[test]
    fn test_describe_merges_adjacent_equal_segments() {
        let segments = vec![
            Segment::new("b", 3, 4, 100_000.0, 50_000.0),
            Segment::new("a", 1, 2, 100_000.0, 50_000.0),
            Segment::new("c", 5, 5, 0.0, 40_000.0),
        ];
        assert_eq!(
            describe_segments(&segments),
            "Years 1-4: work income $100,000, expenses $50,000. Year 5: work income $0, expenses $40,000."
        );
    }

    #[test]
    fn test_describe_collapses_long_lists() {
        let segments: Vec<Segment> = (1..=7)
            .map(|year| Segment::new(format!("s{year}"), year, year, year as f64 * 1000.0, 0.0))
            .collect();
        let description = describe_segments(&segments);
        assert!(description.starts_with("Year 1: work income $1,000, expenses $0."));
        assert!(description.ends_with(" + 2 more segments through year 7."));
        assert!(!description.contains("Year 6:"));
    }

    #[test]
    fn test_describe_handles_end_year_at_i32_max() {
        let segments = vec![
            Segment::new("wide", 1, i32::MAX, 0.0, 0.0),
            Segment::new("inner", 2, 3, 0.0, 0.0),
        ];
        let description = describe_segments(&segments);
        assert!(description.starts_with(&format!("Years 1-{}:", i32::MAX)));
        assert!(description.contains("Years 2-3:"));
    }

    #[test]
    fn test_describe_empty_is_empty() {
        assert_eq!(describe_segments(&[]), "");
    }

    #[test]
    fn test_segments_match_ignores_ids_and_order() {
        let left = vec![
            Segment::new("x1", 1, 3, 10.0, 5.0),
            Segment::new("x2", 4, 9, 0.0, 5.0),
        ];
        let right = vec![
            Segment::new("y2", 4, 9, 0.0, 5.0),
            Segment::new("y1", 1, 3, 10.0, 5.0),
        ];
        assert!(segments_match(&left, &right));

        let changed = vec![
            Segment::new("y2", 4, 9, 0.0, 5.0),
            Segment::new("y1", 1, 3, 11.0, 5.0),
        ];
        assert!(!segments_match(&left, &changed));
        assert!(!segments_match(&left, &right[..1]));
    }

    #[test]
    fn test_plans_to_segments_compresses_runs() {
        let plans = vec![
            plan(100.0, 50.0),
            plan(100.0, 50.0),
            plan(0.0, 50.0),
            plan(100.0, 50.0),
        ];
        let mut counter = 0;
        let segments = plans_to_segments(&plans, || {
            counter += 1;
            format!("seg-{counter}")
        });

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::new("seg-1", 1, 2, 100.0, 50.0));
        assert_eq!(segments[1], Segment::new("seg-2", 3, 3, 0.0, 50.0));
        assert_eq!(segments[2], Segment::new("seg-3", 4, 4, 100.0, 50.0));
    }
}

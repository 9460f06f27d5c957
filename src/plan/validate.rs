//! Advisory checks for malformed and overlapping segments

use std::collections::{HashMap, HashSet};

use super::segment::Segment;
use crate::assumptions::MAX_PLAN_YEARS;

/// Report malformed and overlapping segments
///
/// Issues are advisory: the resolver still builds a plan from the same
/// segments using first-claim-wins. Duplicate messages are dropped, keeping
/// the order in which they were first found.
pub fn validate_segments(segments: &[Segment]) -> Vec<String> {
    let mut issues = Vec::new();

    for segment in segments {
        if segment.start_year < 1 || segment.end_year < 1 {
            issues.push(format!(
                "Segment \"{}\" must start at year 1 or later.",
                segment.id
            ));
        }
        if segment.start_year > MAX_PLAN_YEARS as i32 || segment.end_year > MAX_PLAN_YEARS as i32 {
            issues.push(format!(
                "Segment \"{}\" must end by year {}.",
                segment.id, MAX_PLAN_YEARS
            ));
        }
        if segment.start_year > segment.end_year {
            issues.push(format!(
                "Segment \"{}\" has start year after end year.",
                segment.id
            ));
        }
    }

    let mut owners: HashMap<i32, &str> = HashMap::new();
    for segment in sorted_by_start(segments) {
        let first = segment.start_year.max(1);
        let last = segment.end_year.min(MAX_PLAN_YEARS as i32);
        for year in first..=last {
            match owners.get(&year) {
                Some(owner) => issues.push(format!(
                    "Year {} overlaps between segment \"{}\" and \"{}\".",
                    year, owner, segment.id
                )),
                None => {
                    owners.insert(year, segment.id.as_str());
                }
            }
        }
    }

    let mut seen = HashSet::new();
    issues.retain(|issue| seen.insert(issue.clone()));
    issues
}

/// Segments ordered by start year; ties keep insertion order
pub(crate) fn sorted_by_start(segments: &[Segment]) -> Vec<&Segment> {
    let mut ordered: Vec<&Segment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.start_year);
    ordered
}

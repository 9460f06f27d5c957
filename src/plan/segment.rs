//! Segment and scenario data structures

use serde::{Deserialize, Serialize};

use crate::assumptions::MAX_PLAN_YEARS;
use crate::error::InputError;

/// Contiguous inclusive year range with fixed income and expenses
///
/// Years are 1-based. They are signed so that malformed values survive
/// deserialization and can be reported by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub start_year: i32,
    pub end_year: i32,
    pub annual_work_income: f64,
    pub annual_expenses: f64,
}

impl Segment {
    pub fn new(
        id: impl Into<String>,
        start_year: i32,
        end_year: i32,
        annual_work_income: f64,
        annual_expenses: f64,
    ) -> Self {
        Self {
            id: id.into(),
            start_year,
            end_year,
            annual_work_income,
            annual_expenses,
        }
    }

    /// Whether the inclusive range covers `year`
    pub fn covers(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    /// Persisted-shape check: years within `1..=MAX_PLAN_YEARS` and finite amounts
    ///
    /// Start-after-end and overlaps are advisory and left to the validator.
    pub fn validate_shape(&self) -> Result<(), InputError> {
        let in_range = |year: i32| year >= 1 && year <= MAX_PLAN_YEARS as i32;
        if !in_range(self.start_year) || !in_range(self.end_year) {
            return Err(InputError::SegmentYears {
                id: self.id.clone(),
                start_year: self.start_year,
                end_year: self.end_year,
                max: MAX_PLAN_YEARS,
            });
        }
        if !self.annual_work_income.is_finite() {
            return Err(InputError::SegmentAmount {
                id: self.id.clone(),
                field: "annualWorkIncome",
            });
        }
        if !self.annual_expenses.is_finite() {
            return Err(InputError::SegmentAmount {
                id: self.id.clone(),
                field: "annualExpenses",
            });
        }
        Ok(())
    }

    /// Apply the fields present in `patch`
    pub fn apply(&mut self, patch: &SegmentPatch) {
        if let Some(start_year) = patch.start_year {
            self.start_year = start_year;
        }
        if let Some(end_year) = patch.end_year {
            self.end_year = end_year;
        }
        if let Some(income) = patch.annual_work_income {
            self.annual_work_income = income;
        }
        if let Some(expenses) = patch.annual_expenses {
            self.annual_expenses = expenses;
        }
    }

    /// Whether applying `patch` would change any field
    pub fn differs_from(&self, patch: &SegmentPatch) -> bool {
        patch.start_year.is_some_and(|v| v != self.start_year)
            || patch.end_year.is_some_and(|v| v != self.end_year)
            || patch.annual_work_income.is_some_and(|v| v != self.annual_work_income)
            || patch.annual_expenses.is_some_and(|v| v != self.annual_expenses)
    }
}

/// Partial update to a segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPatch {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub annual_work_income: Option<f64>,
    pub annual_expenses: Option<f64>,
}

impl SegmentPatch {
    pub fn income(value: f64) -> Self {
        Self {
            annual_work_income: Some(value),
            ..Default::default()
        }
    }

    pub fn expenses(value: f64) -> Self {
        Self {
            annual_expenses: Some(value),
            ..Default::default()
        }
    }
}

/// Scenario description text and who owns it
///
/// `Auto` text is regenerated from the segments after every edit;
/// `Custom` text was written by the user and is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Description {
    Auto(String),
    Custom(String),
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Description::Auto(text) | Description::Custom(text) => text,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Description::Auto(_))
    }
}

impl Default for Description {
    fn default() -> Self {
        Description::Custom(String::new())
    }
}

/// Named collection of segments describing one life plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Description,
    pub segments: Vec<Segment>,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: Description::default(),
            segments,
        }
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// First segment (in stored order) covering `year`
    pub fn segment_at_year(&self, year: i32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.covers(year))
    }

    /// Last year covered by any segment, or 0 when there are none
    pub fn max_end_year(&self) -> i32 {
        self.segments.iter().map(|s| s.end_year).max().unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_cover() {
        let segment = Segment::new("a", 3, 7, 100.0, 50.0);
        assert!(segment.covers(3) && segment.covers(7));
        assert!(!segment.covers(2) && !segment.covers(8));
        assert!(!Segment::new("b", 5, 2, 0.0, 0.0).covers(3));
    }

    #[test]
    fn test_validate_shape() {
        assert!(Segment::new("ok", 1, 1, 0.0, 0.0).validate_shape().is_ok());
        assert!(matches!(
            Segment::new("bad", 0, 4, 0.0, 0.0).validate_shape(),
            Err(InputError::SegmentYears { .. })
        ));
        assert!(Segment::new("edge", 1, MAX_PLAN_YEARS as i32, 0.0, 0.0).validate_shape().is_ok());
        assert!(matches!(
            Segment::new("huge", 1, i32::MAX, 0.0, 0.0).validate_shape(),
            Err(InputError::SegmentYears { .. })
        ));
        assert!(matches!(
            Segment::new("nan", 1, 4, f64::NAN, 0.0).validate_shape(),
            Err(InputError::SegmentAmount { field: "annualWorkIncome", .. })
        ));
    }

    #[test]
    fn test_patch_detects_changes() {
        let mut segment = Segment::new("a", 1, 5, 100.0, 50.0);
        assert!(!segment.differs_from(&SegmentPatch::income(100.0)));
        assert!(segment.differs_from(&SegmentPatch::expenses(60.0)));

        segment.apply(&SegmentPatch::expenses(60.0));
        assert_eq!(segment.annual_expenses, 60.0);
        assert_eq!(segment.annual_work_income, 100.0);
    }

    #[test]
    fn test_description_serializes_as_tagged_variant() {
        let json = serde_json::to_value(Description::Auto("Years 1-5".into())).unwrap();
        assert_eq!(json["kind"], "auto");
        assert_eq!(json["text"], "Years 1-5");

        let back: Description = serde_json::from_value(json).unwrap();
        assert!(back.is_auto());
    }

    #[test]
    fn test_scenario_without_description_defaults_to_custom() {
        let json = r#"{"id":"x","name":"X","segments":[]}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.description, Description::Custom(String::new()));
        assert_eq!(scenario.max_end_year(), 0);
    }
}

//! Ledger rows produced by a projection run

use serde::{Deserialize, Serialize};

/// One year of the simulation ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    pub year: u32,

    // Opening balances
    #[serde(rename = "startTotalNW")]
    pub start_total_nw: f64,
    #[serde(rename = "startAccessibleNW")]
    pub start_accessible_nw: f64,

    // Flows
    pub work_income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub restricted_savings: f64,
    pub accessible_savings: f64,
    pub growth_total: f64,
    pub growth_accessible: f64,
    pub withdrawal_needed: f64,

    // Closing balances
    #[serde(rename = "endTotalNW")]
    pub end_total_nw: f64,
    #[serde(rename = "endAccessibleNW")]
    pub end_accessible_nw: f64,

    // Derived figures
    pub capital_income_total: f64,
    pub capital_income_accessible: f64,
    pub coast_fire_number: f64,
}

/// Rows for one scenario plus the advisory issues found in its segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub scenario_id: String,
    pub rows: Vec<YearRow>,
    pub issues: Vec<String>,
}

impl ProjectionResult {
    pub fn new(scenario_id: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            rows: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Add a ledger row
    pub fn add_row(&mut self, row: YearRow) {
        self.rows.push(row);
    }

    /// Totals across the whole horizon
    pub fn summary(&self) -> ProjectionSummary {
        let total_work_income: f64 = self.rows.iter().map(|r| r.work_income).sum();
        let total_expenses: f64 = self.rows.iter().map(|r| r.expenses).sum();
        let total_growth: f64 = self.rows.iter().map(|r| r.growth_total).sum();
        let total_withdrawal_needed: f64 = self.rows.iter().map(|r| r.withdrawal_needed).sum();
        let shortfall_years = self.rows.iter().filter(|r| r.withdrawal_needed > 0.0).count() as u32;

        let final_total_nw = self.rows.last().map(|r| r.end_total_nw).unwrap_or(0.0);
        let final_accessible_nw = self.rows.last().map(|r| r.end_accessible_nw).unwrap_or(0.0);
        let min_accessible_nw = self
            .rows
            .iter()
            .map(|r| r.end_accessible_nw)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));

        ProjectionSummary {
            total_years: self.rows.len() as u32,
            total_work_income,
            total_expenses,
            total_growth,
            total_withdrawal_needed,
            shortfall_years,
            final_total_nw,
            final_accessible_nw,
            min_accessible_nw,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_work_income: f64,
    pub total_expenses: f64,
    pub total_growth: f64,
    pub total_withdrawal_needed: f64,
    /// Years where expenses exceeded work income
    pub shortfall_years: u32,
    #[serde(rename = "finalTotalNW")]
    pub final_total_nw: f64,
    #[serde(rename = "finalAccessibleNW")]
    pub final_accessible_nw: f64,
    /// Lowest closing liquid balance, `None` for an empty projection
    #[serde(rename = "minAccessibleNW")]
    pub min_accessible_nw: Option<f64>,
}

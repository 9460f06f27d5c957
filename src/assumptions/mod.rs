//! Global projection assumptions: horizon, starting balances, market rates and spending

mod defaults;
pub mod loader;

pub use defaults::{
    DEFAULT_CURRENT_YEAR_INCOME, DEFAULT_FEES, DEFAULT_INFLATION, DEFAULT_NOMINAL_RETURN,
    DEFAULT_PROJECTION_YEARS, DEFAULT_RESTRICTED_SAVINGS_RATE, DEFAULT_RETIREMENT_SPENDING,
    DEFAULT_SAFE_WITHDRAWAL_RATE, DEFAULT_STARTING_ACCESSIBLE_NW, DEFAULT_STARTING_TOTAL_NW,
    DEFAULT_YEARS_UNTIL_RETIREMENT, MAX_PLAN_YEARS,
};
pub use loader::{load_inputs_csv, load_inputs_from_reader};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// One assumption set per session
///
/// The restricted bucket (retirement accounts) is implied as
/// `starting_total_nw - starting_accessible_nw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalInputs {
    /// Total number of simulated years
    pub projection_years: u32,

    /// Year index after which retirement-account restrictions lift
    pub years_until_retirement: u32,

    #[serde(rename = "startingTotalNW")]
    pub starting_total_nw: f64,
    #[serde(rename = "startingAccessibleNW")]
    pub starting_accessible_nw: f64,

    /// Annual nominal portfolio return
    pub nominal_return: f64,
    pub inflation: f64,
    pub fees: f64,
    pub safe_withdrawal_rate: f64,

    /// Baseline annual spending used for years no segment covers
    pub retirement_spending: f64,

    /// Share of work income routed into restricted accounts
    pub restricted_savings_rate: f64,

    /// Today's work income, used to scale the preset scenarios
    #[serde(default)]
    pub current_year_income: f64,
}

impl Default for GlobalInputs {
    fn default() -> Self {
        Self {
            projection_years: DEFAULT_PROJECTION_YEARS,
            years_until_retirement: DEFAULT_YEARS_UNTIL_RETIREMENT,
            starting_total_nw: DEFAULT_STARTING_TOTAL_NW,
            starting_accessible_nw: DEFAULT_STARTING_ACCESSIBLE_NW,
            nominal_return: DEFAULT_NOMINAL_RETURN,
            inflation: DEFAULT_INFLATION,
            fees: DEFAULT_FEES,
            safe_withdrawal_rate: DEFAULT_SAFE_WITHDRAWAL_RATE,
            retirement_spending: DEFAULT_RETIREMENT_SPENDING,
            restricted_savings_rate: DEFAULT_RESTRICTED_SAVINGS_RATE,
            current_year_income: DEFAULT_CURRENT_YEAR_INCOME,
        }
    }
}

impl GlobalInputs {
    /// Return net of inflation and fees
    pub fn real_return(&self) -> f64 {
        self.nominal_return - self.inflation - self.fees
    }

    /// Starting balance held in restricted accounts
    pub fn starting_restricted_nw(&self) -> f64 {
        self.starting_total_nw - self.starting_accessible_nw
    }

    /// Set the total balance, pulling accessible down so it never exceeds total
    pub fn set_starting_total_nw(&mut self, total: f64) {
        self.starting_total_nw = total;
        if self.starting_accessible_nw > total {
            self.starting_accessible_nw = total;
        }
    }

    /// Set the accessible balance, raising total so it always covers accessible
    pub fn set_starting_accessible_nw(&mut self, accessible: f64) {
        self.starting_accessible_nw = accessible;
        if self.starting_total_nw < accessible {
            self.starting_total_nw = accessible;
        }
    }

    /// Check every field against its documented shape
    pub fn validate(&self) -> Result<(), InputError> {
        if self.projection_years == 0 {
            return Err(InputError::NonPositiveYears { field: "projectionYears" });
        }
        if self.projection_years > MAX_PLAN_YEARS {
            return Err(InputError::TooManyYears {
                field: "projectionYears",
                max: MAX_PLAN_YEARS,
            });
        }
        if self.years_until_retirement == 0 {
            return Err(InputError::NonPositiveYears { field: "yearsUntilRetirement" });
        }

        let amounts = [
            ("startingTotalNW", self.starting_total_nw),
            ("startingAccessibleNW", self.starting_accessible_nw),
            ("retirementSpending", self.retirement_spending),
            ("currentYearIncome", self.current_year_income),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::InvalidAmount { field, value });
            }
        }

        let rates = [
            ("nominalReturn", self.nominal_return),
            ("inflation", self.inflation),
            ("fees", self.fees),
            ("safeWithdrawalRate", self.safe_withdrawal_rate),
            ("restrictedSavingsRate", self.restricted_savings_rate),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(InputError::RateOutOfRange { field, value });
            }
        }

        if self.starting_accessible_nw > self.starting_total_nw {
            return Err(InputError::AccessibleExceedsTotal {
                accessible: self.starting_accessible_nw,
                total: self.starting_total_nw,
            });
        }

        Ok(())
    }
}

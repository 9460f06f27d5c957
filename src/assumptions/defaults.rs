//! Canonical default assumption set
//!
//! Preset scenarios are authored against these values and rescaled when the
//! live inputs differ.

/// Upper bound for the horizon and for any segment year
pub const MAX_PLAN_YEARS: u32 = 1000;

pub const DEFAULT_PROJECTION_YEARS: u32 = 40;
pub const DEFAULT_YEARS_UNTIL_RETIREMENT: u32 = 19;
pub const DEFAULT_STARTING_TOTAL_NW: f64 = 1_400_000.0;
pub const DEFAULT_STARTING_ACCESSIBLE_NW: f64 = 900_000.0;
pub const DEFAULT_NOMINAL_RETURN: f64 = 0.07;
pub const DEFAULT_INFLATION: f64 = 0.025;
pub const DEFAULT_FEES: f64 = 0.0002;
pub const DEFAULT_SAFE_WITHDRAWAL_RATE: f64 = 0.04;
pub const DEFAULT_RETIREMENT_SPENDING: f64 = 180_000.0;
pub const DEFAULT_RESTRICTED_SAVINGS_RATE: f64 = 0.1;
pub const DEFAULT_CURRENT_YEAR_INCOME: f64 = 403_000.0;

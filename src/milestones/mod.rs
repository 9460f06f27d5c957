//! Financial-independence milestones derived from a projection

mod targets;
mod kpis;
pub mod compare;

pub use targets::{enough_number, security_number_at_year};
pub use kpis::{compute_kpis, Kpis};
pub use compare::{compare_to_baseline, Driver, ScenarioComparison, Tradeoff};

//! Liquidity Planner - deterministic net-worth projections with
//! financial-independence milestones
//!
//! This library provides:
//! - Segment resolution into a dense per-year income/expense plan
//! - Two-bucket (total / accessible) year-by-year simulation
//! - Milestone KPIs (coast, enough, sabbatical, runway, bridge gap)
//! - Preset scenarios scaled to the user's own numbers
//! - An editing session with versioned JSON persistence

pub mod error;
pub mod format;
pub mod assumptions;
pub mod plan;
pub mod projection;
pub mod milestones;
pub mod scenario;
pub mod storage;

// Re-export commonly used types
pub use assumptions::GlobalInputs;
pub use error::{InputError, LoadError, SessionError, StorageError};
pub use plan::{resolve_year_plans, validate_segments, Description, Scenario, Segment, SegmentPatch, YearPlan};
pub use projection::{compute_scenario, simulate, ProjectionEngine, ProjectionResult, YearRow};
pub use milestones::{compute_kpis, enough_number, security_number_at_year, Kpis};
pub use scenario::{build_default_scenarios, Session};
pub use storage::{PersistedState, StateStore};

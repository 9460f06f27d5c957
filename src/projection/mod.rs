//! Projection engine for year-by-year net-worth simulation

mod state;
mod engine;
mod rows;
pub mod export;

pub use state::ProjectionState;
pub use engine::{compute_scenario, simulate, ProjectionEngine};
pub use rows::{ProjectionResult, ProjectionSummary, YearRow};
pub use export::{export_rows_csv, read_rows_csv, rows_to_csv_string, write_rows_csv, CSV_HEADERS};

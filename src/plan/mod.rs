//! Scenario segments and their resolution into per-year plans

mod segment;
mod resolver;
mod validate;
mod describe;
mod edit;
pub mod loader;

pub use segment::{Description, Scenario, Segment, SegmentPatch};
pub use resolver::{resolve_year_plans, PlanSource, YearPlan};
pub use validate::validate_segments;
pub use describe::{describe_segments, normalize_segments, plans_to_segments, segments_match, NormalizedSegment};
pub use edit::{split_around_year, split_list_around_year};
pub use loader::{load_segments, load_segments_from_reader};

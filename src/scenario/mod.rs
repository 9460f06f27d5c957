//! Preset scenarios, quick-edit suggestions and the editing session

mod templates;
mod builder;
mod suggest;
mod session;

pub use builder::{build_default_scenarios, refresh_default_scenarios, BASELINE_ID, CRUISE_ID, SABBATICAL_ID};
pub use suggest::{suggest_plans, suggestion_name, ExpenseRule, NormalizedSuggestion, SuggestionMode, SuggestionParams};
pub use session::Session;

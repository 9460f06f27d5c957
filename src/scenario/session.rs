//! Planning session: one assumption set, its scenarios and the active choice
//!
//! All editing goes through `Session` so that auto descriptions, id
//! allocation and preset refreshes stay consistent. Projections are always
//! recomputed from the current state; nothing derived is cached.

use std::collections::HashMap;

use super::builder::{build_default_scenarios, refresh_default_scenarios, BASELINE_ID};
use super::suggest::{suggest_plans, suggestion_name, SuggestionMode, SuggestionParams};
use crate::assumptions::GlobalInputs;
use crate::error::{SessionError, StorageError};
use crate::milestones::{compare_to_baseline, compute_kpis, Kpis, ScenarioComparison};
use crate::plan::{describe_segments, plans_to_segments, split_around_year, Description, Scenario, Segment, SegmentPatch};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::storage::{PersistedState, StateStore};

/// Allocates `"{prefix}-N"` ids that never collide with restored ones
#[derive(Debug, Clone, Default)]
struct IdSequence {
    next: u64,
}

impl IdSequence {
    fn after<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        let highest = ids
            .filter_map(|id| id.rsplit('-').next()?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { next: highest + 1 }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next);
        self.next += 1;
        id
    }
}

/// Mutable planning state
#[derive(Debug, Clone)]
pub struct Session {
    inputs: GlobalInputs,
    scenarios: Vec<Scenario>,
    active_scenario_id: String,
    ids: IdSequence,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GlobalInputs::default())
    }
}

impl Session {
    /// Fresh session with the preset scenarios; baseline is active
    pub fn new(inputs: GlobalInputs) -> Self {
        let scenarios = build_default_scenarios(&inputs);
        let ids = IdSequence::after(all_ids(&scenarios));
        Self {
            inputs,
            scenarios,
            active_scenario_id: BASELINE_ID.to_string(),
            ids,
        }
    }

    /// Restore from a validated payload; an unknown active id falls back
    /// to the first scenario
    pub fn from_persisted(state: PersistedState) -> Self {
        if state.scenarios.is_empty() {
            log::warn!("persisted state has no scenarios; rebuilding presets");
            return Self::new(state.inputs);
        }
        let mut active_scenario_id = state.active_scenario_id;
        if !state.scenarios.iter().any(|s| s.id == active_scenario_id) {
            if let Some(first) = state.scenarios.first() {
                active_scenario_id = first.id.clone();
            }
        }
        let ids = IdSequence::after(all_ids(&state.scenarios));
        Self {
            inputs: state.inputs,
            scenarios: state.scenarios,
            active_scenario_id,
            ids,
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState::new(self.inputs.clone(), self.scenarios.clone(), self.active_scenario_id.clone())
    }

    /// Stored session, or defaults when nothing usable is stored
    pub fn restore(store: &StateStore) -> Self {
        store.load().map(Self::from_persisted).unwrap_or_default()
    }

    pub fn save(&self, store: &StateStore) -> Result<(), StorageError> {
        store.save(&self.to_persisted())
    }

    pub fn inputs(&self) -> &GlobalInputs {
        &self.inputs
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn active_scenario_id(&self) -> &str {
        &self.active_scenario_id
    }

    pub fn scenario(&self, id: &str) -> Result<&Scenario, SessionError> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SessionError::UnknownScenario(id.to_string()))
    }

    /// Active scenario, or the first one if the active id went stale
    pub fn active_scenario(&self) -> &Scenario {
        self.scenarios
            .iter()
            .find(|s| s.id == self.active_scenario_id)
            .unwrap_or(&self.scenarios[0])
    }

    /// Scenario with id `baseline`, or the first one
    pub fn baseline_scenario(&self) -> &Scenario {
        self.scenarios
            .iter()
            .find(|s| s.id == BASELINE_ID)
            .unwrap_or(&self.scenarios[0])
    }

    // -- projections ------------------------------------------------------

    pub fn project(&self, scenario_id: &str) -> Result<ProjectionResult, SessionError> {
        let scenario = self.scenario(scenario_id)?;
        Ok(ProjectionEngine::new(self.inputs.clone()).project_scenario(scenario))
    }

    pub fn kpis(&self, scenario_id: &str) -> Result<Kpis, SessionError> {
        let result = self.project(scenario_id)?;
        Ok(compute_kpis(&self.inputs, &result.rows))
    }

    /// Deltas of one scenario against the baseline scenario
    pub fn compare_with_baseline(&self, scenario_id: &str) -> Result<ScenarioComparison, SessionError> {
        let engine = ProjectionEngine::new(self.inputs.clone());
        let scenario = engine.project_scenario(self.scenario(scenario_id)?);
        let baseline = engine.project_scenario(self.baseline_scenario());

        Ok(compare_to_baseline(
            &scenario.rows,
            &compute_kpis(&self.inputs, &scenario.rows),
            &baseline.rows,
            &compute_kpis(&self.inputs, &baseline.rows),
            self.inputs.years_until_retirement,
        ))
    }

    pub fn is_baseline(&self, scenario_id: &str) -> bool {
        self.baseline_scenario().id == scenario_id
    }

    // -- inputs -----------------------------------------------------------

    /// Replace the assumption set, refreshing untouched presets when income
    /// or spending changed; returns how many scenarios were refreshed
    pub fn set_inputs(&mut self, inputs: GlobalInputs) -> Result<usize, SessionError> {
        inputs.validate()?;
        let refreshed = refresh_default_scenarios(&self.inputs, &inputs, &mut self.scenarios);
        self.inputs = inputs;
        Ok(refreshed)
    }

    /// Back to default inputs and the preset scenarios
    pub fn reset(&mut self) {
        *self = Self::default();
        log::info!("session reset to defaults");
    }

    // -- scenarios --------------------------------------------------------

    /// Append a one-segment scenario over the whole horizon and activate it
    pub fn add_scenario(&mut self) -> String {
        let id = self.ids.next_id("scenario");
        let segment = Segment::new(
            self.ids.next_id("segment"),
            1,
            self.inputs.projection_years.max(1) as i32,
            self.inputs.current_year_income,
            self.inputs.retirement_spending,
        );
        let description = Description::Auto(describe_segments(std::slice::from_ref(&segment)));
        self.scenarios
            .push(Scenario::new(id.clone(), "New Scenario", vec![segment]).with_description(description));
        self.active_scenario_id = id.clone();
        id
    }

    /// Remove a scenario; the first remaining one becomes active
    pub fn remove_scenario(&mut self, id: &str) -> Result<(), SessionError> {
        if self.scenarios.len() <= 1 {
            return Err(SessionError::LastScenario);
        }
        let index = self.index_of(id)?;
        self.scenarios.remove(index);
        self.active_scenario_id = self.scenarios[0].id.clone();
        Ok(())
    }

    pub fn rename_scenario(&mut self, id: &str, name: impl Into<String>) -> Result<(), SessionError> {
        let index = self.index_of(id)?;
        self.scenarios[index].name = name.into();
        Ok(())
    }

    /// User-written description; it is never regenerated afterwards
    pub fn set_description(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        let index = self.index_of(id)?;
        self.scenarios[index].description = Description::Custom(text.into());
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), SessionError> {
        self.index_of(id)?;
        self.active_scenario_id = id.to_string();
        Ok(())
    }

    /// Add a scenario built from the active projection rewritten by a suggestion
    pub fn create_suggested_scenario(&mut self, params: &SuggestionParams, mode: &SuggestionMode) -> String {
        let rows = ProjectionEngine::new(self.inputs.clone())
            .project_scenario(self.active_scenario())
            .rows;
        let plans = suggest_plans(&self.inputs, &rows, params, mode);
        let name = suggestion_name(&params.normalize(self.inputs.projection_years), mode);

        let ids = &mut self.ids;
        let segments = plans_to_segments(&plans, || ids.next_id("segment"));
        let id = self.ids.next_id("scenario");
        let description = Description::Auto(describe_segments(&segments));

        log::info!("created suggested scenario \"{}\" with {} segments", name, segments.len());
        self.scenarios
            .push(Scenario::new(id.clone(), name, segments).with_description(description));
        self.active_scenario_id = id.clone();
        id
    }

    // -- segments ---------------------------------------------------------

    pub fn update_segment(&mut self, scenario_id: &str, segment_id: &str, patch: &SegmentPatch) -> Result<(), SessionError> {
        let scenario = find_mut(&mut self.scenarios, scenario_id)?;
        let segment = scenario
            .segments
            .iter_mut()
            .find(|s| s.id == segment_id)
            .ok_or_else(|| SessionError::UnknownSegment {
                scenario: scenario_id.to_string(),
                segment: segment_id.to_string(),
            })?;
        let mut patched = segment.clone();
        patched.apply(patch);
        patched.validate_shape()?;
        *segment = patched;
        refresh_auto_description(scenario);
        Ok(())
    }

    /// Change a single year, splitting its segment into before/year/after
    ///
    /// Returns `false` when the patch would not change anything.
    pub fn update_segment_at_year(&mut self, scenario_id: &str, year: u32, patch: &SegmentPatch) -> Result<bool, SessionError> {
        let scenario = find_mut(&mut self.scenarios, scenario_id)?;
        let uncovered = || SessionError::UncoveredYear {
            scenario: scenario_id.to_string(),
            year,
        };
        let target_year = i32::try_from(year).map_err(|_| uncovered())?;
        let index = scenario
            .segments
            .iter()
            .position(|s| s.covers(target_year))
            .ok_or_else(uncovered)?;

        let target = &scenario.segments[index];
        if !target.differs_from(patch) {
            return Ok(false);
        }

        if target.start_year == target_year && target.end_year == target_year {
            let mut patched = target.clone();
            patched.apply(patch);
            patched.validate_shape()?;
            scenario.segments[index] = patched;
        } else {
            let ids = &mut self.ids;
            let pieces = split_around_year(target, target_year, patch, &mut || ids.next_id("segment"));
            for piece in &pieces {
                piece.validate_shape()?;
            }
            scenario.segments.splice(index..=index, pieces);
        }
        refresh_auto_description(scenario);
        Ok(true)
    }

    /// Append a one-year segment right after the last covered year
    pub fn add_segment(&mut self, scenario_id: &str) -> Result<String, SessionError> {
        let horizon = self.inputs.projection_years.max(1) as i32;
        let income = self.inputs.current_year_income;
        let expenses = self.inputs.retirement_spending;
        let id = self.ids.next_id("segment");

        let scenario = find_mut(&mut self.scenarios, scenario_id)?;
        let start_year = scenario.max_end_year().saturating_add(1).min(horizon);
        scenario
            .segments
            .push(Segment::new(id.clone(), start_year, start_year, income, expenses));
        refresh_auto_description(scenario);
        Ok(id)
    }

    pub fn remove_segment(&mut self, scenario_id: &str, segment_id: &str) -> Result<(), SessionError> {
        let scenario = find_mut(&mut self.scenarios, scenario_id)?;
        let before = scenario.segments.len();
        scenario.segments.retain(|s| s.id != segment_id);
        if scenario.segments.len() == before {
            return Err(SessionError::UnknownSegment {
                scenario: scenario_id.to_string(),
                segment: segment_id.to_string(),
            });
        }
        refresh_auto_description(scenario);
        Ok(())
    }

    /// Issues per scenario id, for scenarios that have any
    pub fn issues(&self) -> HashMap<String, Vec<String>> {
        self.scenarios
            .iter()
            .map(|s| (s.id.clone(), crate::plan::validate_segments(&s.segments)))
            .filter(|(_, issues)| !issues.is_empty())
            .collect()
    }

    fn index_of(&self, id: &str) -> Result<usize, SessionError> {
        self.scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SessionError::UnknownScenario(id.to_string()))
    }
}

fn find_mut<'a>(scenarios: &'a mut [Scenario], id: &str) -> Result<&'a mut Scenario, SessionError> {
    scenarios
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| SessionError::UnknownScenario(id.to_string()))
}

fn refresh_auto_description(scenario: &mut Scenario) {
    if scenario.description.is_auto() {
        scenario.description = Description::Auto(describe_segments(&scenario.segments));
    }
}

fn all_ids(scenarios: &[Scenario]) -> impl Iterator<Item = &str> {
    scenarios
        .iter()
        .flat_map(|s| std::iter::once(s.id.as_str()).chain(s.segments.iter().map(|seg| seg.id.as_str())))
}

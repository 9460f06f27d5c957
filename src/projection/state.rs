//! Running balances carried from one projection year to the next

use crate::assumptions::GlobalInputs;

/// Balances at the start of the current projection year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first advance)
    pub year: u32,

    /// Start-of-year total net worth (restricted + accessible)
    pub total_nw: f64,

    /// Start-of-year liquid net worth
    pub accessible_nw: f64,
}

impl ProjectionState {
    /// Initialize from the starting balances
    pub fn from_inputs(inputs: &GlobalInputs) -> Self {
        Self {
            year: 0,
            total_nw: inputs.starting_total_nw,
            accessible_nw: inputs.starting_accessible_nw,
        }
    }

    /// Move to the next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Carry this year's closing balances into next year's opening balances
    pub fn carry_forward(&mut self, end_total_nw: f64, end_accessible_nw: f64) {
        self.total_nw = end_total_nw;
        self.accessible_nw = end_accessible_nw;
    }
}

pub mod evening_turnaround_rule;
pub mod night_rest_rule;
pub mod streak_limit_rule;

use crate::domain::matrix::DutyMatrix;
use shared::{DomainResult, ShiftCode};

pub use evening_turnaround_rule::EveningTurnaroundRule;
pub use night_rest_rule::NightRestRule;
pub use streak_limit_rule::StreakLimitRule;

/// A placement under consideration. The matrix is borrowed un-mutated, so a
/// rule sees the roster exactly as it stands before the write.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentContext<'a> {
    pub matrix: &'a DutyMatrix,
    pub nurse: usize,
    pub day: u32,
    pub shift: ShiftCode,
}

impl AssignmentContext<'_> {
    pub fn previous_cell(&self) -> Option<ShiftCode> {
        if self.day <= 1 {
            return None;
        }
        self.matrix.cell(self.nurse, self.day - 1)
    }

    pub fn next_cell(&self) -> Option<ShiftCode> {
        self.matrix.cell(self.nurse, self.day + 1)
    }

    pub fn has_next_day(&self) -> bool {
        self.day < self.matrix.last_day()
    }
}

pub trait Rule: Send + Sync {
    /// Check whether the placement violates this rule.
    fn check(&self, context: &AssignmentContext<'_>) -> DomainResult<()>;

    fn name(&self) -> &'static str;
}

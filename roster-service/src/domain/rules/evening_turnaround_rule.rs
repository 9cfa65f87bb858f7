use super::{AssignmentContext, Rule};
use shared::{DomainError, DomainResult, ShiftCode};

/// Rule: no daytime duty straight after an evening session.
///
/// Covers both the plain evening shift and the combined day-evening shift,
/// in both adjacency directions.
pub struct EveningTurnaroundRule;

impl EveningTurnaroundRule {
    pub fn new() -> Self {
        Self
    }

    fn ends_in_evening(code: ShiftCode) -> bool {
        matches!(code, ShiftCode::Evening | ShiftCode::DayEvening)
    }

    fn starts_with_daytime(code: ShiftCode) -> bool {
        matches!(code, ShiftCode::Day | ShiftCode::DayEvening)
    }
}

impl Rule for EveningTurnaroundRule {
    fn check(&self, context: &AssignmentContext<'_>) -> DomainResult<()> {
        if Self::starts_with_daytime(context.shift) {
            if let Some(previous) = context.previous_cell() {
                if Self::ends_in_evening(previous) {
                    return Err(DomainError::RuleViolation(format!(
                        "{} on day {} follows an evening session",
                        context.shift, context.day
                    )));
                }
            }
        }

        if Self::ends_in_evening(context.shift) {
            if let Some(next) = context.next_cell() {
                if Self::starts_with_daytime(next) {
                    return Err(DomainError::RuleViolation(format!(
                        "{} on day {} precedes a daytime duty",
                        context.shift, context.day
                    )));
                }
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "EveningTurnaround"
    }
}

use super::{AssignmentContext, Rule};
use shared::{DomainError, DomainResult, ShiftCode};

/// Rule: a night shift is followed by rest.
///
/// Night runs are validated day by day against the un-mutated matrix before
/// any cell of the run is written, so a planned `N N OFF` block passes even
/// though an already-written `N` forbids work on its successor day.
pub struct NightRestRule;

impl NightRestRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NightRestRule {
    fn check(&self, context: &AssignmentContext<'_>) -> DomainResult<()> {
        // Working the day after an assigned night breaks the rest tail.
        if context.shift.is_work() && context.previous_cell() == Some(ShiftCode::Night) {
            return Err(DomainError::RuleViolation(format!(
                "day {} follows a night shift and must stay off",
                context.day
            )));
        }

        // Placing a night requires the successor day to still be free (or
        // already resting) so the forced-off tail can land there.
        if context.shift == ShiftCode::Night && context.has_next_day() {
            match context.next_cell() {
                None | Some(ShiftCode::Off) => {}
                Some(next) => {
                    return Err(DomainError::RuleViolation(format!(
                        "night on day {} would precede {} on day {}",
                        context.day,
                        next,
                        context.day + 1
                    )));
                }
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "NightRest"
    }
}

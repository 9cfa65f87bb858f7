use super::{AssignmentContext, Rule};
use shared::{DomainError, DomainResult};

/// Rule: no work streak may exceed the configured length.
///
/// The placement is checked against the run it would join: assigned work
/// days immediately before, the day itself, and assigned work days
/// immediately after.
pub struct StreakLimitRule {
    max_run: u32,
}

impl StreakLimitRule {
    pub fn new(max_run: u32) -> Self {
        Self { max_run }
    }
}

impl Rule for StreakLimitRule {
    fn check(&self, context: &AssignmentContext<'_>) -> DomainResult<()> {
        if !context.shift.is_work() {
            return Ok(());
        }

        let before = context.matrix.work_run_before(context.nurse, context.day);
        let after = context.matrix.work_run_after(context.nurse, context.day);
        let run = before + 1 + after;
        if run > self.max_run {
            return Err(DomainError::RuleViolation(format!(
                "day {} would join a {}-day work streak (limit {})",
                context.day, run, self.max_run
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "StreakLimit"
    }
}

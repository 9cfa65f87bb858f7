use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::rules::{
    AssignmentContext, EveningTurnaroundRule, NightRestRule, Rule, StreakLimitRule,
};
use shared::ShiftCode;

/// The pure placement predicate shared by every stage.
///
/// Composes the cheap cell/request-off/duty-filter checks with the adjacency
/// and streak rules. Never mutates the matrix.
pub struct FeasibilityChecker {
    rules: Vec<Box<dyn Rule>>,
}

impl FeasibilityChecker {
    pub fn new(max_streak: u32) -> Self {
        Self {
            rules: vec![
                Box::new(NightRestRule::new()),
                Box::new(EveningTurnaroundRule::new()),
                Box::new(StreakLimitRule::new(max_streak)),
            ],
        }
    }

    /// Placement into a still-unassigned cell.
    pub fn feasible(
        &self,
        matrix: &DutyMatrix,
        staff: &[Nurse],
        nurse: usize,
        day: u32,
        shift: ShiftCode,
        honor_duty_filter: bool,
    ) -> bool {
        matrix.is_unassigned(nurse, day)
            && self.placeable(matrix, staff, nurse, day, shift, honor_duty_filter)
    }

    /// Placement that may also reclaim a plain rest day (repair and
    /// balancing passes). Request-off rest is still untouchable: the
    /// request-off check below protects it.
    pub fn reassignable(
        &self,
        matrix: &DutyMatrix,
        staff: &[Nurse],
        nurse: usize,
        day: u32,
        shift: ShiftCode,
        honor_duty_filter: bool,
    ) -> bool {
        matches!(matrix.cell(nurse, day), None | Some(ShiftCode::Off))
            && self.placeable(matrix, staff, nurse, day, shift, honor_duty_filter)
    }

    fn placeable(
        &self,
        matrix: &DutyMatrix,
        staff: &[Nurse],
        nurse: usize,
        day: u32,
        shift: ShiftCode,
        honor_duty_filter: bool,
    ) -> bool {
        if !(1..=matrix.last_day()).contains(&day) {
            return false;
        }
        if staff[nurse].request_off.contains(&day) {
            return false;
        }
        if honor_duty_filter {
            if let Some(allowed) = staff[nurse].duty_filter(day) {
                if !allowed.contains(&shift) {
                    return false;
                }
            }
        }
        let context = AssignmentContext {
            matrix,
            nurse,
            day,
            shift,
        };
        self.rules.iter().all(|rule| rule.check(&context).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::MonthSpan;
    use shared::Role;
    use std::collections::BTreeSet;

    fn fixture() -> (Vec<Nurse>, MonthSpan) {
        let staff = vec![
            Nurse::from_free_text("Cho", Role::Registered, "1,2", "15=E, 20=D/E", 0, 28),
            Nurse::from_free_text("Park", Role::Registered, "", "", 0, 28),
        ];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        (staff, span)
    }

    #[test]
    fn request_off_days_are_never_placeable() {
        let (staff, span) = fixture();
        let matrix = DutyMatrix::new(&staff, &span);
        let checker = FeasibilityChecker::new(6);
        assert!(!checker.feasible(&matrix, &staff, 0, 1, ShiftCode::Day, true));
        assert!(!checker.reassignable(&matrix, &staff, 0, 2, ShiftCode::Night, true));
        assert!(checker.feasible(&matrix, &staff, 0, 3, ShiftCode::Day, true));
    }

    #[test]
    fn occupied_cells_block_feasible_but_rest_allows_reassign() {
        let (staff, span) = fixture();
        let mut matrix = DutyMatrix::new(&staff, &span);
        matrix.set(1, 10, ShiftCode::Off);
        let checker = FeasibilityChecker::new(6);
        assert!(!checker.feasible(&matrix, &staff, 1, 10, ShiftCode::Day, true));
        assert!(checker.reassignable(&matrix, &staff, 1, 10, ShiftCode::Day, true));

        matrix.set(1, 11, ShiftCode::Evening);
        assert!(!checker.reassignable(&matrix, &staff, 1, 11, ShiftCode::Day, true));
    }

    #[test]
    fn duty_filter_restricts_until_relaxed() {
        let (staff, span) = fixture();
        let matrix = DutyMatrix::new(&staff, &span);
        let checker = FeasibilityChecker::new(6);
        // Day 15 is pinned to E, day 20 restricted to D or E.
        assert!(!checker.feasible(&matrix, &staff, 0, 15, ShiftCode::Day, true));
        assert!(checker.feasible(&matrix, &staff, 0, 15, ShiftCode::Evening, true));
        assert!(!checker.feasible(&matrix, &staff, 0, 20, ShiftCode::Night, true));
        assert!(checker.feasible(&matrix, &staff, 0, 20, ShiftCode::Night, false));
    }

    #[test]
    fn rule_chain_is_consulted() {
        let (staff, span) = fixture();
        let mut matrix = DutyMatrix::new(&staff, &span);
        matrix.set(1, 9, ShiftCode::Night);
        let checker = FeasibilityChecker::new(6);
        assert!(!checker.feasible(&matrix, &staff, 1, 10, ShiftCode::Day, true));
    }
}

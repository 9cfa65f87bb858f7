use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::services::feasibility::FeasibilityChecker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::{Role, ShiftCode};
use std::collections::VecDeque;

/// Head nurses are pulled toward daytime duty and pushed away from
/// evenings; everyone else competes on workload alone.
fn role_priority(role: Role, shift: ShiftCode) -> u32 {
    match (role, shift) {
        (Role::Head, ShiftCode::Evening) => 999,
        (Role::Head, _) => 0,
        _ => 10,
    }
}

/// Fills the day/evening demand for every calendar day.
///
/// Holidays and weekends ask for the combined day-evening shift; ordinary
/// days ask for separate day and evening cover. When a combined shift cannot
/// be placed at all, the day falls back to split coverage by re-queueing
/// `D` and `E` for itself only.
pub fn fill_coverage(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    rng: &mut StdRng,
) {
    for day in span.days() {
        let mut required = VecDeque::new();
        if span.is_holiday_or_weekend(day) {
            if !(column_covers_day(matrix, day) && column_covers_evening(matrix, day)) {
                required.push_back(ShiftCode::DayEvening);
            }
        } else {
            if !column_covers_day(matrix, day) {
                required.push_back(ShiftCode::Day);
            }
            if !column_covers_evening(matrix, day) {
                required.push_back(ShiftCode::Evening);
            }
        }

        while let Some(shift) = required.pop_front() {
            let filled = try_fill(matrix, staff, span, checker, rng, day, shift, true)
                || try_fill(matrix, staff, span, checker, rng, day, shift, false);
            if !filled && shift == ShiftCode::DayEvening {
                required.push_back(ShiftCode::Day);
                required.push_back(ShiftCode::Evening);
            }
            // Unfilled D/E holes are left for the zero-gap repair pass.
        }
    }
}

fn column_covers_day(matrix: &DutyMatrix, day: u32) -> bool {
    (0..matrix.nurse_count()).any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_day))
}

fn column_covers_evening(matrix: &DutyMatrix, day: u32) -> bool {
    (0..matrix.nurse_count()).any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_evening))
}

#[allow(clippy::too_many_arguments)]
fn try_fill(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    rng: &mut StdRng,
    day: u32,
    shift: ShiftCode,
    honor_duty_filter: bool,
) -> bool {
    let mut candidates: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(_, record)| matches!(record.role, Role::Head | Role::Registered))
        .map(|(nurse, _)| nurse)
        .collect();
    candidates.shuffle(rng);
    candidates.sort_by_key(|&nurse| {
        (
            role_priority(staff[nurse].role, shift),
            matrix.work_count(nurse),
        )
    });

    for &nurse in &candidates {
        if shift == ShiftCode::DayEvening && matrix.combined_count(nurse) >= 1 {
            continue;
        }
        if shift == ShiftCode::Evening
            && staff[nurse].role == Role::Head
            && span.is_holiday_or_weekend(day)
            && matrix.holiday_evening_count(nurse) >= 1
        {
            continue;
        }
        if checker.feasible(matrix, staff, nurse, day, shift, honor_duty_filter) {
            matrix.set(nurse, day, shift);
            return true;
        }
    }
    false
}

use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::EngineConfig;
use crate::domain::services::feasibility::FeasibilityChecker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::{Role, ShiftCode};

/// Packs night coverage left to right before any day/evening fill runs.
///
/// Nights are the scarcest resource: each one pins the successor day to
/// rest, so they are placed first as short runs with an explicit rest tail.
/// Run admissibility is judged on the un-mutated matrix and the whole run is
/// written at once.
pub fn pack_nights(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
) {
    for day in span.days() {
        if matrix.column_has(day, ShiftCode::Night) {
            continue;
        }

        let candidates = night_candidates(matrix, staff, config.night_cap, rng);
        if !place_run(matrix, staff, span, checker, config, rng, day, &candidates) {
            place_last_resort(matrix, staff, span, checker, config, day, &candidates);
        }
    }
}

/// Registered nurses under the night cap, least-burdened first with a
/// random tie-break.
fn night_candidates(
    matrix: &DutyMatrix,
    staff: &[Nurse],
    cap: u32,
    rng: &mut StdRng,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(nurse, record)| {
            record.role == Role::Registered && matrix.night_count(*nurse) < cap
        })
        .map(|(nurse, _)| nurse)
        .collect();
    candidates.shuffle(rng);
    candidates.sort_by_key(|&nurse| matrix.night_count(nurse));
    candidates
}

fn place_run(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
    day: u32,
    candidates: &[usize],
) -> bool {
    let remaining = span.last_day() - day + 1;
    for &nurse in candidates {
        let budget = config.night_cap - matrix.night_count(nurse);

        let mut lengths: Vec<u32> = if remaining < 2 {
            vec![1]
        } else {
            let mut lengths = vec![3, 2];
            lengths.shuffle(rng);
            lengths
        };
        lengths.retain(|&len| len <= budget && len <= remaining);

        for &len in &lengths {
            if !run_admissible(matrix, staff, checker, nurse, day, len, config.max_streak) {
                continue;
            }
            for d in day..day + len {
                matrix.set(nurse, d, ShiftCode::Night);
            }
            let tail = day + len;
            if tail <= span.last_day() && matrix.is_unassigned(nurse, tail) {
                matrix.set(nurse, tail, ShiftCode::Off);
            }
            return true;
        }
    }
    false
}

/// A run fits when every day of it is individually placeable, the streak it
/// forms as a whole stays under the cap, and the tail day is still free to
/// take the forced rest. Per-day checks see the un-mutated matrix and so
/// cannot judge the joined run themselves.
fn run_admissible(
    matrix: &DutyMatrix,
    staff: &[Nurse],
    checker: &FeasibilityChecker,
    nurse: usize,
    day: u32,
    len: u32,
    max_streak: u32,
) -> bool {
    for d in day..day + len {
        if !checker.feasible(matrix, staff, nurse, d, ShiftCode::Night, true) {
            return false;
        }
    }
    let joined = matrix.work_run_before(nurse, day) + len + matrix.work_run_after(nurse, day + len - 1);
    if joined > max_streak {
        return false;
    }
    let tail = day + len;
    if tail <= matrix.last_day() {
        return matches!(matrix.cell(nurse, tail), None | Some(ShiftCode::Off));
    }
    true
}

/// One or two nights without the forced rest tail. Still bounded by the cap
/// and the placement predicate; the tight successor state this can leave is
/// absorbed by scoring.
fn place_last_resort(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    day: u32,
    candidates: &[usize],
) -> bool {
    for &nurse in candidates {
        let budget = config.night_cap - matrix.night_count(nurse);

        if budget >= 2
            && day < span.last_day()
            && checker.feasible(matrix, staff, nurse, day, ShiftCode::Night, true)
            && checker.feasible(matrix, staff, nurse, day + 1, ShiftCode::Night, true)
            && matrix.work_run_before(nurse, day) + 2 + matrix.work_run_after(nurse, day + 1)
                <= config.max_streak
        {
            matrix.set(nurse, day, ShiftCode::Night);
            matrix.set(nurse, day + 1, ShiftCode::Night);
            return true;
        }

        if budget >= 1 && checker.feasible(matrix, staff, nurse, day, ShiftCode::Night, true) {
            matrix.set(nurse, day, ShiftCode::Night);
            return true;
        }
    }
    false
}

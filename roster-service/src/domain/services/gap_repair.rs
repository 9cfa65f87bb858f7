use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::EngineConfig;
use crate::domain::services::feasibility::FeasibilityChecker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::{Role, ShiftCode};

/// Second pass over the month closing any coverage still missing after the
/// main fill. Plain rest days may be reclaimed here; the night cap relaxes
/// from its normal value to the hard ceiling when nothing else closes a
/// night hole. Candidates already at the rest-day floor are left alone.
pub fn repair_gaps(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
) {
    for day in span.days() {
        for shift in missing_coverage(matrix, day) {
            if shift == ShiftCode::Night {
                for limit in [config.night_cap, config.night_cap_relaxed] {
                    if repair_night(matrix, staff, span, checker, config, rng, day, limit) {
                        break;
                    }
                }
            } else {
                repair_day_shift(matrix, staff, span, checker, config, rng, day, shift);
            }
        }
    }
}

/// What the day still demands: a night always, plus daytime and evening
/// cover in whatever form the day class accepts.
fn missing_coverage(matrix: &DutyMatrix, day: u32) -> Vec<ShiftCode> {
    let covers_day =
        (0..matrix.nurse_count()).any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_day));
    let covers_evening = (0..matrix.nurse_count())
        .any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_evening));

    let mut missing = Vec::new();
    if !matrix.column_has(day, ShiftCode::Night) {
        missing.push(ShiftCode::Night);
    }
    if !covers_day {
        missing.push(ShiftCode::Day);
    }
    if !covers_evening {
        missing.push(ShiftCode::Evening);
    }
    missing
}

#[allow(clippy::too_many_arguments)]
fn repair_night(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
    day: u32,
    limit: u32,
) -> bool {
    let mut candidates: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(nurse, record)| {
            record.role == Role::Registered
                && matches!(matrix.cell(*nurse, day), None | Some(ShiftCode::Off))
                && matrix.night_count(*nurse) < limit
        })
        .map(|(nurse, _)| nurse)
        .collect();
    candidates.shuffle(rng);
    candidates.sort_by_key(|&nurse| (matrix.night_count(nurse), matrix.work_count(nurse)));

    for &nurse in &candidates {
        if matrix.off_count(nurse) <= config.min_off_days {
            continue;
        }
        if !checker.reassignable(matrix, staff, nurse, day, ShiftCode::Night, true) {
            continue;
        }

        // Decide the run extension before the first write: an already
        // assigned night forbids work on its successor day. The successor
        // column must still be short a night of its own, and the pair of
        // nights must not join the surrounding runs into an over-long
        // streak the per-day checks cannot see.
        let extend = day < span.last_day()
            && !matrix.column_has(day + 1, ShiftCode::Night)
            && matrix.night_count(nurse) + 2 <= limit
            && matrix.off_count(nurse) >= config.min_off_days + 2
            && checker.reassignable(matrix, staff, nurse, day + 1, ShiftCode::Night, true)
            && matrix.work_run_before(nurse, day) + 2 + matrix.work_run_after(nurse, day + 1)
                <= config.max_streak;

        matrix.set(nurse, day, ShiftCode::Night);
        if extend {
            matrix.set(nurse, day + 1, ShiftCode::Night);
        }
        return true;
    }
    false
}

#[allow(clippy::too_many_arguments)]
fn repair_day_shift(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
    day: u32,
    shift: ShiftCode,
) -> bool {
    let mut candidates: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(nurse, record)| {
            matches!(record.role, Role::Head | Role::Registered)
                && matches!(matrix.cell(*nurse, day), None | Some(ShiftCode::Off))
        })
        .map(|(nurse, _)| nurse)
        .collect();
    candidates.shuffle(rng);
    candidates.sort_by_key(|&nurse| (matrix.night_count(nurse), matrix.work_count(nurse)));

    for &nurse in &candidates {
        if matrix.off_count(nurse) <= config.min_off_days {
            continue;
        }
        // The head-nurse holiday-evening cap still binds during repair.
        if shift == ShiftCode::Evening
            && staff[nurse].role == Role::Head
            && span.is_holiday_or_weekend(day)
            && matrix.holiday_evening_count(nurse) >= 1
        {
            continue;
        }
        if checker.reassignable(matrix, staff, nurse, day, shift, true) {
            matrix.set(nurse, day, shift);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn registered(names: &[&str]) -> Vec<Nurse> {
        names
            .iter()
            .map(|name| Nurse::from_free_text(*name, Role::Registered, "", "", 0, 28))
            .collect()
    }

    fn span() -> MonthSpan {
        MonthSpan::new(2026, 2, BTreeSet::new()).unwrap()
    }

    #[test]
    fn reclaims_a_rest_day_to_close_a_night_hole() {
        let staff = registered(&["A", "B", "C"]);
        let span = span();
        let mut matrix = DutyMatrix::new(&staff, &span);
        matrix.set(0, 10, ShiftCode::Off);
        matrix.set(1, 10, ShiftCode::Off);
        matrix.set(2, 10, ShiftCode::Off);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        repair_gaps(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        assert!(matrix.column_has(10, ShiftCode::Night));
    }

    #[test]
    fn respects_the_rest_floor() {
        let staff = registered(&["A"]);
        let span = span();
        let mut matrix = DutyMatrix::new(&staff, &span);
        // Work 22 days: exactly 6 rest days remain, so nothing may be taken.
        for day in 1..=22 {
            let code = if day % 7 == 0 {
                ShiftCode::Off
            } else {
                ShiftCode::Day
            };
            matrix.set(0, day, code);
        }
        let off_before = matrix.off_count(0);
        assert_eq!(off_before, 9);

        // Shrink the remaining rest budget to the floor.
        matrix.set(0, 23, ShiftCode::Day);
        matrix.set(0, 24, ShiftCode::Day);
        matrix.set(0, 25, ShiftCode::Day);
        assert_eq!(matrix.off_count(0), 6);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let placed = repair_night(
            &mut matrix, &staff, &span, &checker, &config, &mut rng, 27, 10,
        );
        assert!(!placed);
    }

    #[test]
    fn relaxed_cap_unlocks_a_blocked_night() {
        let staff = registered(&["A", "B"]);
        let span = span();
        let mut matrix = DutyMatrix::new(&staff, &span);
        // Nurse A already carries ten nights; nurse B is blocked on day 20.
        for day in [1, 2, 4, 5, 7, 8, 10, 11, 13, 14] {
            matrix.set(0, day, ShiftCode::Night);
        }
        matrix.set(1, 20, ShiftCode::Day);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(!repair_night(
            &mut matrix, &staff, &span, &checker, &config, &mut rng, 20, 10,
        ));
        assert!(repair_night(
            &mut matrix, &staff, &span, &checker, &config, &mut rng, 20, 11,
        ));
        assert_eq!(matrix.night_count(0), 11);
    }
}

use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::EngineConfig;
use crate::domain::services::feasibility::FeasibilityChecker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::{Role, ShiftCode};

/// Equalizes rest across the interchangeable registered nurses.
///
/// Each iteration moves at most one day or evening shift from the most
/// worked nurse to the most rested one; single swaps keep the adjacency and
/// streak rules from cascading. Convergence is judged on an adjusted rest
/// score that discounts night-heavy schedules, held in tenths so no float
/// comparison is needed.
pub fn balance(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
) {
    let registered: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(_, record)| record.role == Role::Registered)
        .map(|(nurse, _)| nurse)
        .collect();
    if registered.len() < 2 {
        return;
    }

    for _ in 0..config.balance_iterations {
        let rested = pick_by_score(matrix, &registered, config, true);
        let worked = pick_by_score(matrix, &registered, config, false);
        let gap = adjusted_rest_tenths(matrix, rested, config)
            - adjusted_rest_tenths(matrix, worked, config);
        if gap <= i64::from(config.balance_gap) * 10 {
            break;
        }

        if !transfer_one_shift(matrix, staff, span, checker, rng, worked, rested) {
            break;
        }
    }
}

/// Rest score in tenths: `off * 10 - nights * weight`, weight 10 once the
/// nurse is over the night cap, else 3.
fn adjusted_rest_tenths(matrix: &DutyMatrix, nurse: usize, config: &EngineConfig) -> i64 {
    let nights = i64::from(matrix.night_count(nurse));
    let weight = if matrix.night_count(nurse) > config.night_cap {
        10
    } else {
        3
    };
    i64::from(matrix.off_count(nurse)) * 10 - nights * weight
}

fn pick_by_score(
    matrix: &DutyMatrix,
    registered: &[usize],
    config: &EngineConfig,
    highest: bool,
) -> usize {
    let key = |&&nurse: &&usize| adjusted_rest_tenths(matrix, nurse, config);
    let chosen = if highest {
        registered.iter().max_by_key(key)
    } else {
        registered.iter().min_by_key(key)
    };
    *chosen.unwrap_or(&registered[0])
}

fn transfer_one_shift(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    rng: &mut StdRng,
    worked: usize,
    rested: usize,
) -> bool {
    let mut days: Vec<u32> = span.days().collect();
    days.shuffle(rng);

    for day in days {
        if !matches!(matrix.cell(rested, day), None | Some(ShiftCode::Off)) {
            continue;
        }
        let shift = match matrix.cell(worked, day) {
            Some(code @ (ShiftCode::Day | ShiftCode::Evening)) => code,
            _ => continue,
        };
        // A duty the giver pinned for that day is not transferable.
        if staff[worked]
            .duty_filter(day)
            .map_or(false, |codes| codes.len() == 1)
        {
            continue;
        }
        if checker.reassignable(matrix, staff, rested, day, shift, true) {
            matrix.set(rested, day, shift);
            matrix.set(worked, day, ShiftCode::Off);
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

    #[test]
    fn narrows_a_wide_rest_gap() {
        let staff = vec![
            Nurse::from_free_text("Busy", Role::Registered, "", "", 0, 28),
            Nurse::from_free_text("Idle", Role::Registered, "", "", 0, 28),
        ];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        let mut matrix = DutyMatrix::new(&staff, &span);
        for day in span.days() {
            matrix.set(0, day, if day % 2 == 0 { ShiftCode::Day } else { ShiftCode::Evening });
        }
        // Even days off keep nurse 0 inside the streak limit.
        for day in span.days().filter(|d| d % 7 == 0) {
            matrix.set(0, day, ShiftCode::Off);
        }
        let before = matrix.off_count(1) - matrix.off_count(0);
        assert!(before > 2);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        balance(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        let after = matrix.off_count(1).abs_diff(matrix.off_count(0));
        assert!(after < before, "gap {} did not narrow from {}", after, before);
    }

    #[test]
    fn transfers_preserve_daily_cover() {
        let staff = vec![
            Nurse::from_free_text("Busy", Role::Registered, "", "", 0, 28),
            Nurse::from_free_text("Idle", Role::Registered, "", "", 0, 28),
        ];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        let mut matrix = DutyMatrix::new(&staff, &span);
        for day in 1..=6 {
            matrix.set(0, day, ShiftCode::Day);
        }

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(18);
        balance(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        for day in 1..=6 {
            assert!(
                matrix.column_has(day, ShiftCode::Day),
                "day {} lost its day shift",
                day
            );
        }
    }

    #[test]
    fn single_registered_nurse_is_a_no_op() {
        let staff = vec![Nurse::from_free_text("Solo", Role::Registered, "", "", 0, 28)];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        let mut matrix = DutyMatrix::new(&staff, &span);
        matrix.set(0, 1, ShiftCode::Day);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(19);
        balance(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        assert_eq!(matrix.cell(0, 1), Some(ShiftCode::Day));
    }
}

use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::EngineConfig;
use crate::domain::services::feasibility::FeasibilityChecker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::{Role, ShiftCode};
use std::cmp::Reverse;

/// Enforces the per-nurse rest floor after balancing.
///
/// A nurse below the floor releases day or evening shifts until the floor is
/// met, preferring days where a peer already holds the same shift so the
/// column keeps its cover. Each freed slot is then offered to a registered
/// nurse with rest to spare.
pub fn enforce_off_floor(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
) {
    for nurse in 0..staff.len() {
        if !matches!(staff[nurse].role, Role::Head | Role::Registered) {
            continue;
        }
        while matrix.off_count(nurse) < config.min_off_days {
            let Some((day, shift)) = pick_release_day(matrix, &staff[nurse], nurse, span, rng)
            else {
                break;
            };
            matrix.set(nurse, day, ShiftCode::Off);
            refill_slot(matrix, staff, checker, config, rng, nurse, day, shift);
        }
    }
}

/// A day/evening duty to give up, covered-elsewhere days first. Days the
/// nurse pinned through a single-code fixed entry are never released.
fn pick_release_day(
    matrix: &DutyMatrix,
    record: &Nurse,
    nurse: usize,
    span: &MonthSpan,
    rng: &mut StdRng,
) -> Option<(u32, ShiftCode)> {
    let mut days: Vec<u32> = span
        .days()
        .filter(|&day| {
            matches!(
                matrix.cell(nurse, day),
                Some(ShiftCode::Day) | Some(ShiftCode::Evening)
            ) && record.duty_filter(day).map_or(true, |codes| codes.len() != 1)
        })
        .collect();
    if days.is_empty() {
        return None;
    }
    days.shuffle(rng);

    let covered_elsewhere = days.iter().copied().find(|&day| {
        let held = matrix.cell(nurse, day);
        (0..matrix.nurse_count()).any(|peer| peer != nurse && matrix.cell(peer, day) == held)
    });
    let day = covered_elsewhere.unwrap_or(days[0]);
    matrix.cell(nurse, day).map(|shift| (day, shift))
}

#[allow(clippy::too_many_arguments)]
fn refill_slot(
    matrix: &mut DutyMatrix,
    staff: &[Nurse],
    checker: &FeasibilityChecker,
    config: &EngineConfig,
    rng: &mut StdRng,
    released_by: usize,
    day: u32,
    shift: ShiftCode,
) {
    let mut peers: Vec<usize> = staff
        .iter()
        .enumerate()
        .filter(|(peer, record)| {
            *peer != released_by
                && record.role == Role::Registered
                && matrix.off_count(*peer) > config.min_off_days
        })
        .map(|(peer, _)| peer)
        .collect();
    peers.shuffle(rng);
    peers.sort_by_key(|&peer| Reverse(matrix.off_count(peer)));

    for &peer in &peers {
        if checker.reassignable(matrix, staff, peer, day, shift, true) {
            matrix.set(peer, day, shift);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn fixture() -> (Vec<Nurse>, MonthSpan) {
        let staff = vec![
            Nurse::from_free_text("Tired", Role::Registered, "", "", 0, 28),
            Nurse::from_free_text("Rested", Role::Registered, "", "", 0, 28),
        ];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        (staff, span)
    }

    #[test]
    fn lifts_a_nurse_back_to_the_floor() {
        let (staff, span) = fixture();
        let mut matrix = DutyMatrix::new(&staff, &span);
        // 25 work days leave only 3 rest days.
        for day in span.days() {
            let code = if day % 8 == 0 {
                ShiftCode::Off
            } else if day % 2 == 0 {
                ShiftCode::Day
            } else {
                ShiftCode::Evening
            };
            matrix.set(0, day, code);
        }
        assert!(matrix.off_count(0) < 6);

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(31);
        enforce_off_floor(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        assert!(matrix.off_count(0) >= 6);
    }

    #[test]
    fn freed_slots_are_offered_to_rested_peers() {
        let (staff, span) = fixture();
        let mut matrix = DutyMatrix::new(&staff, &span);
        for day in span.days() {
            let code = if day % 8 == 0 {
                ShiftCode::Off
            } else if day % 2 == 0 {
                ShiftCode::Day
            } else {
                ShiftCode::Evening
            };
            matrix.set(0, day, code);
        }

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(32);
        enforce_off_floor(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        // The rested peer picked up at least one released duty.
        assert!(matrix.work_count(1) > 0);
    }

    #[test]
    fn pinned_duties_are_never_released() {
        let staff = vec![
            Nurse::from_free_text("Tired", Role::Registered, "", "5=E", 0, 28),
            Nurse::from_free_text("Rested", Role::Registered, "", "", 0, 28),
        ];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        let mut matrix = DutyMatrix::new(&staff, &span);
        // Work everything except three rest days; day 5 holds the pin.
        for day in span.days() {
            let code = if day % 8 == 0 {
                ShiftCode::Off
            } else if day == 5 {
                ShiftCode::Evening
            } else if day % 2 == 0 {
                ShiftCode::Day
            } else {
                ShiftCode::Evening
            };
            matrix.set(0, day, code);
        }

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(34);
        enforce_off_floor(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        assert!(matrix.off_count(0) >= 6);
        assert_eq!(matrix.cell(0, 5), Some(ShiftCode::Evening));
    }

    #[test]
    fn assistants_are_left_alone() {
        let staff = vec![Nurse::from_free_text(
            "Assist",
            Role::Assistant,
            "",
            "",
            0,
            28,
        )];
        let span = MonthSpan::new(2026, 2, BTreeSet::new()).unwrap();
        let mut matrix = DutyMatrix::new(&staff, &span);
        for day in span.days() {
            matrix.set(0, day, ShiftCode::Admin);
        }

        let checker = FeasibilityChecker::new(6);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(33);
        enforce_off_floor(&mut matrix, &staff, &span, &checker, &config, &mut rng);

        assert_eq!(matrix.off_count(0), 0);
    }
}

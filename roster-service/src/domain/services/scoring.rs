use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::EngineConfig;
use serde::Serialize;
use shared::{Role, ShiftCode};
use utoipa::ToSchema;

const HOLE_WEIGHT: u64 = 9_999_999;
const FLOOR_AND_CAP_WEIGHT: u64 = 999_999;
const SPREAD_WEIGHT: u64 = 50;
const ISOLATED_WEIGHT: u64 = 30;
const LONG_RUN_WEIGHT: u64 = 40;

/// Per-term violation counts for one candidate roster. The weighted total
/// ranks candidates; the raw terms are surfaced so operators can see which
/// soft constraint dominated.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct ScoreBreakdown {
    /// Days lacking at least one required shift.
    pub coverage_holes: u32,
    /// Max minus min rest-day count across registered nurses.
    pub rest_spread: u32,
    /// Rest days sandwiched between work on both sides.
    pub isolated_rest_days: u32,
    /// Rest runs of four days or longer.
    pub long_rest_runs: u32,
    /// Head/registered nurses under the rest floor.
    pub under_rest_floor: u32,
    /// Nurses over the hard night ceiling.
    pub over_night_ceiling: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u64 {
        SPREAD_WEIGHT * u64::from(self.rest_spread)
            + ISOLATED_WEIGHT * u64::from(self.isolated_rest_days)
            + LONG_RUN_WEIGHT * u64::from(self.long_rest_runs)
            + HOLE_WEIGHT * u64::from(self.coverage_holes)
            + FLOOR_AND_CAP_WEIGHT * u64::from(self.under_rest_floor + self.over_night_ceiling)
    }

    /// The early-exit test: a candidate good enough to stop the simulation.
    pub fn is_release_ready(&self, config: &EngineConfig) -> bool {
        self.coverage_holes == 0
            && self.under_rest_floor == 0
            && self.over_night_ceiling == 0
            && self.rest_spread <= config.exit_spread
            && self.isolated_rest_days <= config.exit_isolated
            && self.long_rest_runs == 0
    }
}

/// Scores a finished attempt. Unassigned cells are read as rest, matching
/// the normalization applied at emission.
pub fn score(
    matrix: &DutyMatrix,
    staff: &[Nurse],
    span: &MonthSpan,
    config: &EngineConfig,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        coverage_holes: count_holes(matrix, span),
        ..ScoreBreakdown::default()
    };

    let mut rest_min = u32::MAX;
    let mut rest_max = 0;
    for (nurse, record) in staff.iter().enumerate() {
        let rests = matrix.off_count(nurse);
        match record.role {
            Role::Registered => {
                rest_min = rest_min.min(rests);
                rest_max = rest_max.max(rests);
            }
            Role::Head | Role::Assistant => {}
        }
        if matrix.night_count(nurse) > config.night_cap_relaxed {
            breakdown.over_night_ceiling += 1;
        }
        if matches!(record.role, Role::Head | Role::Registered) {
            if rests < config.min_off_days {
                breakdown.under_rest_floor += 1;
            }
            let (isolated, long_runs) = rest_shape(matrix, nurse, span, config);
            breakdown.isolated_rest_days += isolated;
            breakdown.long_rest_runs += long_runs;
        }
    }
    if rest_min != u32::MAX {
        breakdown.rest_spread = rest_max - rest_min;
    }

    breakdown
}

fn count_holes(matrix: &DutyMatrix, span: &MonthSpan) -> u32 {
    span.days()
        .filter(|&day| {
            let covers_day = (0..matrix.nurse_count())
                .any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_day));
            let covers_evening = (0..matrix.nurse_count())
                .any(|n| matrix.cell(n, day).is_some_and(ShiftCode::covers_evening));
            let has_night = matrix.column_has(day, ShiftCode::Night);
            !(has_night && covers_day && covers_evening)
        })
        .count() as u32
}

/// Isolated one-day rests and long rest runs for one nurse.
fn rest_shape(matrix: &DutyMatrix, nurse: usize, span: &MonthSpan, config: &EngineConfig) -> (u32, u32) {
    let resting =
        |day: u32| matrix.cell(nurse, day).map_or(true, |code| code == ShiftCode::Off);

    let mut isolated = 0;
    for day in 2..span.last_day() {
        if resting(day) && !resting(day - 1) && !resting(day + 1) {
            isolated += 1;
        }
    }

    let mut long_runs = 0;
    let mut run = 0;
    for day in span.days() {
        if resting(day) {
            run += 1;
        } else {
            if run >= config.long_rest_run {
                long_runs += 1;
            }
            run = 0;
        }
    }
    if run >= config.long_rest_run {
        long_runs += 1;
    }

    (isolated, long_runs)
}

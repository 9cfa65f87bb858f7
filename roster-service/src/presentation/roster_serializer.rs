use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{JobStatus, Role, ShiftCode};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::{DutyAssignment, RosterJob};
use crate::domain::services::scoring::ScoreBreakdown;

/// Roster job response after submission
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterJobSerialize {
    pub roster_id: Uuid,
    pub status: JobStatus,
}

impl From<RosterJob> for RosterJobSerialize {
    fn from(job: RosterJob) -> Self {
        Self {
            roster_id: job.id,
            status: job.status,
        }
    }
}

/// Roster job status response
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterStatusSerialize {
    pub roster_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub score: Option<i64>,
    pub attempts: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<RosterJob> for RosterStatusSerialize {
    fn from(job: RosterJob) -> Self {
        Self {
            roster_id: job.id,
            year: job.year,
            month: job.month,
            status: job.status,
            error_message: job.error_message,
            score: job.score,
            attempts: job.attempts,
            created_at: job.created_at,
            updated_at: job.updated_at,
            completed_at: job.completed_at,
        }
    }
}

/// One nurse row of a completed roster.
#[derive(Debug, Serialize, ToSchema)]
pub struct NurseRosterSerialize {
    pub nurse_name: String,
    pub nurse_role: Role,
    /// One code per day, `1..=last_day` in order.
    pub shifts: Vec<ShiftCode>,
    pub night_total: u32,
    /// Day numbers the nurse asked off; exporters highlight these cells.
    pub request_off_days: Vec<u32>,
}

/// Complete roster result response
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResultSerialize {
    pub roster_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub last_day: u32,
    pub attempts: Option<i32>,
    /// Per-term violation counts of the winning candidate.
    pub score: Option<ScoreBreakdown>,
    pub nurses: Vec<NurseRosterSerialize>,
}

impl RosterResultSerialize {
    pub fn assemble(job: RosterJob, last_day: u32, assignments: Vec<DutyAssignment>) -> Self {
        let mut nurses: Vec<NurseRosterSerialize> = Vec::new();
        for assignment in assignments {
            let index = match nurses
                .iter()
                .position(|n| n.nurse_name == assignment.nurse_name)
            {
                Some(index) => index,
                None => {
                    nurses.push(NurseRosterSerialize {
                        nurse_name: assignment.nurse_name.clone(),
                        nurse_role: assignment.nurse_role,
                        shifts: vec![ShiftCode::Off; last_day as usize],
                        night_total: 0,
                        request_off_days: Vec::new(),
                    });
                    nurses.len() - 1
                }
            };
            let row = &mut nurses[index];
            if (1..=last_day as i32).contains(&assignment.day) {
                row.shifts[(assignment.day - 1) as usize] = assignment.shift;
            }
            if assignment.shift == ShiftCode::Night {
                row.night_total += 1;
            }
            if assignment.requested_off {
                row.request_off_days.push(assignment.day as u32);
            }
        }

        let score = score_from_job(&job);
        Self {
            roster_id: job.id,
            year: job.year,
            month: job.month,
            last_day,
            attempts: job.attempts,
            score,
            nurses,
        }
    }
}

/// Rebuilds the score breakdown persisted on a completed job row.
fn score_from_job(job: &RosterJob) -> Option<ScoreBreakdown> {
    Some(ScoreBreakdown {
        coverage_holes: job.coverage_holes? as u32,
        rest_spread: job.rest_spread? as u32,
        isolated_rest_days: job.isolated_rest_days? as u32,
        long_rest_runs: job.long_rest_runs? as u32,
        under_rest_floor: job.under_rest_floor? as u32,
        over_night_ceiling: job.over_night_ceiling? as u32,
    })
}

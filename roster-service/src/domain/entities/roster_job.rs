use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::JobStatus;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One roster generation job. The score columns are populated on
/// completion so the per-term breakdown can be served without re-running
/// the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RosterJob {
    pub id: Uuid,
    pub year: i32,
    pub month: i32,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub score: Option<i64>,
    pub attempts: Option<i32>,
    pub coverage_holes: Option<i32>,
    pub rest_spread: Option<i32>,
    pub isolated_rest_days: Option<i32>,
    pub long_rest_runs: Option<i32>,
    pub under_rest_floor: Option<i32>,
    pub over_night_ceiling: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl RosterJob {
    pub fn pending(year: i32, month: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            year,
            month,
            status: JobStatus::Pending,
            error_message: None,
            score: None,
            attempts: None,
            coverage_holes: None,
            rest_spread: None,
            isolated_rest_days: None,
            long_rest_runs: None,
            under_rest_floor: None,
            over_night_ceiling: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}

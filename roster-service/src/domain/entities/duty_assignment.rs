use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Role, ShiftCode};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One emitted roster cell: a nurse, a day number and the duty held there.
///
/// `requested_off` flags cells that resolve a request-off day so exporters
/// can highlight them without re-parsing the original request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DutyAssignment {
    pub id: Uuid,
    pub roster_job_id: Uuid,
    pub nurse_name: String,
    pub nurse_role: Role,
    pub day: i32,
    pub shift: ShiftCode,
    pub requested_off: bool,
    pub created_at: DateTime<Utc>,
}

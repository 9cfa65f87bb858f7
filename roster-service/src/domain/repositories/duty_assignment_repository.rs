use crate::domain::entities::DutyAssignment;
use async_trait::async_trait;
use shared::DomainResult;
use uuid::Uuid;

#[async_trait]
pub trait DutyAssignmentRepository: Send + Sync {
    async fn create_batch(&self, assignments: Vec<DutyAssignment>) -> DomainResult<()>;

    /// All cells of one roster, ordered by nurse name then day.
    async fn find_by_job_id(&self, job_id: Uuid) -> DomainResult<Vec<DutyAssignment>>;
}

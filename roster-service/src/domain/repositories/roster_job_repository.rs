use crate::domain::entities::RosterJob;
use crate::domain::services::scoring::ScoreBreakdown;
use async_trait::async_trait;
use shared::{DomainResult, JobStatus};
use uuid::Uuid;

#[async_trait]
pub trait RosterJobRepository: Send + Sync {
    async fn create(&self, job: RosterJob) -> DomainResult<RosterJob>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RosterJob>>;

    /// Newest jobs first, plus the total row count for paging.
    async fn list(&self, offset: i64, limit: i64) -> DomainResult<(Vec<RosterJob>, u64)>;

    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        error_message: Option<String>,
    ) -> DomainResult<()>;

    async fn mark_completed(
        &self,
        id: Uuid,
        score: &ScoreBreakdown,
        attempts: u32,
    ) -> DomainResult<()>;

    async fn mark_failed(&self, id: Uuid, error_message: String) -> DomainResult<()>;
}

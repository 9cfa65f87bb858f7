use async_trait::async_trait;
use shared::{DomainError, DomainResult, JobStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::RosterJob;
use crate::domain::repositories::RosterJobRepository;
use crate::domain::services::scoring::ScoreBreakdown;

const JOB_COLUMNS: &str = "id, year, month, status, error_message, score, attempts, \
     coverage_holes, rest_spread, isolated_rest_days, long_rest_runs, \
     under_rest_floor, over_night_ceiling, created_at, updated_at, completed_at";

pub struct PostgresRosterJobRepository {
    pool: PgPool,
}

impl PostgresRosterJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterJobRepository for PostgresRosterJobRepository {
    async fn create(&self, job: RosterJob) -> DomainResult<RosterJob> {
        let created_job = sqlx::query_as::<_, RosterJob>(&format!(
            r#"
            INSERT INTO roster_jobs (id, year, month, status, error_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(job.id)
        .bind(job.year)
        .bind(job.month)
        .bind(job.status)
        .bind(job.error_message)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(created_job)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RosterJob>> {
        let job = sqlx::query_as::<_, RosterJob>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM roster_jobs
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(job)
    }

    async fn list(&self, offset: i64, limit: i64) -> DomainResult<(Vec<RosterJob>, u64)> {
        let jobs = sqlx::query_as::<_, RosterJob>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM roster_jobs
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roster_jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok((jobs, total as u64))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        error_message: Option<String>,
    ) -> DomainResult<()> {
        sqlx::query(
            r#"
            UPDATE roster_jobs
            SET status = $1, error_message = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(status)
        .bind(error_message)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        score: &ScoreBreakdown,
        attempts: u32,
    ) -> DomainResult<()> {
        sqlx::query(
            r#"
            UPDATE roster_jobs
            SET status = $1,
                score = $2,
                attempts = $3,
                coverage_holes = $4,
                rest_spread = $5,
                isolated_rest_days = $6,
                long_rest_runs = $7,
                under_rest_floor = $8,
                over_night_ceiling = $9,
                completed_at = NOW(),
                updated_at = NOW()
            WHERE id = $10
            "#,
        )
        .bind(JobStatus::Completed)
        .bind(score.total() as i64)
        .bind(attempts as i32)
        .bind(score.coverage_holes as i32)
        .bind(score.rest_spread as i32)
        .bind(score.isolated_rest_days as i32)
        .bind(score.long_rest_runs as i32)
        .bind(score.under_rest_floor as i32)
        .bind(score.over_night_ceiling as i32)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error_message: String) -> DomainResult<()> {
        sqlx::query(
            r#"
            UPDATE roster_jobs
            SET status = $1, error_message = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(JobStatus::Failed)
        .bind(error_message)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

use async_trait::async_trait;
use shared::{DomainError, DomainResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::DutyAssignment;
use crate::domain::repositories::DutyAssignmentRepository;

pub struct PostgresDutyAssignmentRepository {
    pool: PgPool,
}

impl PostgresDutyAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DutyAssignmentRepository for PostgresDutyAssignmentRepository {
    async fn create_batch(&self, assignments: Vec<DutyAssignment>) -> DomainResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        for assignment in assignments {
            sqlx::query(
                r#"
                INSERT INTO duty_assignments
                    (id, roster_job_id, nurse_name, nurse_role, day, shift, requested_off, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(assignment.id)
            .bind(assignment.roster_job_id)
            .bind(assignment.nurse_name)
            .bind(assignment.nurse_role)
            .bind(assignment.day)
            .bind(assignment.shift)
            .bind(assignment.requested_off)
            .bind(assignment.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_job_id(&self, job_id: Uuid) -> DomainResult<Vec<DutyAssignment>> {
        let assignments = sqlx::query_as::<_, DutyAssignment>(
            r#"
            SELECT id, roster_job_id, nurse_name, nurse_role, day, shift, requested_off, created_at
            FROM duty_assignments
            WHERE roster_job_id = $1
            ORDER BY nurse_name, day
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(assignments)
    }
}

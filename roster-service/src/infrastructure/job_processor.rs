use chrono::Utc;
use shared::{DomainResult, JobStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::requests::roster_request::RosterJobRequest;
use crate::domain::entities::DutyAssignment;
use crate::domain::repositories::{DutyAssignmentRepository, RosterJobRepository};
use crate::domain::roster_planner::{RosterDemand, RosterOutcome, RosterPlanner};

/// Background worker draining the roster job queue one request at a time.
/// Engine failures mark the job failed and never poison the loop.
pub struct JobProcessor {
    job_repo: Arc<dyn RosterJobRepository>,
    assignment_repo: Arc<dyn DutyAssignmentRepository>,
    planner: Arc<RosterPlanner>,
}

impl JobProcessor {
    pub fn new(
        job_repo: Arc<dyn RosterJobRepository>,
        assignment_repo: Arc<dyn DutyAssignmentRepository>,
        planner: Arc<RosterPlanner>,
    ) -> Self {
        Self {
            job_repo,
            assignment_repo,
            planner,
        }
    }

    pub fn start(
        self: Arc<Self>,
    ) -> (mpsc::Sender<RosterJobRequest>, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<RosterJobRequest>(100);

        let handle = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                if let Err(e) = self.process_job(request).await {
                    tracing::error!("Failed to process roster job: {:?}", e);
                }
            }
        });

        (tx, handle)
    }

    async fn process_job(&self, request: RosterJobRequest) -> DomainResult<()> {
        tracing::info!("Processing roster job {}", request.job_id);

        self.job_repo
            .update_status(request.job_id, JobStatus::Processing, None)
            .await?;

        match self.execute_planning(&request).await {
            Ok(()) => {
                tracing::info!("Successfully completed roster job {}", request.job_id);
                Ok(())
            }
            Err(e) => {
                let error_message = format!("Roster generation failed: {:?}", e);
                self.job_repo
                    .mark_failed(request.job_id, error_message.clone())
                    .await?;
                tracing::error!("Roster job {} failed: {}", request.job_id, error_message);
                Err(e)
            }
        }
    }

    async fn execute_planning(&self, request: &RosterJobRequest) -> DomainResult<()> {
        tracing::info!(
            "Generating {}-{:02} roster for {} nurses",
            request.demand.year,
            request.demand.month,
            request.demand.staff.len()
        );

        let outcome = self.planner.plan(&request.demand)?;

        tracing::info!(
            attempts = outcome.attempts,
            score = outcome.score.total(),
            "Roster simulation picked a candidate"
        );

        let assignments = emit_assignments(request.job_id, &request.demand, &outcome);
        self.assignment_repo.create_batch(assignments).await?;
        self.job_repo
            .mark_completed(request.job_id, &outcome.score, outcome.attempts)
            .await?;

        Ok(())
    }
}

/// Flattens the winning matrix into assignment rows, tagging cells that
/// resolve a request-off day for exporter highlighting.
fn emit_assignments(
    job_id: Uuid,
    demand: &RosterDemand,
    outcome: &RosterOutcome,
) -> Vec<DutyAssignment> {
    let now = Utc::now();
    let mut assignments = Vec::with_capacity(demand.staff.len() * outcome.last_day as usize);
    for (nurse, row) in demand.staff.iter().zip(&outcome.rows) {
        for (index, &shift) in row.iter().enumerate() {
            let day = index as u32 + 1;
            assignments.push(DutyAssignment {
                id: Uuid::new_v4(),
                roster_job_id: job_id,
                nurse_name: nurse.name.clone(),
                nurse_role: nurse.role,
                day: day as i32,
                shift,
                requested_off: nurse.request_off.contains(&day),
                created_at: now,
            });
        }
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nurse::Nurse;
    use crate::domain::roster_planner::EngineConfig;
    use shared::{Role, ShiftCode};
    use std::collections::BTreeSet;

    #[test]
    fn emitted_assignments_cover_the_whole_grid() {
        let staff = vec![
            Nurse::from_free_text("Kim", Role::Registered, "1,2", "", 0, 28),
            Nurse::from_free_text("Lee", Role::Registered, "", "", 0, 28),
        ];
        let demand = RosterDemand {
            year: 2026,
            month: 2,
            holidays: BTreeSet::new(),
            staff,
            seed: Some(5),
        };
        let planner = RosterPlanner::new(EngineConfig::default());
        let outcome = planner.plan(&demand).unwrap();

        let job_id = Uuid::new_v4();
        let assignments = emit_assignments(job_id, &demand, &outcome);

        assert_eq!(assignments.len(), 2 * 28);
        assert!(assignments.iter().all(|a| a.roster_job_id == job_id));

        // Request-off cells are flagged and resolved to rest.
        let kim_day1 = assignments
            .iter()
            .find(|a| a.nurse_name == "Kim" && a.day == 1)
            .unwrap();
        assert!(kim_day1.requested_off);
        assert_eq!(kim_day1.shift, ShiftCode::Off);
    }
}

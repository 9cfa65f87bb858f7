use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use roster_service::api::requests::roster_request::RosterJobRequest;
use roster_service::api::AppState;
use roster_service::domain::entities::{DutyAssignment, RosterJob};
use roster_service::domain::repositories::{DutyAssignmentRepository, RosterJobRepository};
use roster_service::domain::services::scoring::ScoreBreakdown;
use shared::{DomainError, DomainResult, JobStatus, Role, ShiftCode};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use uuid::Uuid;

// Generate a mockall mock for the job repository, used to script failures
// that the hand-rolled in-memory mocks cannot produce.
mock! {
    pub FailingRosterJobRepository {}

    #[async_trait]
    impl RosterJobRepository for FailingRosterJobRepository {
        async fn create(&self, job: RosterJob) -> DomainResult<RosterJob>;
        async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RosterJob>>;
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
}

/// Manual mock implementation for RosterJobRepository
#[derive(Default)]
pub struct MockRosterJobRepository {
    jobs: RwLock<HashMap<Uuid, RosterJob>>,
}

impl MockRosterJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(job_list: Vec<RosterJob>) -> Self {
        let repo = Self::new();
        {
            let mut jobs = repo.jobs.write().unwrap();
            for job in job_list {
                jobs.insert(job.id, job);
            }
        }
        repo
    }
}

#[async_trait]
impl RosterJobRepository for MockRosterJobRepository {
    async fn create(&self, job: RosterJob) -> DomainResult<RosterJob> {
        self.jobs.write().unwrap().insert(job.id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RosterJob>> {
        Ok(self.jobs.read().unwrap().get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> DomainResult<(Vec<RosterJob>, u64)> {
        let jobs = self.jobs.read().unwrap();
        let mut all: Vec<RosterJob> = jobs.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len() as u64;
        let page = all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        error_message: Option<String>,
    ) -> DomainResult<()> {
        let mut jobs = self.jobs.write().unwrap();
        if let Some(job) = jobs.get_mut(&id) {
            job.status = status;
            job.error_message = error_message;
            job.updated_at = Utc::now();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Job {} not found", id)))
        }
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        score: &ScoreBreakdown,
        attempts: u32,
    ) -> DomainResult<()> {
        let mut jobs = self.jobs.write().unwrap();
        if let Some(job) = jobs.get_mut(&id) {
            job.status = JobStatus::Completed;
            job.score = Some(score.total() as i64);
            job.attempts = Some(attempts as i32);
            job.coverage_holes = Some(score.coverage_holes as i32);
            job.rest_spread = Some(score.rest_spread as i32);
            job.isolated_rest_days = Some(score.isolated_rest_days as i32);
            job.long_rest_runs = Some(score.long_rest_runs as i32);
            job.under_rest_floor = Some(score.under_rest_floor as i32);
            job.over_night_ceiling = Some(score.over_night_ceiling as i32);
            job.completed_at = Some(Utc::now());
            job.updated_at = Utc::now();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Job {} not found", id)))
        }
    }

    async fn mark_failed(&self, id: Uuid, error_message: String) -> DomainResult<()> {
        let mut jobs = self.jobs.write().unwrap();
        if let Some(job) = jobs.get_mut(&id) {
            job.status = JobStatus::Failed;
            job.error_message = Some(error_message);
            job.updated_at = Utc::now();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Job {} not found", id)))
        }
    }
}

/// Manual mock implementation for DutyAssignmentRepository
#[derive(Default)]
pub struct MockDutyAssignmentRepository {
    assignments: RwLock<Vec<DutyAssignment>>,
}

impl MockDutyAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignments(assignment_list: Vec<DutyAssignment>) -> Self {
        let repo = Self::new();
        {
            let mut assignments = repo.assignments.write().unwrap();
            *assignments = assignment_list;
        }
        repo
    }
}

#[async_trait]
impl DutyAssignmentRepository for MockDutyAssignmentRepository {
    async fn create_batch(&self, new_assignments: Vec<DutyAssignment>) -> DomainResult<()> {
        let mut current = self.assignments.write().unwrap();
        current.extend(new_assignments);
        Ok(())
    }

    async fn find_by_job_id(&self, job_id: Uuid) -> DomainResult<Vec<DutyAssignment>> {
        let assignments = self.assignments.read().unwrap();
        let mut matching: Vec<DutyAssignment> = assignments
            .iter()
            .filter(|a| a.roster_job_id == job_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| (&a.nurse_name, a.day).cmp(&(&b.nurse_name, b.day)));
        Ok(matching)
    }
}

/// Create test app state with mock repositories and a dummy channel
pub fn create_test_app_state(
    job_repo: Arc<dyn RosterJobRepository>,
    assignment_repo: Arc<dyn DutyAssignmentRepository>,
) -> (AppState, mpsc::Receiver<RosterJobRequest>) {
    let (sender, receiver) = mpsc::channel::<RosterJobRequest>(100);

    let state = AppState::new(job_repo, assignment_repo, sender);
    (state, receiver)
}

/// Struct to hold test server and keep receiver alive
pub struct TestServerWithReceiver {
    pub server: axum_test::TestServer,
    #[allow(dead_code)]
    pub receiver: mpsc::Receiver<RosterJobRequest>,
}

/// Create a sample roster job for testing
pub fn create_sample_job(id: Uuid, year: i32, month: i32, status: JobStatus) -> RosterJob {
    let mut job = RosterJob::pending(year, month);
    job.id = id;
    job.status = status;
    job
}

/// Create a completed job carrying a clean score breakdown
pub fn create_completed_job(id: Uuid, year: i32, month: i32) -> RosterJob {
    let mut job = create_sample_job(id, year, month, JobStatus::Completed);
    job.score = Some(100);
    job.attempts = Some(3);
    job.coverage_holes = Some(0);
    job.rest_spread = Some(2);
    job.isolated_rest_days = Some(0);
    job.long_rest_runs = Some(0);
    job.under_rest_floor = Some(0);
    job.over_night_ceiling = Some(0);
    job.completed_at = Some(Utc::now());
    job
}

/// Create sample duty assignments: a repeating D/E/N/OFF texture
pub fn create_sample_assignments(
    job_id: Uuid,
    nurse_names: &[&str],
    last_day: u32,
) -> Vec<DutyAssignment> {
    let now = Utc::now();
    let shifts = [
        ShiftCode::Day,
        ShiftCode::Evening,
        ShiftCode::Night,
        ShiftCode::Off,
    ];
    let mut assignments = Vec::new();

    for (offset, name) in nurse_names.iter().enumerate() {
        for day in 1..=last_day {
            let shift = shifts[(offset + day as usize) % shifts.len()];
            assignments.push(DutyAssignment {
                id: Uuid::new_v4(),
                roster_job_id: job_id,
                nurse_name: name.to_string(),
                nurse_role: Role::Registered,
                day: day as i32,
                shift,
                requested_off: false,
                created_at: now,
            });
        }
    }

    assignments
}

/// A small ward roster request body shared by the API tests
pub fn sample_request_body(year: i32, month: u32) -> serde_json::Value {
    serde_json::json!({
        "year": year,
        "month": month,
        "holidays": [],
        "staff": [
            { "name": "Head", "role": "HN" },
            { "name": "R1", "role": "RN", "request_off": "1,2" },
            { "name": "R2", "role": "RN" },
            { "name": "R3", "role": "RN" },
            { "name": "Assist", "role": "AN" }
        ],
        "seed": 7
    })
}

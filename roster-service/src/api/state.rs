use crate::api::requests::roster_request::RosterJobRequest;
use crate::domain::repositories::{DutyAssignmentRepository, RosterJobRepository};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub job_repo: Arc<dyn RosterJobRepository>,
    pub assignment_repo: Arc<dyn DutyAssignmentRepository>,
    pub roster_sender: mpsc::Sender<RosterJobRequest>,
}

impl AppState {
    pub fn new(
        job_repo: Arc<dyn RosterJobRepository>,
        assignment_repo: Arc<dyn DutyAssignmentRepository>,
        roster_sender: mpsc::Sender<RosterJobRequest>,
    ) -> Self {
        Self {
            job_repo,
            assignment_repo,
            roster_sender,
        }
    }
}

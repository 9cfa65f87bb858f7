pub mod duty_assignment;
pub mod roster_job;

pub use duty_assignment::DutyAssignment;
pub use roster_job::RosterJob;

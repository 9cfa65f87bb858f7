use crate::domain::calendar::MonthSpan;
use crate::domain::nurse::Nurse;
use crate::domain::roster_planner::RosterDemand;
use serde::Deserialize;
use shared::{DomainError, DomainResult, Role};
use std::collections::{BTreeSet, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRosterRequest {
    pub year: i32,
    pub month: u32,
    /// Public-holiday day numbers inside the target month.
    #[serde(default)]
    pub holidays: Vec<u32>,
    pub staff: Vec<StaffMemberRequest>,
    /// Fixes the simulation randomness for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffMemberRequest {
    pub name: String,
    pub role: Role,
    /// Free text `"d1, d2, d3"`: days that must resolve to rest.
    /// Unparseable fragments are skipped, never rejected.
    #[serde(default)]
    pub request_off: String,
    /// Free text `"d=c1/c2, d=c"`. A single code pins the day during
    /// pre-fill; several codes only restrict what may be placed there.
    #[serde(default)]
    pub fixed_duties: String,
    #[serde(default)]
    pub annual_leave: u32,
}

impl CreateRosterRequest {
    /// Normalizes the request into a planner demand. Free-text staff fields
    /// degrade leniently; the frame is strict: an invalid year/month or a
    /// duplicate nurse name rejects the whole request.
    pub fn into_demand(self) -> DomainResult<RosterDemand> {
        let holidays: BTreeSet<u32> = self.holidays.iter().copied().collect();
        let span = MonthSpan::new(self.year, self.month, holidays.clone())?;

        let mut seen = HashSet::new();
        for member in &self.staff {
            if !seen.insert(member.name.as_str()) {
                return Err(DomainError::InvalidInput(format!(
                    "duplicate nurse name: {}",
                    member.name
                )));
            }
        }

        let staff = self
            .staff
            .iter()
            .map(|member| {
                Nurse::from_free_text(
                    member.name.clone(),
                    member.role,
                    &member.request_off,
                    &member.fixed_duties,
                    member.annual_leave,
                    span.last_day(),
                )
            })
            .collect();

        Ok(RosterDemand {
            year: self.year,
            month: self.month,
            holidays,
            staff,
            seed: self.seed,
        })
    }
}

/// The message handed to the background processor.
#[derive(Debug)]
pub struct RosterJobRequest {
    pub job_id: Uuid,
    pub demand: RosterDemand,
}

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use shared::{ApiResponse, JobStatus, PaginatedResponse, PaginationParams};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::api::requests::roster_request::RosterJobRequest;
use crate::api::requests::CreateRosterRequest;
use crate::api::state::AppState;
use crate::domain::calendar::MonthSpan;
use crate::domain::entities::RosterJob;
use crate::presentation::{
    RosterJobSerialize, RosterResultSerialize, RosterStatusSerialize, RosterTable,
};

/// Submit a new roster generation job
#[utoipa::path(
    post,
    path = "/api/v1/rosters",
    request_body = CreateRosterRequest,
    responses(
        (status = 202, description = "Roster job accepted for processing", body = RosterJobSerialize),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn submit_roster(
    State(state): State<AppState>,
    Json(request): Json<CreateRosterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let demand = request
        .into_demand()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let job = RosterJob::pending(demand.year, demand.month as i32);

    let created_job = state
        .job_repo
        .create(job)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let roster_request = RosterJobRequest {
        job_id: created_job.id,
        demand,
    };

    state.roster_sender.send(roster_request).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to submit job: {}", e),
        )
    })?;

    let response = RosterJobSerialize::from(created_job);

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(
            "Roster job accepted for processing",
            response,
        )),
    ))
}

/// List roster jobs
#[utoipa::path(
    get,
    path = "/api/v1/rosters",
    params(PaginationParams),
    responses(
        (status = 200, description = "Roster jobs retrieved", body = [RosterStatusSerialize]),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn list_rosters(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (jobs, total) = state
        .job_repo
        .list(pagination.offset(), pagination.limit())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let data: Vec<RosterStatusSerialize> = jobs.into_iter().map(Into::into).collect();
    let page = PaginatedResponse::new(data, pagination.page, pagination.page_size, total);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_total(
            "Roster jobs retrieved successfully",
            page,
            total,
        )),
    ))
}

/// Get roster job status
#[utoipa::path(
    get,
    path = "/api/v1/rosters/{roster_id}/status",
    params(
        ("roster_id" = Uuid, Path, description = "Roster job ID")
    ),
    responses(
        (status = 200, description = "Roster status retrieved", body = RosterStatusSerialize),
        (status = 404, description = "Roster not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn get_roster_status(
    State(state): State<AppState>,
    Path(roster_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let job = state
        .job_repo
        .find_by_id(roster_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Roster not found".to_string()))?;

    let response = RosterStatusSerialize::from(job);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Roster status retrieved successfully",
            response,
        )),
    ))
}

/// Get the completed roster matrix
#[utoipa::path(
    get,
    path = "/api/v1/rosters/{roster_id}",
    params(
        ("roster_id" = Uuid, Path, description = "Roster job ID")
    ),
    responses(
        (status = 200, description = "Roster result retrieved", body = RosterResultSerialize),
        (status = 404, description = "Roster not found"),
        (status = 400, description = "Roster not completed yet"),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn get_roster_result(
    State(state): State<AppState>,
    Path(roster_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (job, last_day) = completed_job(&state, roster_id).await?;

    let assignments = state
        .assignment_repo
        .find_by_job_id(roster_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let response = RosterResultSerialize::assemble(job, last_day, assignments);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Roster result retrieved successfully",
            response,
        )),
    ))
}

/// Get the completed roster as the tabular export layout
#[utoipa::path(
    get,
    path = "/api/v1/rosters/{roster_id}/table",
    params(
        ("roster_id" = Uuid, Path, description = "Roster job ID")
    ),
    responses(
        (status = 200, description = "Roster table rendered", body = String, content_type = "text/csv"),
        (status = 404, description = "Roster not found"),
        (status = 400, description = "Roster not completed yet"),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn get_roster_table(
    State(state): State<AppState>,
    Path(roster_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (_, last_day) = completed_job(&state, roster_id).await?;

    let assignments = state
        .assignment_repo
        .find_by_job_id(roster_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let table = RosterTable::from_assignments(last_day, &assignments);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        table.render(),
    ))
}

/// Looks up a job, insisting it finished, and derives its month length.
async fn completed_job(
    state: &AppState,
    roster_id: Uuid,
) -> Result<(RosterJob, u32), (StatusCode, String)> {
    let job = state
        .job_repo
        .find_by_id(roster_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Roster not found".to_string()))?;

    if job.status != JobStatus::Completed {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "Roster is not completed yet. Current status: {:?}",
                job.status
            ),
        ));
    }

    let span = MonthSpan::new(job.year, job.month as u32, BTreeSet::new())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((job, span.last_day()))
}

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::domain::services::scoring::ScoreBreakdown;
use crate::presentation::{
    NurseRosterSerialize, RosterJobSerialize, RosterResultSerialize, RosterStatusSerialize,
};
use shared::{JobStatus, Role, ShiftCode};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster Service API",
        version = "1.0.0",
        description = "Asynchronous monthly nurse duty roster generation API"
    ),
    paths(
        crate::api::handlers::roster_handlers::submit_roster,
        crate::api::handlers::roster_handlers::list_rosters,
        crate::api::handlers::roster_handlers::get_roster_status,
        crate::api::handlers::roster_handlers::get_roster_result,
        crate::api::handlers::roster_handlers::get_roster_table,
    ),
    components(schemas(
        crate::api::requests::CreateRosterRequest,
        crate::api::requests::StaffMemberRequest,
        RosterJobSerialize,
        RosterStatusSerialize,
        RosterResultSerialize,
        NurseRosterSerialize,
        ScoreBreakdown,
        JobStatus,
        ShiftCode,
        Role,
    ))
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route(
            "/rosters",
            post(handlers::submit_roster).get(handlers::list_rosters),
        )
        .route(
            "/rosters/:roster_id/status",
            get(handlers::get_roster_status),
        )
        .route("/rosters/:roster_id", get(handlers::get_roster_result))
        .route("/rosters/:roster_id/table", get(handlers::get_roster_table));

    Router::new()
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

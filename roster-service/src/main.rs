use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_service::api::{self, AppState};
use roster_service::domain::repositories::{DutyAssignmentRepository, RosterJobRepository};
use roster_service::domain::roster_planner::RosterPlanner;
use roster_service::infrastructure::{
    config::Settings,
    database,
    repositories::{PostgresDutyAssignmentRepository, PostgresRosterJobRepository},
    JobProcessor,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Roster Service...");

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    // Initialize database pool
    let db_pool =
        database::create_pool(&settings.database.url, settings.database.max_connections).await?;
    tracing::info!("Database connection pool created");

    // Run migrations
    database::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize repositories
    let job_repo: Arc<dyn RosterJobRepository> =
        Arc::new(PostgresRosterJobRepository::new(db_pool.clone()));
    let assignment_repo: Arc<dyn DutyAssignmentRepository> =
        Arc::new(PostgresDutyAssignmentRepository::new(db_pool.clone()));

    // Initialize the planner from the configured policy knobs
    let planner = Arc::new(RosterPlanner::new(settings.engine.clone().into()));

    // Start the background job processor
    let processor = Arc::new(JobProcessor::new(
        job_repo.clone(),
        assignment_repo.clone(),
        planner,
    ));
    let (roster_sender, _processor_handle) = processor.start();
    tracing::info!("Roster job processor started");

    // Create application state and router
    let app_state = AppState::new(job_repo, assignment_repo, roster_sender);
    let app = api::create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(settings.server_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Roster Service listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

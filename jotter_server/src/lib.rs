use std::sync::Arc;

use axum::Router;
use diesel::{Connection, PgConnection};
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
pub mod utils;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(OpenApi)]
#[openapi(info(
    title = "Jotter Server",
    description = "Endpoints for taking notes and summarizing them"
))]
struct ApiDoc;

/// Install the global tracing subscriber. Filtering is controlled with
/// `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Connect to the database, run any pending migrations, and build the
/// server state.
pub async fn init(
    config: models::config::ServerConfig,
) -> Result<models::state::JotterState, Box<dyn std::error::Error>> {
    let models::config::ServerConfig {
        database_url,
        inference,
        ..
    } = config;

    // Run migrations at startup so the notes table always exists.
    let mut conn = PgConnection::establish(&database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("failed to run migrations: {err}"))?;
    tracing::info!("database ready");

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = bb8::Pool::builder().build(manager).await?;
    let store = Arc::new(store::PgNoteStore::new(pool));
    let summary_client = client::SummaryClient::new(inference)?;
    tracing::info!(url = summary_client.url(), "summaries from inference API");
    Ok(models::state::JotterState::new(store, summary_client))
}

/// All API routes plus their docs.
pub fn router(state: models::state::JotterState) -> Router {
    let openapi_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/notes", routes::notes::router(state.clone()))
        .nest("/api/summarize", routes::summarize::router(state));
    let (router, api) = openapi_router.split_for_parts();
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}

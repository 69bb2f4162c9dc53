use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod clock;
pub mod config;
pub mod entities;
pub mod error;
pub mod routes;
pub mod store;

use clock::{Clock, SystemClock};
use entities::{Funder, NewFunder};
use store::FunderStore;

/// Shared handler state. Cloning is cheap; every clone sees the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<FunderStore>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(FunderStore::new())),
            clock,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Service is healthy")
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Funder API",
        version = "0.1.0",
        description = "In-memory CRUD service for funder records"
    ),
    paths(
        health_check,
        routes::funders::add_funder,
        routes::funders::add_funders,
        routes::funders::fetch_funders,
        routes::funders::fetch_funder,
        routes::funders::update_funder,
        routes::funders::delete_funder
    ),
    components(schemas(
        Funder,
        NewFunder
    ))
)]
pub struct ApiDoc;

/// Create the application on a fresh, empty store
pub fn create_app() -> Router {
    create_app_with_state(AppState::default())
}

/// Create the application with all routes and middleware around `state`
pub fn create_app_with_state(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/add-funder", post(routes::add_funder))
        .route("/add-funders", post(routes::add_funders))
        .route("/fetch-funders", get(routes::fetch_funders))
        .route("/fetch-funder", get(routes::fetch_funder))
        .route("/update-funder", patch(routes::update_funder))
        .route("/delete-funder", delete(routes::delete_funder))
        .with_state(state);

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

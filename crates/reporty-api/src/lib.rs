//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::reports: Report menu, report pages, report listing API
//! - routes::login: Sign in and sign out
//!
//! Everything under `/admin/reports/` and `/api/reports` requires a session;
//! other requests are redirected to the login page.

pub mod auth;
pub mod error;
pub mod routes;
pub mod templates;

use axum::{
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use log::info;
use reporty_config::Config;
use reporty_core::{Database, ReportRegistry};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use auth::{AuthenticatedUser, SessionAuth};
pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ReportRegistry>,
    pub db: Database,
    pub auth: SessionAuth,
}

impl AppState {
    pub fn new(config: Config, registry: ReportRegistry, db: Database) -> Self {
        let auth = SessionAuth::new(&config.auth);
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            db,
            auth,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::login::{login_form, login_submit, logout};
    use routes::reports::{api_reports, report_menu, show_report, show_report_without_slash};

    let protected = Router::new()
        .route("/admin/reports/", get(report_menu))
        .route("/admin/reports/:report_type/", get(show_report))
        .route("/admin/reports/:report_type", get(show_report_without_slash))
        .route("/api/reports", get(api_reports))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_login));

    Router::new()
        .route("/", get(|| async { Redirect::to("/admin/reports/") }))
        .route("/api/health", get(health_check))
        .route(state.auth.login_url(), get(login_form).post(login_submit))
        .route("/admin/logout/", get(logout))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Builds the report registry, binds the configured address and serves
/// until Ctrl-C.
pub async fn start_server(config: Config, db: Database) -> std::io::Result<()> {
    let addr = config.bind_address();
    let registry = ReportRegistry::builtin();
    let report_keys: Vec<&str> = registry.entries().map(|entry| entry.kind.key()).collect();
    let state = AppState::new(config, registry, db);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Starting Reporty server on http://{}", addr);
    info!("Available routes:");
    info!("  - /admin/reports/ (Report menu)");
    for key in report_keys {
        info!("  - /admin/reports/{}/", key);
    }
    info!("  - /api/reports (Report listing)");
    info!("  - /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Tests ====================

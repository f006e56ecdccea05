use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::dashboard::Dashboard;
use crate::error::{DashboardError, Result};
use crate::insights::{CountInsights, DashboardSnapshot, ErrorBody, IssueInsights};

type AppState = Arc<Dashboard>;

pub fn build_router(dashboard: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/api/alerts", get(alerts_handler))
        .route("/api/misalignment", get(misalignment_handler))
        .route("/api/issues", get(issues_handler))
        .route("/api/snapshot", get(snapshot_handler))
        .with_state(dashboard)
}

pub async fn serve(dashboard: Dashboard, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("sheetpulse listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(Arc::new(dashboard)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("sheetpulse stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::NoData(_) => StatusCode::NOT_FOUND,
        DashboardError::MissingColumns(_) => StatusCode::BAD_REQUEST,
        DashboardError::Config(_)
        | DashboardError::Upstream { .. }
        | DashboardError::Network(_)
        | DashboardError::Json(_)
        | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected: {self}");
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn alerts_handler(State(dashboard): State<AppState>) -> Result<Json<CountInsights>> {
    Ok(Json(dashboard.alerts().await?))
}

async fn misalignment_handler(State(dashboard): State<AppState>) -> Result<Json<CountInsights>> {
    Ok(Json(dashboard.misalignment().await?))
}

async fn issues_handler(State(dashboard): State<AppState>) -> Result<Json<IssueInsights>> {
    Ok(Json(dashboard.issues().await?))
}

async fn snapshot_handler(State(dashboard): State<AppState>) -> Json<DashboardSnapshot> {
    Json(dashboard.snapshot().await)
}

//! Reports API endpoints - JSON API

use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub url: String,
}

/// List the registered report types
pub async fn api_reports(State(state): State<AppState>) -> Json<Vec<ReportSummary>> {
    let reports = state
        .registry
        .entries()
        .map(|entry| ReportSummary {
            key: entry.kind.key(),
            title: entry.kind.title(),
            description: entry.kind.description(),
            url: format!("/admin/reports/{}/", entry.kind.key()),
        })
        .collect();

    Json(reports)
}

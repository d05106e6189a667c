//! Reports page rendering - Full page endpoints

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::templates::{page_response, render_report_menu, render_report_table};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::Extension;
use log::info;
use reporty_core::{ErrorContext, Filters};
use reporty_utils::is_slug;

pub async fn report_menu(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Html<String> {
    let inner_content = render_report_menu(&state.registry);
    Html(page_response(&headers, "Reports", "/admin/reports/", &user.username, &inner_content))
}

/// Resolve the report type, run it with the configured filters and render the table.
///
/// The request never influences the filters.
pub async fn show_report(
    State(state): State<AppState>,
    Path(report_type): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    if !is_slug(&report_type) {
        return Err(ApiError::NotFound {
            resource: format!("report type '{}'", report_type),
        });
    }

    let path = format!("/admin/reports/{}/", report_type);
    let filters = Filters::from(state.config.reports.filters.clone());

    let output = state
        .registry
        .execute(&report_type, filters.clone(), &state.db)
        .await
        .map_err(|error| {
            let context = ErrorContext::new("show_report")
                .with_path(&path)
                .with_user(&user.username);
            ApiError::from_core(error, &context)
        })?;

    info!(
        "{} ran the {} report ({} rows)",
        user.username,
        output.kind,
        output.tabulation.row_count()
    );

    let inner_content = render_report_table(output.kind, &filters, &output.tabulation);
    Ok(Html(page_response(&headers, output.kind.title(), &path, &user.username, &inner_content)))
}

/// `/admin/reports/email` → `/admin/reports/email/`
pub async fn show_report_without_slash(Path(report_type): Path<String>) -> Result<Redirect, ApiError> {
    if !is_slug(&report_type) {
        return Err(ApiError::NotFound {
            resource: format!("report type '{}'", report_type),
        });
    }
    Ok(Redirect::permanent(&format!("/admin/reports/{}/", report_type)))
}

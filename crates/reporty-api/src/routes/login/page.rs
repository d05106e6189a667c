//! Login page rendering and form handling

use crate::templates::render_login_page;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use log::{info, warn};
use reporty_utils::is_local_path;
use serde::Deserialize;

const DEFAULT_NEXT: &str = "/admin/reports/";

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Where to go after signing in; anything but a local path falls back to the menu
fn next_target(next: Option<&str>) -> String {
    next.filter(|target| is_local_path(target))
        .unwrap_or(DEFAULT_NEXT)
        .to_string()
}

pub async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
) -> Response {
    let target = next_target(query.next.as_deref());

    if state.auth.authenticate(&headers).await.is_some() {
        return Redirect::to(&target).into_response();
    }

    Html(render_login_page(state.auth.login_url(), &target, None)).into_response()
}

pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let target = next_target(Some(&form.next));

    match state.auth.login(&form.username, &form.password).await {
        Some(token) => {
            info!("User {} signed in", form.username);
            (
                [(SET_COOKIE, state.auth.session_cookie(&token))],
                Redirect::to(&target),
            )
                .into_response()
        }
        None => {
            warn!("Failed sign-in attempt for user {}", form.username);
            (
                StatusCode::UNAUTHORIZED,
                Html(render_login_page(
                    state.auth.login_url(),
                    &target,
                    Some("Please enter a correct username and password."),
                )),
            )
                .into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(username) = state.auth.logout(&headers).await {
        info!("User {} signed out", username);
    }

    (
        [(SET_COOKIE, state.auth.expired_cookie())],
        Redirect::to(state.auth.login_url()),
    )
        .into_response()
}

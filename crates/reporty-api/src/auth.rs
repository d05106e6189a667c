//! Session based sign-in for the admin area
//!
//! Credentials come from the configuration. A successful login stores a
//! random token in memory and hands it to the browser as an HttpOnly cookie.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use reporty_config::{AuthConfig, UserCredential};
use reporty_utils::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::AppState;

/// The signed-in user, added to request extensions by [`require_login`]
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub username: String,
}

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionAuth {
    users: Arc<Vec<UserCredential>>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    cookie_name: String,
    login_url: String,
    ttl: Duration,
}

impl SessionAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            users: Arc::new(config.users.clone()),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            cookie_name: config.cookie_name.clone(),
            login_url: config.login_url.clone(),
            ttl: Duration::minutes(i64::from(config.session_ttl_minutes)),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Check credentials and open a session, returning its token
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let known = self
            .users
            .iter()
            .any(|user| user.username == username && constant_time_eq(&user.password, password));
        if !known {
            return None;
        }

        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at: now + self.ttl,
            },
        );
        Some(token)
    }

    /// Resolve the session cookie on a request to a live session
    pub async fn authenticate(&self, headers: &HeaderMap) -> Option<AuthenticatedUser> {
        let token = self.session_token(headers)?;
        let sessions = self.sessions.read().await;
        let session = sessions.get(&token)?;

        if session.expires_at <= Utc::now() {
            debug!("Session for {} has expired", session.username);
            return None;
        }

        Some(AuthenticatedUser {
            username: session.username.clone(),
        })
    }

    /// Drop the session the request belongs to, if any
    pub async fn logout(&self, headers: &HeaderMap) -> Option<String> {
        let token = self.session_token(headers)?;
        self.sessions
            .write()
            .await
            .remove(&token)
            .map(|session| session.username)
    }

    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            token,
            self.ttl.num_seconds()
        )
    }

    pub fn expired_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.cookie_name)
    }

    /// Redirect to the login page, remembering where the user was going
    pub fn login_redirect(&self, uri: &Uri) -> Redirect {
        let next = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Redirect::to(&format!("{}?next={}", self.login_url, urlencoding::encode(next)))
    }

    fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, token)| token.to_string())
            .filter(|token| !token.is_empty())
    }
}

/// Middleware gating every admin route behind a session
pub async fn require_login(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match state.auth.authenticate(request.headers()).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            debug!("Unauthenticated request to {}", request.uri().path());
            state.auth.login_redirect(request.uri()).into_response()
        }
    }
}

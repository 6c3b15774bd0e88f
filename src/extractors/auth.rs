//! Back office gate: authenticated user and role extractors.

use crate::auth::{load_profile, verify_token, Role};
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

/// Cookie carrying the access token for browser sessions.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated back office user with the role from their profile.
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
}

#[derive(Debug)]
pub enum AuthRejection {
    /// Browser without a session: send to the login page.
    Login { location: String },
    Unauthorized(&'static str),
    Forbidden(&'static str),
    Backend(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Login { location } => {
                (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
            }
            AuthRejection::Unauthorized(msg) => AppError::Unauthorized(msg.into()).into_response(),
            AuthRejection::Forbidden(msg) => AppError::Forbidden(msg.into()).into_response(),
            AuthRejection::Backend(e) => e.into_response(),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn cookie_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, value)| value)
        .filter(|t| !t.is_empty())
}

fn accepts_html(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false)
}

/// Login page URL that brings the user back to `target` afterwards.
pub fn login_location(login_path: &str, target: &str) -> String {
    format!("{}?redirect={}", login_path, urlencoding::encode(target))
}

fn unauthenticated(parts: &Parts, state: &AppState, msg: &'static str) -> AuthRejection {
    if !accepts_html(parts) {
        return AuthRejection::Unauthorized(msg);
    }
    // Nested routers see a stripped path; redirect to the one the browser asked for.
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|o| &o.0)
        .unwrap_or(&parts.uri);
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    AuthRejection::Login {
        location: login_location(&state.config.login_path, target),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let parts: &Parts = parts;
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| unauthenticated(parts, state, "missing access token"))?;

        let claims = verify_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "rejected access token");
            unauthenticated(parts, state, "invalid or expired token")
        })?;

        let profile = load_profile(&state.pool, state.schema(), claims.sub)
            .await
            .map_err(AuthRejection::Backend)?
            .ok_or(AuthRejection::Forbidden("no profile for this account"))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            full_name: profile.full_name,
            role: profile.role.as_deref().map(Role::parse).unwrap_or(Role::Viewer),
        })
    }
}

/// Requires `editor` or `admin`. Rejects with 403 Forbidden otherwise.
pub struct RequireEditor(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_edit() {
            tracing::warn!(user = %user.id, role = ?user.role, "back office access refused");
            return Err(AuthRejection::Forbidden("editor or admin role required"));
        }
        Ok(RequireEditor(user))
    }
}

/// Requires `admin`. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            tracing::warn!(user = %user.id, role = ?user.role, "admin action refused");
            return Err(AuthRejection::Forbidden("admin role required"));
        }
        Ok(RequireAdmin(user))
    }
}

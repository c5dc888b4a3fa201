use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use super::Identity;
use crate::common::AppState;
use crate::error::AppError;

/// Any caller holding a recognized bearer token. Rejects with 401 when the
/// `Authorization` header is missing, malformed, or unknown.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// A recognized caller whose role is admin. Rejects with 401 like
/// [`AuthenticatedUser`], or 403 when the caller is authenticated but not
/// an admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn resolve_identity(parts: &Parts, state: &AppState) -> Result<Identity, AppError> {
    let token = bearer_token(parts).ok_or_else(|| {
        AppError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    state
        .tokens
        .resolve(token)
        .ok_or_else(|| AppError::Unauthorized("Invalid bearer token".to_string()))
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_identity(parts, state).map(Self)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = resolve_identity(parts, state)?;
        if identity.role != super::Role::Admin {
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }
        Ok(Self(identity))
    }
}

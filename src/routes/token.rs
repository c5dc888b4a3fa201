use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth;
use crate::common::AppState;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchange credentials for a bearer token
///
/// Plaintext lookup against the seeded user list; this is not a credential
/// service. Issued tokens live until the process restarts.
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Incorrect username or password"),
    ),
    tag = "auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let identity =
        auth::verify_credentials(&state.config.auth_users, &form.username, &form.password)
            .ok_or_else(|| AppError::Unauthorized("Incorrect username or password".to_string()))?;

    tracing::info!(user = %identity.username, role = ?identity.role, "token issued");

    let access_token = state.tokens.issue(identity);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

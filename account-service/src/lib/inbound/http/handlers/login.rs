use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::extract::RequestBody;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    RequestBody(body): RequestBody<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = state
        .validator
        .login(body.email, body.password)
        .map_err(ApiError::BadRequest)?;

    let token = state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            success: true,
            token,
        },
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub success: bool,
    /// `Bearer <jwt>`
    pub token: String,
}

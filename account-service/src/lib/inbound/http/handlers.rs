use std::collections::BTreeMap;

use auth::JwtError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::user::errors::UserError;

pub mod current;
pub mod login;
pub mod register;
pub mod status;

/// Field-keyed user-facing messages, e.g. `{"email": "Email already exists"}`.
pub type FieldErrors = BTreeMap<String, String>;

pub fn field_error(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    errors
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(FieldErrors),
    NotFound(FieldErrors),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                // Detail stays in the logs.
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::BadRequest(fields) => (StatusCode::BAD_REQUEST, Json(fields)).into_response(),
            ApiError::NotFound(fields) => (StatusCode::NOT_FOUND, Json(fields)).into_response(),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(_) => {
                ApiError::BadRequest(field_error("email", "Email already exists"))
            }
            UserError::UserNotFound(_) => {
                ApiError::NotFound(field_error("email", "User not found"))
            }
            UserError::BadCredentials => {
                ApiError::BadRequest(field_error("password", "Password Incorrect"))
            }
            UserError::Token(JwtError::TokenExpired) | UserError::Token(JwtError::InvalidToken(_)) => {
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            UserError::Token(_) | UserError::Hashing(_) | UserError::Database(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

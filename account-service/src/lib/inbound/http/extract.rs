use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::inbound::http::handlers::field_error;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::FieldErrors;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body read from JSON or from an urlencoded form.
///
/// Rejections are turned into field-keyed `400` responses instead of axum's
/// plain-text ones. An empty body deserializes like `{}`, leaving every field
/// to the validator.
pub struct RequestBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RequestBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(body) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::warn!(error = %e.body_text(), "Rejected form body");
                invalid_body()
            })?;
            return Ok(Self(body));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e.body_text(), "Failed to read request body");
            invalid_body()
        })?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice::<T>(body).map(Self).map_err(|e| {
            tracing::warn!(error = %e, "Rejected JSON body");
            mistyped_fields(body)
                .map(ApiError::BadRequest)
                .unwrap_or_else(invalid_body)
        })
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

fn invalid_body() -> ApiError {
    ApiError::BadRequest(field_error("body", "Request body is invalid"))
}

/// Fields of a JSON object whose values are neither strings nor null.
fn mistyped_fields(body: &[u8]) -> Option<FieldErrors> {
    let object: Map<String, Value> = serde_json::from_slice(body).ok()?;

    let errors: FieldErrors = object
        .iter()
        .filter(|(_, value)| !(value.is_string() || value.is_null()))
        .map(|(field, _)| (field.clone(), format!("{} must be a string", label(field))))
        .collect();

    (!errors.is_empty()).then_some(errors)
}

fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Credentials {
        email: Option<String>,
        password: Option<String>,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Credentials, ApiError> {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();

        RequestBody::<Credentials>::from_request(req, &())
            .await
            .map(|RequestBody(body)| body)
    }

    #[tokio::test]
    async fn test_json_body() {
        let body = extract(
            Some("application/json"),
            r#"{"email":"a@x.com","password":"secret1"}"#,
        )
        .await
        .unwrap();

        assert_eq!(body.email.as_deref(), Some("a@x.com"));
        assert_eq!(body.password.as_deref(), Some("secret1"));
    }

    #[tokio::test]
    async fn test_form_body() {
        let body = extract(Some(FORM_CONTENT_TYPE), "email=a%40x.com&password=secret1")
            .await
            .unwrap();

        assert_eq!(body.email.as_deref(), Some("a@x.com"));
        assert_eq!(body.password.as_deref(), Some("secret1"));
    }

    #[tokio::test]
    async fn test_empty_body_has_no_fields() {
        let body = extract(None, "").await.unwrap();

        assert_eq!(
            body,
            Credentials {
                email: None,
                password: None,
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_typed_field_is_reported_by_name() {
        let error = extract(
            Some("application/json"),
            r#"{"email":123,"password":"secret1"}"#,
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            ApiError::BadRequest(field_error("email", "Email must be a string"))
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let error = extract(Some("application/json"), "{not json")
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ApiError::BadRequest(field_error("body", "Request body is invalid"))
        );
    }
}

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current::current;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::status::index;
use super::handlers::status::users_test;
use super::middleware::authenticate as auth_middleware;
use super::validation::RequestValidator;
use crate::config::ValidationConfig;
use crate::domain::user::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub validator: Arc<RequestValidator>,
}

impl AppState {
    pub fn new(
        account_service: Arc<dyn AccountServicePort>,
        authenticator: Arc<Authenticator>,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            account_service,
            authenticator,
            validator: Arc::new(RequestValidator::new(validation)),
        }
    }
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
    validation: ValidationConfig,
) -> Router {
    let state = AppState::new(account_service, authenticator, validation);

    let public_routes = Router::new()
        .route("/", get(index))
        .route("/api/users/test", get(users_test))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login));

    let protected_routes = Router::new()
        .route("/api/users/current", get(current))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use std::sync::Arc;

use account_service::config::ValidationConfig;
use account_service::domain::user::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::AuthSettings;
use auth::Authenticator;
use auth::HashingParams;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(Duration::seconds(3600)).await
    }

    /// Spawn with a custom session-token lifetime
    pub async fn spawn_with_ttl(token_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap work factor keeps the suite fast; verification reads the
        // parameters from each hash anyway.
        let authenticator = Arc::new(
            Authenticator::new(
                AuthSettings::new(TEST_SECRET)
                    .with_token_ttl(token_ttl)
                    .with_hashing(HashingParams {
                        cost: 1,
                        memory_kib: 1024,
                        parallelism: 1,
                    }),
            )
            .expect("Failed to build authenticator"),
        );

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, authenticator, ValidationConfig::default());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with a ready-made Authorization value
    pub fn get_authorized(&self, path: &str, authorization: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header(reqwest::header::AUTHORIZATION, authorization)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the `Bearer <jwt>` token
    pub async fn registered_token(&self, name: &str, email: &str, password: &str) -> String {
        self.register(name, email, password).await;

        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["token"]
            .as_str()
            .expect("Login response without token")
            .to_string()
    }
}

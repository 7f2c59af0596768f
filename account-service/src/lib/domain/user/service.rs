use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordError;
use chrono::Utc;

use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for account operations.
///
/// Password hashing and verification run on the blocking thread pool so that
/// slow-hash work never holds up other requests on the async workers.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let RegisterCommand {
            name,
            email,
            password,
        } = command;

        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let avatar = AvatarUrl::for_email(&email);
        let password_hash = self.hash_password(password).await?;

        let user = User {
            id: UserId::new(),
            name,
            email,
            avatar,
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent registration may win the race; the store reports it
        // as DuplicateKey which converts to DuplicateEmail.
        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let LoginCommand { email, password } = command;

        let user = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(|| UserError::UserNotFound(email.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let identity = user.identity();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &identity)
        })
        .await
        .map_err(|e| PasswordError::HashingFailed(format!("Verification task failed: {}", e)))?
        .map_err(|e| {
            if let auth::AuthenticationError::PasswordError(ref err) = e {
                tracing::error!(user_id = %user.id, error = %err, "Stored password hash unusable");
            }
            UserError::from(e)
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(result.access_token())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound(id.to_string()))
    }
}

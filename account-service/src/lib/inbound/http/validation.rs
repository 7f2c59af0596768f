use crate::config::ValidationConfig;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::inbound::http::handlers::FieldErrors;

/// Checks presence and shape of request fields before they reach the domain.
///
/// Every failing field gets one message; all fields are checked so the client
/// sees every problem at once.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    rules: ValidationConfig,
}

impl RequestValidator {
    pub fn new(rules: ValidationConfig) -> Self {
        Self { rules }
    }

    pub fn register(
        &self,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<RegisterCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = non_empty(name);
        match &name {
            None => {
                errors.insert("name".to_string(), "Name field is required".to_string());
            }
            Some(value)
                if !within(value, self.rules.name_min_length, self.rules.name_max_length) =>
            {
                errors.insert(
                    "name".to_string(),
                    format!(
                        "Name must be between {} and {} characters",
                        self.rules.name_min_length, self.rules.name_max_length
                    ),
                );
            }
            Some(_) => {}
        }

        let email = self.email(email, &mut errors);

        let password = non_empty(password);
        match &password {
            None => {
                errors.insert(
                    "password".to_string(),
                    "Password field is required".to_string(),
                );
            }
            Some(value)
                if !within(
                    value,
                    self.rules.password_min_length,
                    self.rules.password_max_length,
                ) =>
            {
                errors.insert(
                    "password".to_string(),
                    format!(
                        "Password must be between {} and {} characters",
                        self.rules.password_min_length, self.rules.password_max_length
                    ),
                );
            }
            Some(_) => {}
        }

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => {
                Ok(RegisterCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }

    pub fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<LoginCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = self.email(email, &mut errors);

        let password = non_empty(password);
        if password.is_none() {
            errors.insert(
                "password".to_string(),
                "Password field is required".to_string(),
            );
        }

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(LoginCommand::new(email, password))
            }
            _ => Err(errors),
        }
    }

    fn email(&self, email: Option<String>, errors: &mut FieldErrors) -> Option<EmailAddress> {
        let Some(email) = non_empty(email) else {
            errors.insert("email".to_string(), "Email field is required".to_string());
            return None;
        };

        match EmailAddress::new(email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.insert("email".to_string(), "Email is invalid".to_string());
                None
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    length >= min && length <= max
}

//! Sign-in and registration.

use chrono::NaiveDate;

use crate::api::Backend;
use crate::error::{ClientError, FieldError};
use crate::models::{LoginRequest, RegistrationRequest, RegistrationResponse};
use crate::session::SessionCredential;
use crate::storage::ClientStorage;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ClientError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ClientError::field("user_email", "Email is required."));
        }
        if self.password.is_empty() {
            return Err(ClientError::field("password", "Password is required."));
        }
        Ok(LoginRequest {
            user_email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub birth_date: Option<NaiveDate>,
    pub about: String,
    pub social_link: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegistrationRequest, ClientError> {
        if self.password != self.confirm_password {
            return Err(ClientError::field("password", "Passwords do not match."));
        }
        Ok(RegistrationRequest {
            user_name: self.user_name.trim().to_string(),
            user_email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            birth_date: self.birth_date,
            about_author: optional(&self.about),
            social_link: optional(&self.social_link),
        })
    }
}

/// Sign in, store the credential, then look up the role.
///
/// A failed role lookup does not fail the sign-in; the user is treated as a
/// regular user until the next sign-in.
pub async fn login<B: Backend>(
    backend: &B,
    storage: &ClientStorage,
    form: &LoginForm,
) -> Result<SessionCredential, ClientError> {
    let request = form.validate()?;
    let response = backend.login(&request).await.map_err(login_error)?;
    let local = storage.local.as_ref();
    SessionCredential::store_login(local, &response.access_token, response.user_id);
    match backend.current_user(&response.access_token).await {
        Ok(profile) => SessionCredential::store_role(local, &profile.user_role),
        Err(e) => tracing::warn!("Could not load role after login: {}", e),
    }
    tracing::info!("Signed in as user {}", response.user_id);
    SessionCredential::load(local).ok_or(ClientError::Unauthenticated)
}

fn login_error(error: ClientError) -> ClientError {
    match &error {
        ClientError::InvalidSession => invalid_credentials(),
        ClientError::Rejected { detail, .. } if detail == "Invalid credentials" => {
            invalid_credentials()
        }
        _ => error,
    }
}

fn invalid_credentials() -> ClientError {
    ClientError::field("password", "Invalid email or password.")
}

pub async fn register<B: Backend>(
    backend: &B,
    form: &RegisterForm,
) -> Result<RegistrationResponse, ClientError> {
    let request = form.validate()?;
    backend.register(&request).await.map_err(register_error)
}

/// Duplicate-account rejections belong to their input field.
fn register_error(error: ClientError) -> ClientError {
    let field = match error.detail() {
        Some("Username already exists") => "user_name",
        Some("Email already exists") => "user_email",
        _ => return error,
    };
    let message = error.detail().unwrap_or_default().to_string();
    ClientError::Validation(vec![FieldError::new(field, message)])
}

/// Message for `field` from a failed submit, if it was about that field.
pub fn field_message(error: &ClientError, field: &str) -> Option<String> {
    error
        .field_errors()
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

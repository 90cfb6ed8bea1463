//! Profile page: sectioned edits, password change and the interaction graph.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;

use crate::api::Backend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{PasswordChange, ProfileUpdate, UserProfile};
use crate::navigation::Navigator;
use crate::pages::PageState;
use crate::storage::ClientStorage;

/// One independently edited part of the profile. Saving a section sends only
/// its own fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileSection {
    PersonalInfo {
        user_name: String,
        email: String,
        birth_date: Option<NaiveDate>,
    },
    About {
        bio: String,
    },
    Social {
        social_link: String,
    },
}

impl ProfileSection {
    pub fn to_update(&self) -> ProfileUpdate {
        match self {
            ProfileSection::PersonalInfo {
                user_name,
                email,
                birth_date,
            } => ProfileUpdate {
                user_name: Some(user_name.trim().to_string()),
                email: Some(email.trim().to_string()),
                birth_date: Some(*birth_date),
                ..Default::default()
            },
            ProfileSection::About { bio } => ProfileUpdate {
                bio: Some(bio.clone()),
                ..Default::default()
            },
            ProfileSection::Social { social_link } => ProfileUpdate {
                social_link: Some(social_link.trim().to_string()),
                ..Default::default()
            },
        }
    }
}

/// Link text without the scheme, or a placeholder.
pub fn social_display(link: Option<&str>) -> String {
    match link.filter(|l| !l.is_empty()) {
        Some(link) => link
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string(),
        None => "No link provided".to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<PasswordChange, ClientError> {
        if self.old_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ClientError::field(
                "password",
                "Please fill in all password fields.",
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(ClientError::field(
                "confirm_new_password",
                "New password and confirm password do not match.",
            ));
        }
        Ok(PasswordChange {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            confirm_new_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePage {
    pub profile: PageState<UserProfile>,
    /// `data:` URL of the interaction graph.
    pub graph: PageState<String>,
}

pub async fn load_profile<B: Backend>(backend: &B, token: &str) -> Result<UserProfile, ClientError> {
    backend.current_user(token).await
}

pub async fn save_section<B: Backend>(
    backend: &B,
    token: &str,
    section: &ProfileSection,
) -> Result<UserProfile, ClientError> {
    backend.update_profile(token, &section.to_update()).await
}

/// Change the password. The session ends on success: storage is cleared and
/// the user signs in again with the new password.
pub async fn change_password<B, N>(
    backend: &B,
    storage: &ClientStorage,
    navigator: &N,
    config: &ClientConfig,
    token: &str,
    form: &PasswordForm,
) -> Result<(), ClientError>
where
    B: Backend,
    N: Navigator + ?Sized,
{
    let change = form.validate()?;
    backend.change_password(token, &change).await?;
    tracing::info!("Password changed, signing out");
    storage.clear_all();
    navigator.replace(&config.routes.authentication);
    Ok(())
}

pub fn graph_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

pub async fn load_graph<B: Backend>(backend: &B, token: &str) -> Result<String, ClientError> {
    let png = backend.interaction_graph(token).await?;
    Ok(graph_data_url(&png))
}

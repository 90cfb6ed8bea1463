//! Sign-in and registration, and the page shown after a session ends.

use client::pages::auth::{field_message, login, register, LoginForm, RegisterForm};
use client::pages::paths;
use client::ClientError;
use dioxus::prelude::*;

use crate::services::use_services;
use crate::theme::ThemeToggle;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Login,
    Register,
}

#[component]
pub fn AuthView() -> Element {
    let mut tab = use_signal(|| Tab::Login);
    let mut notice = use_signal(|| None::<String>);

    rsx! {
        div {
            class: "auth-page",
            div { class: "auth-theme", ThemeToggle {} }
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Articles" }
                div {
                    class: "auth-tabs",
                    button {
                        class: if tab() == Tab::Login { "auth-tab active" } else { "auth-tab" },
                        onclick: move |_| tab.set(Tab::Login),
                        "Login"
                    }
                    button {
                        class: if tab() == Tab::Register { "auth-tab active" } else { "auth-tab" },
                        onclick: move |_| {
                            notice.set(None);
                            tab.set(Tab::Register);
                        },
                        "Register"
                    }
                }
                if let Some(message) = notice() {
                    div { class: "success-message", "{message}" }
                }
                if tab() == Tab::Login {
                    LoginPanel {}
                } else {
                    RegisterPanel {
                        on_registered: move |_| {
                            notice.set(Some("Registration successful! Please log in.".to_string()));
                            tab.set(Tab::Login);
                        },
                    }
                }
            }
        }
    }
}

const FIELDS: [&str; 3] = ["user_name", "user_email", "password"];

/// What a failed submit left to show: per-input messages, or one general
/// message when none of the inputs is named.
#[derive(Clone, Debug, Default, PartialEq)]
struct Failure {
    fields: Vec<(&'static str, String)>,
    general: Option<String>,
}

impl From<&ClientError> for Failure {
    fn from(error: &ClientError) -> Self {
        let fields: Vec<_> = FIELDS
            .iter()
            .filter_map(|&field| field_message(error, field).map(|m| (field, m)))
            .collect();
        let general = fields.is_empty().then(|| error.user_message());
        Self { fields, general }
    }
}

impl Failure {
    fn field(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, message)| message.clone())
    }
}

/// Inline message under one input.
#[component]
fn FieldError(failure: Option<Failure>, field: &'static str) -> Element {
    let message = failure.and_then(|f| f.field(field));
    rsx! {
        if let Some(message) = message {
            div { class: "field-error", "{message}" }
        }
    }
}

#[component]
fn LoginPanel() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| None::<Failure>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        let services = services.clone();
        let current = form();
        spawn(async move {
            let result = login(&services.backend, &services.storage, &current).await;
            busy.set(false);
            match result {
                Ok(_) => {
                    error.set(None);
                    nav.replace(paths::HOME);
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(Failure::from(&e)));
                }
            }
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: on_submit,
            label { "Email" }
            input {
                r#type: "email",
                value: "{form.read().email}",
                oninput: move |evt| form.write().email = evt.value(),
            }
            FieldError { failure: error(), field: "user_email" }
            label { "Password" }
            input {
                r#type: "password",
                value: "{form.read().password}",
                oninput: move |evt| form.write().password = evt.value(),
            }
            FieldError { failure: error(), field: "password" }
            if let Some(message) = error().and_then(|f| f.general) {
                div { class: "error-message", "{message}" }
            }
            button {
                class: "primary-btn",
                r#type: "submit",
                disabled: busy(),
                if busy() { "Signing in..." } else { "Login" }
            }
        }
    }
}

#[component]
fn RegisterPanel(on_registered: EventHandler<()>) -> Element {
    let services = use_services();
    let mut form = use_signal(RegisterForm::default);
    let mut birth_date = use_signal(String::new);
    let mut error = use_signal(|| None::<Failure>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        let services = services.clone();
        let mut current = form();
        current.birth_date = birth_date.read().parse().ok();
        spawn(async move {
            let result = register(&services.backend, &current).await;
            busy.set(false);
            match result {
                Ok(response) => {
                    tracing::info!("Registered user {}", response.user_id);
                    error.set(None);
                    on_registered.call(());
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    error.set(Some(Failure::from(&e)));
                }
            }
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: on_submit,
            label { "Username" }
            input {
                value: "{form.read().user_name}",
                oninput: move |evt| form.write().user_name = evt.value(),
            }
            FieldError { failure: error(), field: "user_name" }
            label { "Email" }
            input {
                r#type: "email",
                value: "{form.read().email}",
                oninput: move |evt| form.write().email = evt.value(),
            }
            FieldError { failure: error(), field: "user_email" }
            label { "Password" }
            input {
                r#type: "password",
                value: "{form.read().password}",
                oninput: move |evt| form.write().password = evt.value(),
            }
            label { "Confirm password" }
            input {
                r#type: "password",
                value: "{form.read().confirm_password}",
                oninput: move |evt| form.write().confirm_password = evt.value(),
            }
            FieldError { failure: error(), field: "password" }
            label { "Birth date" }
            input {
                r#type: "date",
                value: "{birth_date}",
                oninput: move |evt| birth_date.set(evt.value()),
            }
            label { "About you" }
            textarea {
                rows: 3,
                value: "{form.read().about}",
                oninput: move |evt| form.write().about = evt.value(),
            }
            label { "Social link" }
            input {
                r#type: "url",
                value: "{form.read().social_link}",
                oninput: move |evt| form.write().social_link = evt.value(),
            }
            if let Some(message) = error().and_then(|f| f.general) {
                div { class: "error-message", "{message}" }
            }
            button {
                class: "primary-btn",
                r#type: "submit",
                disabled: busy(),
                if busy() { "Creating account..." } else { "Register" }
            }
        }
    }
}

/// Shown after the backend rejected the stored session.
#[component]
pub fn SessionTimeoutView() -> Element {
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Session expired" }
                p { "Your session has ended. Please log in again to continue." }
                Link { class: "primary-btn", to: paths::AUTH, "Go to login" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_failures_stay_on_their_input() {
        let failure = Failure::from(&ClientError::field("password", "Invalid email or password."));
        assert_eq!(failure.field("password").as_deref(), Some("Invalid email or password."));
        assert_eq!(failure.field("user_email"), None);
        assert_eq!(failure.general, None);
    }

    #[test]
    fn other_failures_are_general() {
        let failure = Failure::from(&ClientError::MissingParameter("id"));
        assert!(failure.fields.is_empty());
        assert_eq!(failure.general.as_deref(), Some("No id provided."));
    }
}

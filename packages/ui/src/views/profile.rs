use client::models::UserProfile;
use client::pages::profile::{
    change_password, load_graph, load_profile, save_section, social_display, PasswordForm,
    ProfilePage, ProfileSection,
};
use client::pages::PageState;
use dioxus::prelude::*;

use crate::icons::FaPen;
use crate::navbar::Navbar;
use crate::protected::use_credential;
use crate::services::{use_services, Services};
use crate::Icon;

fn fetch_profile(services: Services, token: String, mut page: Signal<ProfilePage>) {
    let ticket = page.write().profile.begin();
    spawn(async move {
        let result = load_profile(&services.backend, &token).await;
        if let Err(e) = &result {
            tracing::error!("Loading profile failed: {}", e);
        }
        let completion = page.write().profile.complete(ticket, result);
        services.handle_completion(&completion);
    });
}

fn fetch_graph(services: Services, token: String, mut page: Signal<ProfilePage>) {
    let ticket = page.write().graph.begin();
    spawn(async move {
        let result = load_graph(&services.backend, &token).await;
        if let Err(e) = &result {
            tracing::warn!("Interaction graph unavailable: {}", e);
        }
        let completion = page.write().graph.complete(ticket, result);
        services.handle_completion(&completion);
    });
}

#[component]
pub fn ProfileView() -> Element {
    let services = use_services();
    let token = use_credential().token;
    let page = use_signal(ProfilePage::default);

    use_hook(move || {
        fetch_profile(services.clone(), token.clone(), page);
        fetch_graph(services, token, page);
    });

    let current = page.read();
    let user = current.profile.content.clone();
    let error = current.profile.error.clone();
    let graph = current.graph.clone();
    drop(current);

    rsx! {
        Navbar {}
        div {
            class: "profile-page",
            h1 { class: "page-title", "Profile" }
            if let Some(error) = error {
                div { class: "error-message", "{error}" }
            }
            if let Some(user) = user {
                PersonalInfoSection { user: user.clone(), page }
                AboutSection { user: user.clone(), page }
                SocialSection { user, page }
            } else {
                div { class: "loading", "Loading..." }
            }
            PasswordSection {}
            GraphSection { graph }
        }
    }
}

/// Save one section and take the backend's copy of the profile.
/// Returns the message to show on failure.
async fn save(
    services: &Services,
    token: &str,
    mut page: Signal<ProfilePage>,
    section: ProfileSection,
) -> Option<String> {
    match save_section(&services.backend, token, &section).await {
        Ok(updated) => {
            tracing::info!("Profile updated");
            page.write().profile.content = Some(updated);
            None
        }
        Err(e) => {
            if services.handle_error(&e) {
                return None;
            }
            Some(e.user_message())
        }
    }
}

/// Heading with an edit toggle around a section body.
#[component]
fn SectionCard(
    title: String,
    editing: Signal<bool>,
    error: Signal<Option<String>>,
    children: Element,
) -> Element {
    let mut editing = editing;
    rsx! {
        section {
            class: "profile-section",
            div {
                class: "section-header",
                h2 { "{title}" }
                if !editing() {
                    button {
                        class: "icon-btn",
                        title: "Edit",
                        onclick: move |_| editing.set(true),
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                }
            }
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            {children}
        }
    }
}

#[component]
fn PersonalInfoSection(user: UserProfile, page: Signal<ProfilePage>) -> Element {
    let services = use_services();
    let token = use_credential().token;
    let mut editing = use_signal(|| false);
    let error = use_signal(|| None::<String>);
    let mut user_name = use_signal(|| user.user_name.clone());
    let mut email = use_signal(|| user.user_email.clone());
    let mut birth_date = use_signal(|| user.birth_date.map(|d| d.to_string()).unwrap_or_default());

    let birth_label = user
        .birth_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Not provided".to_string());

    let on_save = move |_| {
        let section = ProfileSection::PersonalInfo {
            user_name: user_name(),
            email: email(),
            birth_date: birth_date.read().parse().ok(),
        };
        let services = services.clone();
        let token = token.clone();
        let mut error = error;
        spawn(async move {
            let failure = save(&services, &token, page, section).await;
            if failure.is_none() {
                editing.set(false);
            }
            error.set(failure);
        });
    };

    rsx! {
        SectionCard {
            title: "Personal Information",
            editing,
            error,
            if editing() {
                label { "Username" }
                input { value: "{user_name}", oninput: move |evt| user_name.set(evt.value()) }
                label { "Email" }
                input { r#type: "email", value: "{email}", oninput: move |evt| email.set(evt.value()) }
                label { "Birth date" }
                input { r#type: "date", value: "{birth_date}", oninput: move |evt| birth_date.set(evt.value()) }
                div {
                    class: "section-actions",
                    button { class: "secondary-btn", onclick: move |_| editing.set(false), "Cancel" }
                    button { class: "primary-btn", onclick: on_save, "Save" }
                }
            } else {
                dl {
                    dt { "Username" } dd { "{user.user_name}" }
                    dt { "Email" } dd { "{user.user_email}" }
                    dt { "Birth date" } dd { "{birth_label}" }
                }
            }
        }
    }
}

#[component]
fn AboutSection(user: UserProfile, page: Signal<ProfilePage>) -> Element {
    let services = use_services();
    let token = use_credential().token;
    let mut editing = use_signal(|| false);
    let error = use_signal(|| None::<String>);
    let mut bio = use_signal(|| user.bio.clone().unwrap_or_default());

    let shown = user
        .bio
        .clone()
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "No bio yet.".to_string());

    let on_save = move |_| {
        let section = ProfileSection::About { bio: bio() };
        let services = services.clone();
        let token = token.clone();
        let mut error = error;
        spawn(async move {
            let failure = save(&services, &token, page, section).await;
            if failure.is_none() {
                editing.set(false);
            }
            error.set(failure);
        });
    };

    rsx! {
        SectionCard {
            title: "About",
            editing,
            error,
            if editing() {
                textarea { rows: 5, value: "{bio}", oninput: move |evt| bio.set(evt.value()) }
                div {
                    class: "section-actions",
                    button { class: "secondary-btn", onclick: move |_| editing.set(false), "Cancel" }
                    button { class: "primary-btn", onclick: on_save, "Save" }
                }
            } else {
                p { class: "profile-bio", "{shown}" }
            }
        }
    }
}

#[component]
fn SocialSection(user: UserProfile, page: Signal<ProfilePage>) -> Element {
    let services = use_services();
    let token = use_credential().token;
    let mut editing = use_signal(|| false);
    let error = use_signal(|| None::<String>);
    let mut link = use_signal(|| user.social_link.clone().unwrap_or_default());

    let href = user.social_link.clone().filter(|l| !l.is_empty());
    let shown = social_display(user.social_link.as_deref());

    let on_save = move |_| {
        let section = ProfileSection::Social { social_link: link() };
        let services = services.clone();
        let token = token.clone();
        let mut error = error;
        spawn(async move {
            let failure = save(&services, &token, page, section).await;
            if failure.is_none() {
                editing.set(false);
            }
            error.set(failure);
        });
    };

    rsx! {
        SectionCard {
            title: "Social",
            editing,
            error,
            if editing() {
                input { r#type: "url", value: "{link}", oninput: move |evt| link.set(evt.value()) }
                div {
                    class: "section-actions",
                    button { class: "secondary-btn", onclick: move |_| editing.set(false), "Cancel" }
                    button { class: "primary-btn", onclick: on_save, "Save" }
                }
            } else if let Some(href) = href {
                a { href: "{href}", target: "_blank", rel: "noopener", "{shown}" }
            } else {
                p { "{shown}" }
            }
        }
    }
}

#[component]
fn PasswordSection() -> Element {
    let services = use_services();
    let token = use_credential().token;
    let mut form = use_signal(PasswordForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        let services = services.clone();
        let token = token.clone();
        let current = form();
        spawn(async move {
            let result = change_password(
                &services.backend,
                &services.storage,
                services.navigator.as_ref(),
                &services.config,
                &token,
                &current,
            )
            .await;
            busy.set(false);
            if let Err(e) = result {
                if !services.handle_error(&e) {
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        section {
            class: "profile-section",
            h2 { "Change Password" }
            form {
                onsubmit: on_submit,
                label { "Current password" }
                input {
                    r#type: "password",
                    value: "{form.read().old_password}",
                    oninput: move |evt| form.write().old_password = evt.value(),
                }
                label { "New password" }
                input {
                    r#type: "password",
                    value: "{form.read().new_password}",
                    oninput: move |evt| form.write().new_password = evt.value(),
                }
                label { "Confirm new password" }
                input {
                    r#type: "password",
                    value: "{form.read().confirm_password}",
                    oninput: move |evt| form.write().confirm_password = evt.value(),
                }
                if let Some(message) = error() {
                    div { class: "error-message", "{message}" }
                }
                button {
                    class: "primary-btn",
                    r#type: "submit",
                    disabled: busy(),
                    "Change password"
                }
            }
        }
    }
}

#[component]
fn GraphSection(graph: PageState<String>) -> Element {
    rsx! {
        section {
            class: "profile-section",
            h2 { "Interactions on your articles" }
            if let Some(url) = graph.content {
                img { class: "interaction-graph", src: "{url}", alt: "Interaction graph" }
            } else if let Some(error) = graph.error {
                p { class: "muted", "{error}" }
            } else {
                div { class: "loading", "Loading..." }
            }
        }
    }
}

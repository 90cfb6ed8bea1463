use std::time::Duration;

use client::interaction::load_flags;
use client::models::InteractionKind;
use client::pages::article::{load_article, log_view, moderate, required_id, ArticleView};
use client::pages::paths;
use client::text::format_date;
use client::Backend;
use dioxus::prelude::*;

use crate::dom;
use crate::icons::FaShieldHalved;
use crate::interaction_buttons::InteractionButtons;
use crate::modal::ModalOverlay;
use crate::navbar::Navbar;
use crate::protected::use_credential;
use crate::services::use_services;
use crate::views::MissingParameter;
use crate::Icon;

#[component]
pub fn ArticleViewPage(article_id: String) -> Element {
    match required_id(Some(&article_id), "article_id") {
        Ok(id) => rsx! {
            ArticleReader { key: "{id}", article_id: id }
        },
        Err(e) => rsx! {
            MissingParameter { message: e.user_message() }
        },
    }
}

#[component]
fn ArticleReader(article_id: i64) -> Element {
    let services = use_services();
    let credential = use_credential();
    let nav = use_navigator();
    let mut view = use_signal(|| ArticleView::new(article_id, &credential, services.session()));
    let mut moderating = use_signal(|| false);

    {
        let services = services.clone();
        let credential = credential.clone();
        use_hook(move || {
            let ticket = view.write().article.begin();
            {
                let services = services.clone();
                spawn(async move {
                    let result = load_article(&services.backend, article_id).await;
                    if let Err(e) = &result {
                        tracing::error!("Loading article {} failed: {}", article_id, e);
                    }
                    let completion = view.write().article.complete(ticket, result);
                    services.handle_completion(&completion);
                });
            }
            if let Some(user_id) = credential.user_id.clone() {
                let services = services.clone();
                spawn(async move {
                    match load_flags(&services.backend, &user_id, article_id).await {
                        Ok(flags) => {
                            view.write().interactions.load(flags);
                        }
                        Err(e) => tracing::warn!("Interaction status unavailable: {}", e),
                    }
                });
            }
            spawn(async move {
                dom::sleep(Duration::from_millis(services.config.view.log_view_after_ms.into())).await;
                if let Err(e) = log_view(&services.backend, &credential, article_id).await {
                    tracing::warn!("Could not record view of {}: {}", article_id, e);
                }
            });
        });
    }

    let on_toggle = {
        let services = services.clone();
        let token = credential.token.clone();
        move |kind: InteractionKind| {
            let Some(request) = view.write().interactions.begin(kind) else {
                return;
            };
            let services = services.clone();
            let token = token.clone();
            spawn(async move {
                let outcome = services.backend.toggle_interaction(&token, &request).await;
                view.write().interactions.finish(kind, &outcome);
                if let Err(e) = &outcome {
                    if !services.handle_error(e) {
                        dom::alert(&e.user_message());
                    }
                }
            });
        }
    };

    let current = view.read();
    let back = current.back.clone();
    let can_moderate = current.can_moderate;
    let interactions = current.interactions.clone();
    let article = current.article.content.clone();
    let loading = current.article.loading;
    let error = current.article.error.clone();
    drop(current);

    let back_href = back.href.clone();

    rsx! {
        Navbar {}
        div {
            class: "article-page",
            button {
                class: "back-link",
                onclick: move |_| {
                    nav.push(back_href.clone());
                },
                "{back.label}"
            }
            if let Some(error) = error {
                div { class: "error-message", "{error}" }
            }
            if loading && article.is_none() {
                div { class: "loading", "Loading..." }
            }
            if let Some(detail) = article {
                article {
                    class: "article-full",
                    h1 { class: "article-title", "{detail.title}" }
                    div {
                        class: "article-meta",
                        span { "By {detail.author_username}" }
                        span { " · {format_date(&detail.created_at)}" }
                    }
                    div {
                        class: "article-tags",
                        for tag in detail.tags.iter() {
                            span { key: "{tag.name}", class: "tag-badge", "{tag.name}" }
                        }
                    }
                    div { class: "article-content", "{detail.content}" }
                    InteractionButtons { state: interactions, on_toggle }
                    if can_moderate {
                        button {
                            class: "danger-btn",
                            onclick: move |_| moderating.set(true),
                            Icon { icon: FaShieldHalved, width: 14, height: 14 }
                            " Delete as admin"
                        }
                    }
                }
            }
            if moderating() {
                ModerationDialog {
                    article_id,
                    on_close: move |_| moderating.set(false),
                }
            }
        }
    }
}

/// Reason prompt for removing someone else's article.
#[component]
fn ModerationDialog(article_id: i64, on_close: EventHandler<()>) -> Element {
    let services = use_services();
    let credential = use_credential();
    let nav = use_navigator();
    let mut reason = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        let services = services.clone();
        let credential = credential.clone();
        spawn(async move {
            let result = moderate(&services.backend, &credential, article_id, &reason()).await;
            busy.set(false);
            match result {
                Ok(_) => {
                    dom::alert("Article deleted.");
                    on_close.call(());
                    nav.push(paths::HOME);
                }
                Err(e) => {
                    if !services.handle_error(&e) {
                        error.set(Some(e.user_message()));
                    }
                }
            }
        });
    };

    rsx! {
        ModalOverlay {
            on_close,
            h2 { "Delete article" }
            p { "Tell the author why this article is being removed." }
            textarea {
                class: "modal-input",
                rows: 4,
                value: "{reason}",
                oninput: move |evt| reason.set(evt.value()),
            }
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            div {
                class: "modal-actions",
                button { class: "secondary-btn", onclick: move |_| on_close.call(()), "Cancel" }
                button {
                    class: "danger-btn",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}

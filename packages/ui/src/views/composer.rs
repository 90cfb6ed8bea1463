use client::pages::article::{load_article, required_id};
use client::pages::composer::{submit, Composer, ComposerMode};
use dioxus::prelude::*;

use crate::dom;
use crate::editor::RichTextEditor;
use crate::icons::FaXmark;
use crate::navbar::Navbar;
use crate::protected::use_credential;
use crate::services::use_services;
use crate::views::MissingParameter;
use crate::Icon;

const BODY_ID: &str = "article-body";

#[component]
pub fn CreateView() -> Element {
    let services = use_services();
    let composer = use_signal(|| Composer::create(services.local()));

    rsx! {
        Navbar {}
        ComposerForm { composer }
    }
}

#[component]
pub fn EditView(id: String) -> Element {
    match required_id(Some(&id), "id") {
        Ok(article_id) => rsx! {
            Navbar {}
            EditLoader { key: "{article_id}", article_id }
        },
        Err(e) => rsx! {
            MissingParameter { message: e.user_message() }
        },
    }
}

/// Loads the article, then hands it to the form.
#[component]
fn EditLoader(article_id: i64) -> Element {
    let services = use_services();
    let mut composer = use_signal(|| Composer::edit(article_id));

    use_hook(move || {
        let ticket = composer.write().original.begin();
        spawn(async move {
            let result = load_article(&services.backend, article_id).await;
            let mut form = composer.write();
            let completion = form.original.complete(ticket, result);
            if completion.is_loaded() {
                if let Some(article) = form.original.content.clone() {
                    form.fill(&article);
                }
            }
            drop(form);
            services.handle_completion(&completion);
        });
    });

    let original = composer.read().original.clone();
    if original.content.is_some() {
        return rsx! {
            ComposerForm { composer }
        };
    }

    rsx! {
        div {
            class: "composer-page",
            if let Some(error) = original.error {
                div { class: "error-message", "{error}" }
            } else {
                div { class: "loading", "Loading..." }
            }
        }
    }
}

/// Title, body, tags and the publish/draft actions.
#[component]
fn ComposerForm(composer: Signal<Composer>) -> Element {
    let services = use_services();
    let token = use_credential().token;
    let nav = use_navigator();
    let mut composer = composer;
    let mut tag_input = use_signal(String::new);
    // Bumped to remount the editor with a cleared body.
    let mut generation = use_signal(|| 0u32);

    let current = composer.read();
    let mode = current.mode;
    let title = current.title.clone();
    let initial = current.content.clone();
    let tags = current.tags.names();
    let tag_error = current.tag_error.clone();
    let errors = current.errors.clone();
    let submitting = current.submitting;
    drop(current);

    let heading = match mode {
        ComposerMode::Create => "Create Article",
        ComposerMode::Edit(_) => "Edit Article",
    };
    let submit_label = match (mode, submitting) {
        (_, true) => "Saving...",
        (ComposerMode::Create, false) => "Publish",
        (ComposerMode::Edit(_), false) => "Update",
    };

    let draft_services = services.clone();
    let discard_services = services.clone();

    let on_submit = move |_| {
        let Some(payload) = composer.write().begin_submit() else {
            return;
        };
        let services = services.clone();
        let token = token.clone();
        spawn(async move {
            let result = submit(&services.backend, &token, mode, &payload).await;
            if let Err(e) = &result {
                if services.handle_error(e) {
                    return;
                }
            }
            let target = composer.write().finish_submit(services.local(), result);
            if let Some(target) = target {
                nav.push(target);
            }
        });
    };

    rsx! {
        div {
            class: "composer-page",
            h1 { class: "page-title", "{heading}" }
            for message in errors {
                div { class: "error-message", "{message}" }
            }
            input {
                class: "title-input",
                placeholder: "Title",
                value: "{title}",
                oninput: move |evt| composer.write().title = evt.value(),
            }
            RichTextEditor {
                key: "{generation}",
                root_id: BODY_ID.to_string(),
                initial,
                on_input: move |text: String| composer.write().content = text,
            }
            div {
                class: "tag-editor",
                for name in tags {
                    span {
                        key: "{name}",
                        class: "tag-badge",
                        "{name}"
                        button {
                            class: "tag-remove",
                            title: "Remove tag",
                            onclick: {
                                let name = name.clone();
                                move |_| {
                                    composer.write().remove_tag(&name);
                                }
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
                input {
                    class: "tag-input",
                    placeholder: "Add a tag and press Enter",
                    value: "{tag_input}",
                    oninput: move |evt| tag_input.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() != Key::Enter {
                            return;
                        }
                        evt.prevent_default();
                        if composer.write().add_tag(&tag_input()) {
                            tag_input.set(String::new());
                        }
                    },
                }
                if let Some(message) = tag_error {
                    div { class: "field-error", "{message}" }
                }
            }
            div {
                class: "composer-actions",
                if mode == ComposerMode::Create {
                    button {
                        class: "secondary-btn",
                        onclick: move |_| {
                            match composer.read().save_draft(draft_services.local()) {
                                Ok(()) => dom::alert("Draft saved."),
                                Err(e) => dom::alert(&e.user_message()),
                            }
                        },
                        "Save draft"
                    }
                    button {
                        class: "secondary-btn",
                        onclick: move |_| {
                            composer.write().discard(discard_services.local());
                            tag_input.set(String::new());
                            generation += 1;
                        },
                        "Discard"
                    }
                }
                button {
                    class: "primary-btn",
                    disabled: submitting,
                    onclick: on_submit,
                    "{submit_label}"
                }
            }
        }
    }
}

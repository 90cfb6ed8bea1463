//! Theme toggle and cross-tab theme sync.

use client::Theme;
use dioxus::prelude::*;

use crate::dom;
use crate::services::use_services;

pub type ThemeSignal = Signal<Theme>;

pub fn apply_theme(theme: Theme) {
    dom::set_document_theme(theme.as_str());
}

/// Provides the current [`Theme`], applies it to the document and follows
/// changes made in other tabs.
#[component]
pub fn ThemeProvider(children: Element) -> Element {
    let services = use_services();
    let theme = use_context_provider(|| {
        let initial = Theme::load(services.local(), dom::prefers_dark());
        apply_theme(initial);
        Signal::new(initial)
    });

    use_hook(move || listen_for_other_tabs(theme));

    rsx! {
        {children}
    }
}

#[cfg(target_arch = "wasm32")]
fn listen_for_other_tabs(mut theme: ThemeSignal) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
        move |event: web_sys::StorageEvent| {
            if event.key().as_deref() != Some(client::storage::THEME_KEY) {
                return;
            }
            let next = Theme::resolve(event.new_value().as_deref(), dom::prefers_dark());
            tracing::debug!("Theme changed in another tab: {next}");
            apply_theme(next);
            theme.set(next);
        },
    );
    if let Err(e) =
        window.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
    {
        tracing::warn!("Cannot follow theme changes: {:?}", e);
    }
    // Lives as long as the page.
    on_storage.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn listen_for_other_tabs(_theme: ThemeSignal) {}

#[component]
pub fn ThemeToggle() -> Element {
    let services = use_services();
    let mut theme = use_context::<ThemeSignal>();

    rsx! {
        button {
            class: "theme-toggle",
            title: "Toggle theme",
            onclick: move |_| {
                let next = theme().toggled();
                next.save(services.local());
                apply_theme(next);
                theme.set(next);
            },
            "{theme().icon()}"
        }
    }
}

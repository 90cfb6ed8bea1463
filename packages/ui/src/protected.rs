//! Route protection: validate the stored token before a page renders.

use client::guard::guarded;
use client::SessionCredential;
use dioxus::prelude::*;

use crate::services::use_services;

/// The validated credential, available inside [`Protected`].
pub fn use_credential() -> SessionCredential {
    let credential = use_context::<Signal<Option<SessionCredential>>>();
    let current = credential.read().clone();
    current.unwrap_or_else(|| SessionCredential {
        token: String::new(),
        user_id: None,
        role: None,
    })
}

/// Renders `children` only once the backend has accepted the stored token.
/// Otherwise the guard has already navigated away.
#[component]
pub fn Protected(children: Element) -> Element {
    let services = use_services();
    let mut credential = use_context_provider(|| Signal::new(None::<SessionCredential>));

    let _guard = use_resource(move || {
        let services = services.clone();
        async move {
            let valid = guarded(
                &services.backend,
                &services.storage,
                services.navigator.as_ref(),
                &services.config,
                |valid| async move { valid },
            )
            .await;
            if valid.is_some() {
                credential.set(valid);
            }
        }
    });

    if credential.read().is_none() {
        return rsx! {
            div { class: "page-loader", "Loading..." }
        };
    }

    rsx! {
        {children}
    }
}

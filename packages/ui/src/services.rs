//! Shared client handles provided to every view through context.

use std::rc::Rc;

use client::pages::Completion;
use client::{ClientConfig, ClientError, ClientStorage, ErrorKind, HttpBackend, Navigator};
use dioxus::prelude::*;

/// Backend client, browser storage, configuration and full-page navigation.
#[derive(Clone)]
pub struct Services {
    pub backend: HttpBackend,
    pub storage: ClientStorage,
    pub config: ClientConfig,
    pub navigator: Rc<dyn Navigator>,
}

impl Services {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            backend: HttpBackend::new(config.clone()),
            storage: ClientStorage::platform(),
            config,
            navigator: platform_navigator(),
        }
    }

    /// Persistent storage area.
    pub fn local(&self) -> &dyn client::KeyValueStore {
        self.storage.local.as_ref()
    }

    /// Tab-scoped storage area.
    pub fn session(&self) -> &dyn client::KeyValueStore {
        self.storage.session.as_ref()
    }

    /// React to a failed request: an authentication failure ends the session,
    /// anything else is left to the page. Returns whether the page was left.
    pub fn handle_error(&self, error: &ClientError) -> bool {
        if error.kind() != ErrorKind::Authentication {
            return false;
        }
        tracing::warn!("Session rejected by backend: {}", error);
        self.storage.clear_all();
        self.navigator.replace(&self.config.routes.session_timeout);
        true
    }

    pub fn handle_completion(&self, completion: &Completion) {
        if let Completion::Failed(e) = completion {
            self.handle_error(e);
        }
    }
}

fn platform_navigator() -> Rc<dyn Navigator> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(client::BrowserNavigator)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Rc::new(client::RecordingNavigator::new())
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Provides [`Services`] to the tree. Wrap the router with it.
#[component]
pub fn ServicesProvider(config: ClientConfig, children: Element) -> Element {
    use_context_provider(|| Services::new(config.clone()));

    rsx! {
        {children}
    }
}

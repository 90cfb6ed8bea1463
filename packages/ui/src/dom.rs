//! Small browser helpers: dialogs, timers and the document theme attribute.
//! Off the web they log instead.

use std::time::Duration;

pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
            return;
        }
    }
    tracing::info!("alert: {message}");
}

/// Ask for confirmation. Declines when no dialog can be shown.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.confirm_with_message(message).unwrap_or(false);
        }
    }
    tracing::info!("confirm (declined): {message}");
    false
}

pub fn prompt(message: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.prompt_with_message(message).ok().flatten();
        }
    }
    tracing::info!("prompt (cancelled): {message}");
    None
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    let _ = duration;
}

/// Set `data-theme` on the root element.
pub fn set_document_theme(theme: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            let _ = root.set_attribute("data-theme", theme);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("theme: {theme}");
}

/// Whether the system asks for a dark colour scheme.
pub fn prefers_dark() -> bool {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        client::prefers_dark_scheme()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        false
    }
}

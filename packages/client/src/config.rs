//! # Client configuration: `client.toml`
//!
//! Describes where the backend lives, how large each paged listing is and
//! which pages the session guard sends the user to. The web binary embeds a
//! `client.toml` and parses it with [`ClientConfig::from_toml`].
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//!
//! [paging]
//! home_page_size = 5
//! your_articles_page_size = 5
//! search_page_size = 10
//!
//! [routes]
//! session_timeout = "/session-timeout"
//! authentication = "/auth"
//! home = "/"
//!
//! [view]
//! log_view_after_ms = 2000
//! ```
//!
//! Every section and field has a default, so an empty document is the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Page sizes sent to (or applied on top of) paged endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_home_page_size")]
    pub home_page_size: u32,
    #[serde(default = "default_your_articles_page_size")]
    pub your_articles_page_size: u32,
    /// Search results are paged client-side.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
}

fn default_home_page_size() -> u32 {
    5
}

fn default_your_articles_page_size() -> u32 {
    5
}

fn default_search_page_size() -> u32 {
    10
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            home_page_size: default_home_page_size(),
            your_articles_page_size: default_your_articles_page_size(),
            search_page_size: default_search_page_size(),
        }
    }
}

/// Redirect targets used outside the router (full page navigations).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Where the guard sends a missing or rejected token.
    #[serde(default = "default_session_timeout")]
    pub session_timeout: String,
    /// Where the guard sends the user when validation could not be performed,
    /// and where logout lands.
    #[serde(default = "default_authentication")]
    pub authentication: String,
    #[serde(default = "default_home")]
    pub home: String,
}

fn default_session_timeout() -> String {
    "/session-timeout".to_string()
}

fn default_authentication() -> String {
    "/auth".to_string()
}

fn default_home() -> String {
    "/".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            session_timeout: default_session_timeout(),
            authentication: default_authentication(),
            home: default_home(),
        }
    }
}

/// Article view behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Delay before a rendered article is logged as viewed. 0 logs immediately.
    #[serde(default = "default_log_view_after_ms")]
    pub log_view_after_ms: u32,
}

fn default_log_view_after_ms() -> u32 {
    2000
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            log_view_after_ms: default_log_view_after_ms(),
        }
    }
}

impl ClientConfig {
    /// Parse from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.paging.home_page_size, 5);
        assert_eq!(config.paging.search_page_size, 10);
        assert_eq!(config.view.log_view_after_ms, 2000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://articles.example.org"

            [paging]
            search_page_size = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://articles.example.org");
        assert_eq!(config.paging.search_page_size, 20);
        assert_eq!(config.paging.your_articles_page_size, 5);
        assert_eq!(config.routes.session_timeout, "/session-timeout");
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig::default().with_base_url("http://localhost:8000/");
        assert_eq!(
            config.endpoint("/articles/get/saved"),
            "http://localhost:8000/articles/get/saved"
        );
        assert_eq!(config.endpoint("search"), "http://localhost:8000/search");
    }
}

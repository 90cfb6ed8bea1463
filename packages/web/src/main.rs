use client::ClientConfig;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{ServicesProvider, ThemeProvider};
use views::{
    Article, Auth, Bookmarks, Create, Edit, Home, Profile, Search, SessionTimeout, TrendingAuthor,
    TrendingTag, YourArticles,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/auth")]
    Auth {},
    #[route("/session-timeout")]
    SessionTimeout {},
    #[route("/bookmarks")]
    Bookmarks {},
    #[route("/your-articles")]
    YourArticles {},
    #[route("/create")]
    Create {},
    #[route("/profile")]
    Profile {},
    #[route("/trending?:tag_id")]
    TrendingTag { tag_id: String },
    #[route("/author?:author_id")]
    TrendingAuthor { author_id: String },
    #[route("/search?:q")]
    Search { q: String },
    #[route("/view?:article_id")]
    Article { article_id: String },
    #[route("/edit?:id")]
    Edit { id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CLIENT_TOML: &str = include_str!("../assets/client.toml");

/// Embedded settings, with the backend address overridable at build time.
fn load_config() -> ClientConfig {
    let config = match ClientConfig::from_toml(CLIENT_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid client.toml, using defaults: {}", e);
            ClientConfig::default()
        }
    };
    match option_env!("ARTICLES_API_BASE_URL") {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ServicesProvider {
            config,
            ThemeProvider {
                Router::<Route> {}
            }
        }
    }
}

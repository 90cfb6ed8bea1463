use client::pages::{home, paths, search};
use dioxus::prelude::*;

use crate::icons::{FaMagnifyingGlass, FaRightFromBracket};
use crate::services::use_services;
use crate::theme::ThemeToggle;
use crate::Icon;

const LINKS: [(&str, &str); 5] = [
    (paths::HOME, "Home"),
    (paths::BOOKMARKS, "Bookmarks"),
    (paths::YOUR_ARTICLES, "Your Articles"),
    (paths::CREATE, "Create"),
    (paths::PROFILE, "Profile"),
];

/// Top bar of every signed-in page: links, search, theme and logout.
#[component]
pub fn Navbar() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut query = use_signal(String::new);

    let search_services = services.clone();
    let logout_services = services.clone();

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar-brand", to: paths::HOME, "Articles" }
            div {
                class: "navbar-links",
                for (href, label) in LINKS {
                    Link { key: "{href}", class: "navbar-link", to: href, "{label}" }
                }
            }
            form {
                class: "navbar-search",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    if let Some(target) = home::search_target(&query()) {
                        search::start_new_search(search_services.session());
                        nav.push(target);
                    }
                },
                input {
                    r#type: "search",
                    placeholder: "Search articles and authors",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    title: "Search",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                }
            }
            div {
                class: "navbar-actions",
                ThemeToggle {}
                button {
                    class: "logout-btn",
                    title: "Log out",
                    onclick: move |_| {
                        home::logout(
                            &logout_services.storage,
                            logout_services.navigator.as_ref(),
                            &logout_services.config,
                        );
                    },
                    Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                    " Logout"
                }
            }
        }
    }
}

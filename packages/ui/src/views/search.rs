use client::pages::search::{run_search, validate_query, SearchPage};
use client::pages::paths;
use client::text::truncate;
use client::SortKey;
use dioxus::prelude::*;

use crate::article_card::ArticleCard;
use crate::navbar::Navbar;
use crate::pagination::{PaginationControls, SortBar};
use crate::protected::use_credential;
use crate::services::use_services;

#[component]
pub fn SearchView(q: String) -> Element {
    rsx! {
        Navbar {}
        SearchResultsView { key: "{q}", query: q }
    }
}

/// Matching users and articles for one query, paged here.
#[component]
fn SearchResultsView(query: String) -> Element {
    let services = use_services();
    let token = use_credential().token;
    let nav = use_navigator();
    let invalid = validate_query(&query).err().map(|e| e.user_message());
    let mut page = use_signal(|| {
        SearchPage::new(
            query.trim(),
            services.config.paging.search_page_size,
            services.session(),
        )
    });

    {
        let services = services.clone();
        let skip = invalid.is_some();
        use_hook(move || {
            if skip {
                return;
            }
            let ticket = page.write().begin_fetch();
            let query = page.read().query.clone();
            spawn(async move {
                let result = run_search(&services.backend, &token, &query).await;
                if let Err(e) = &result {
                    tracing::error!("Search for {:?} failed: {}", query, e);
                }
                let completion = page.write().complete(services.session(), ticket, result);
                services.handle_completion(&completion);
            });
        });
    }

    if let Some(message) = invalid {
        return rsx! {
            div { class: "listing-page", div { class: "error-message", "{message}" } }
        };
    }

    let current = page.read();
    let users = current.users().to_vec();
    let articles = current.visible_articles().to_vec();
    let count = current.count_label();
    let pagination = current.pagination();
    let sort = current.cursor.sort;
    let loading = current.state.loading;
    let error = current.state.error.clone();
    drop(current);

    let sort_services = services.clone();
    let prev_services = services.clone();
    let next_services = services.clone();

    rsx! {
        div {
            class: "listing-page",
            h1 { class: "page-title", "Results for \"{query}\"" }
            if let Some(error) = error {
                div { class: "error-message", "{error}" }
            }
            if loading {
                div { class: "loading", "Searching..." }
            }
            if !users.is_empty() {
                section {
                    class: "search-users",
                    h2 { "Authors" }
                    for user in users {
                        div {
                            key: "{user.user_id}",
                            class: "user-hit",
                            Link { to: paths::trending_author(user.user_id), "{user.user_name}" }
                            if let Some(bio) = user.bio {
                                p { class: "user-bio", "{truncate(&bio)}" }
                            }
                        }
                    }
                }
            }
            section {
                class: "search-articles",
                h2 { "Articles" }
                p { class: "listing-count", "{count}" }
                SortBar {
                    current: sort,
                    on_change: move |next: SortKey| page.write().set_sort(sort_services.session(), next),
                }
                div {
                    class: "article-list",
                    for article in articles {
                        ArticleCard {
                            key: "{article.article_id}",
                            article: article.clone(),
                            on_open: {
                                let services = services.clone();
                                move |id: i64| {
                                    let target = page.read().open_article(services.session(), id);
                                    nav.push(target);
                                }
                            },
                        }
                    }
                }
                PaginationControls {
                    pagination,
                    on_prev: move |_| {
                        page.write().prev(prev_services.session());
                    },
                    on_next: move |_| {
                        page.write().next(next_services.session());
                    },
                }
            }
        }
    }
}

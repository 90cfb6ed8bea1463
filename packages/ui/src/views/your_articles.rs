use client::pages::listing::fetch_listing;
use client::pages::paths;
use client::pages::your_articles::{
    delete_article, load_stats, YourArticlesPage, DELETE_CONFIRMATION, DELETE_FAILED,
};
use client::SortKey;
use dioxus::prelude::*;

use crate::article_card::ArticleCard;
use crate::dom;
use crate::icons::{FaPenToSquare, FaTrash};
use crate::navbar::Navbar;
use crate::pagination::{PaginationControls, SortBar};
use crate::protected::use_credential;
use crate::services::{use_services, Services};
use crate::Icon;

fn fetch_articles(services: Services, token: String, mut page: Signal<YourArticlesPage>) {
    let (ticket, request) = page.write().listing.begin_fetch();
    spawn(async move {
        let result = fetch_listing(&services.backend, &services.storage, &token, &request).await;
        if let Err(e) = &result {
            tracing::error!("Loading your articles failed: {}", e);
        }
        let completion = page
            .write()
            .listing
            .complete(services.session(), ticket, result);
        services.handle_completion(&completion);
    });
}

fn fetch_stats(services: Services, token: String, mut page: Signal<YourArticlesPage>) {
    let ticket = page.write().stats.begin();
    spawn(async move {
        let result = load_stats(&services.backend, &token).await;
        let completion = page.write().stats.complete(ticket, result);
        services.handle_completion(&completion);
    });
}

fn refresh(services: &Services, token: &str, page: Signal<YourArticlesPage>) {
    fetch_articles(services.clone(), token.to_string(), page);
    fetch_stats(services.clone(), token.to_string(), page);
}

/// The signed-in user's articles with totals, edit and delete.
#[component]
pub fn YourArticlesView() -> Element {
    let services = use_services();
    let token = use_credential().token;
    let nav = use_navigator();
    let mut page = use_signal(|| YourArticlesPage::new(&services.config, services.session()));

    {
        let services = services.clone();
        let token = token.clone();
        use_hook(move || refresh(&services, &token, page));
    }

    let current = page.read();
    let stats = current.stats.content.clone().unwrap_or_default();
    let articles = current.listing.articles().to_vec();
    let pagination = current.listing.pagination();
    let sort = current.listing.cursor.sort;
    let loading = current.listing.state.loading;
    let error = current.listing.state.error.clone();
    let empty = current.is_empty();
    let deleting = current.deleting;
    drop(current);

    let on_delete = {
        let services = services.clone();
        let token = token.clone();
        move |article_id: i64| {
            if !dom::confirm(DELETE_CONFIRMATION) {
                return;
            }
            if !page.write().begin_delete(article_id) {
                return;
            }
            let services = services.clone();
            let token = token.clone();
            spawn(async move {
                let result = delete_article(&services.backend, &token, article_id).await;
                let refetch = page.write().finish_delete(&result);
                match result {
                    Ok(()) if refetch => refresh(&services, &token, page),
                    Ok(()) => {}
                    Err(e) => {
                        if !services.handle_error(&e) {
                            dom::alert(DELETE_FAILED);
                        }
                    }
                }
            });
        }
    };

    let sort_services = services.clone();
    let sort_token = token.clone();
    let prev_services = services.clone();
    let prev_token = token.clone();
    let next_services = services.clone();
    let next_token = token.clone();
    let open_services = services.clone();

    rsx! {
        Navbar {}
        div {
            class: "listing-page",
            h1 { class: "page-title", "Your Articles" }
            div {
                class: "stats-grid",
                div { class: "stat", span { class: "stat-value", "{stats.total_articles}" } span { "Articles" } }
                div { class: "stat", span { class: "stat-value", "{stats.total_views}" } span { "Views" } }
                div { class: "stat", span { class: "stat-value", "{stats.total_likes}" } span { "Likes" } }
                div { class: "stat", span { class: "stat-value", "{stats.total_saves}" } span { "Saves" } }
            }
            SortBar {
                current: sort,
                on_change: move |next: SortKey| {
                    if page.write().listing.set_sort(sort_services.session(), next) {
                        fetch_articles(sort_services.clone(), sort_token.clone(), page);
                    }
                },
            }
            if let Some(error) = error {
                div { class: "error-message", "{error}" }
            }
            if empty {
                div {
                    class: "empty-state",
                    p { "You haven't written any articles yet." }
                    Link { class: "primary-btn", to: paths::CREATE, "Create Article" }
                }
            } else if loading && articles.is_empty() {
                div { class: "loading", "Loading..." }
            }
            div {
                class: "article-list",
                for article in articles {
                    ArticleCard {
                        key: "{article.article_id}",
                        article: article.clone(),
                        on_open: {
                            let services = open_services.clone();
                            move |id: i64| {
                                let target = page.read().listing.open_article(services.session(), id);
                                nav.push(target);
                            }
                        },
                        actions: rsx! {
                            Link {
                                class: "card-btn",
                                to: paths::edit(article.article_id),
                                Icon { icon: FaPenToSquare, width: 12, height: 12 }
                                " Edit"
                            }
                            button {
                                class: "card-btn danger",
                                disabled: deleting.is_some(),
                                onclick: {
                                    let mut on_delete = on_delete.clone();
                                    let id = article.article_id;
                                    move |_| on_delete(id)
                                },
                                Icon { icon: FaTrash, width: 12, height: 12 }
                                if deleting == Some(article.article_id) { " Deleting..." } else { " Delete" }
                            }
                        },
                    }
                }
            }
            PaginationControls {
                pagination,
                on_prev: move |_| {
                    if page.write().listing.prev(prev_services.session()) {
                        fetch_articles(prev_services.clone(), prev_token.clone(), page);
                    }
                },
                on_next: move |_| {
                    if page.write().listing.next(next_services.session()) {
                        fetch_articles(next_services.clone(), next_token.clone(), page);
                    }
                },
            }
        }
    }
}

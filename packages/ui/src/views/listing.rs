//! Paginated article listings: home feed, bookmarks, tag and author pages.

use client::pages::home::{load_trending, HomePage, Trending};
use client::pages::listing::{fetch_listing, ListingController, ListingSource};
use client::pages::{article::required_id, paths, PageState};
use client::{ListingKind, SortKey};
use dioxus::prelude::*;

use crate::article_card::ArticleCard;
use crate::dom;
use crate::navbar::Navbar;
use crate::pagination::{PaginationControls, SortBar};
use crate::protected::use_credential;
use crate::services::{use_services, Services};

/// Fetch the controller's current page and apply it if still current.
pub(crate) fn fetch_page(services: Services, token: String, mut listing: Signal<ListingController>) {
    let (ticket, request) = listing.write().begin_fetch();
    tracing::debug!("Fetching {:?} page {}", request.source, request.page);
    spawn(async move {
        let result = fetch_listing(&services.backend, &services.storage, &token, &request).await;
        if let Err(e) = &result {
            tracing::error!("Loading {:?} failed: {}", request.source, e);
        }
        let completion = listing.write().complete(services.session(), ticket, result);
        services.handle_completion(&completion);
    });
}

/// Count line under the heading.
fn summary(listing: &ListingController) -> Option<String> {
    let page = listing.state.content.as_ref()?;
    match listing.kind() {
        ListingKind::Bookmarks => Some(format!(
            "Showing {} of {} saved articles",
            page.articles.len(),
            page.total_results
        )),
        ListingKind::TrendingTag | ListingKind::TrendingAuthor => {
            Some(format!("{} articles found", page.total_results))
        }
        _ => None,
    }
}

/// Heading, sort bar (unless ranked), cards and pagination for one listing.
#[component]
pub fn ListingBody(
    listing: Signal<ListingController>,
    heading: String,
    /// Show a back button that forgets the listing position.
    #[props(default)]
    back_to_home: bool,
) -> Element {
    let services = use_services();
    let credential = use_credential();
    let nav = use_navigator();
    let token = credential.token.clone();

    {
        let services = services.clone();
        let token = token.clone();
        use_hook(move || fetch_page(services, token, listing));
    }

    let current = listing.read();
    let title = current
        .state
        .content
        .as_ref()
        .and_then(|page| page.heading.clone())
        .unwrap_or(heading);
    let count = summary(&current);
    let pagination = current.pagination();
    let sort = current.cursor.sort;
    let sortable = current.kind().ordering().sortable();
    let articles = current.articles().to_vec();
    let loading = current.state.loading;
    let error = current.state.error.clone();
    drop(current);

    let sort_services = services.clone();
    let sort_token = token.clone();
    let prev_services = services.clone();
    let prev_token = token.clone();
    let next_services = services.clone();
    let next_token = token.clone();
    let open_services = services.clone();
    let back_services = services.clone();

    rsx! {
        div {
            class: "listing-page",
            if back_to_home {
                button {
                    class: "back-link",
                    onclick: move |_| {
                        listing.read().leave(back_services.session());
                        nav.push(paths::HOME);
                    },
                    "← Back to Home"
                }
            }
            h1 { class: "page-title", "{title}" }
            if let Some(count) = count {
                p { class: "listing-count", "{count}" }
            }
            if sortable {
                SortBar {
                    current: sort,
                    on_change: move |next: SortKey| {
                        let refetch = listing.write().set_sort(sort_services.session(), next);
                        if refetch {
                            fetch_page(sort_services.clone(), sort_token.clone(), listing);
                        }
                    },
                }
            }
            if let Some(error) = error {
                div { class: "error-message", "{error}" }
            }
            if loading && articles.is_empty() {
                div { class: "loading", "Loading..." }
            } else if articles.is_empty() {
                p { class: "empty-state", "No articles found." }
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
                                let target = listing.read().open_article(services.session(), id);
                                nav.push(target);
                            }
                        },
                    }
                }
            }
            PaginationControls {
                pagination,
                on_prev: move |_| {
                    if listing.write().prev(prev_services.session()) {
                        fetch_page(prev_services.clone(), prev_token.clone(), listing);
                    }
                },
                on_next: move |_| {
                    if listing.write().next(next_services.session()) {
                        fetch_page(next_services.clone(), next_token.clone(), listing);
                    }
                },
            }
        }
    }
}

#[component]
fn TrendingPanel(trending: PageState<Trending>) -> Element {
    let Some(content) = trending.content else {
        return rsx! {
            aside {
                class: "trending-panel",
                if let Some(error) = trending.error {
                    div { class: "error-message", "{error}" }
                } else {
                    div { class: "loading", "Loading..." }
                }
            }
        };
    };

    rsx! {
        aside {
            class: "trending-panel",
            h2 { "Trending Tags" }
            ul {
                for tag in content.tags {
                    li {
                        key: "{tag.tag_id}",
                        Link { to: paths::trending_tag(tag.tag_id), "#{tag.tag_name}" }
                        span { class: "trending-count", " ({tag.count})" }
                    }
                }
            }
            h2 { "Trending Authors" }
            ul {
                for author in content.authors {
                    li {
                        key: "{author.user_id}",
                        Link { to: paths::trending_author(author.user_id), "{author.user_name}" }
                        span { class: "trending-count", " ({author.count})" }
                    }
                }
            }
        }
    }
}

/// Recommendations with trending tags and authors alongside.
#[component]
pub fn HomeView() -> Element {
    let services = use_services();
    let (feed, mut trending) = use_hook(|| {
        let page = HomePage::new(&services.config, services.session());
        (Signal::new(page.feed), Signal::new(page.trending))
    });

    use_hook(move || {
        let ticket = trending.write().begin();
        spawn(async move {
            let result = load_trending(&services.backend).await;
            if let Err(e) = &result {
                tracing::error!("Loading trending failed: {}", e);
            }
            let completion = trending.write().complete(ticket, result);
            services.handle_completion(&completion);
        });
    });

    rsx! {
        Navbar {}
        div {
            class: "home-layout",
            ListingBody { listing: feed, heading: "Recommended for you" }
            TrendingPanel { trending: trending() }
        }
    }
}

#[component]
pub fn BookmarksView() -> Element {
    let services = use_services();
    let listing = use_signal(|| ListingController::new(ListingSource::Bookmarks, services.session()));

    rsx! {
        Navbar {}
        ListingBody { listing, heading: "Saved Articles" }
    }
}

/// An alert for a missing or malformed query parameter, then an empty page.
#[component]
pub fn MissingParameter(message: String) -> Element {
    use_hook(|| dom::alert(&message));
    rsx! {
        Navbar {}
    }
}

#[component]
fn FilteredBody(source: ListingSource, heading: String) -> Element {
    let services = use_services();
    let listing = use_signal(|| ListingController::new(source, services.session()));

    rsx! {
        Navbar {}
        ListingBody { listing, heading, back_to_home: true }
    }
}

/// Shared by the tag and author pages; `raw_id` comes from the query string.
#[component]
fn FilteredListing(raw_id: String, param: &'static str, heading: &'static str) -> Element {
    let source = required_id(Some(&raw_id), param).map(|id| match param {
        "author_id" => ListingSource::Author(id),
        _ => ListingSource::Tag(id),
    });

    match source {
        Ok(source) => rsx! {
            FilteredBody { key: "{raw_id}", source, heading: heading.to_string() }
        },
        Err(e) => rsx! {
            MissingParameter { message: e.user_message() }
        },
    }
}

#[component]
pub fn TrendingTagView(tag_id: String) -> Element {
    rsx! {
        FilteredListing { raw_id: tag_id, param: "tag_id", heading: "Tag" }
    }
}

#[component]
pub fn TrendingAuthorView(author_id: String) -> Element {
    rsx! {
        FilteredListing { raw_id: author_id, param: "author_id", heading: "Author" }
    }
}

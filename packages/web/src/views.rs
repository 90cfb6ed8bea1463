//! Route components. Signed-in pages run the session guard first.

use dioxus::prelude::*;
use ui::views::{
    ArticleViewPage, AuthView, BookmarksView, CreateView, EditView, HomeView, ProfileView,
    SearchView, SessionTimeoutView, TrendingAuthorView, TrendingTagView, YourArticlesView,
};
use ui::Protected;

#[component]
pub fn Home() -> Element {
    rsx! { Protected { HomeView {} } }
}

#[component]
pub fn Auth() -> Element {
    rsx! { AuthView {} }
}

#[component]
pub fn SessionTimeout() -> Element {
    rsx! { SessionTimeoutView {} }
}

#[component]
pub fn Bookmarks() -> Element {
    rsx! { Protected { BookmarksView {} } }
}

#[component]
pub fn YourArticles() -> Element {
    rsx! { Protected { YourArticlesView {} } }
}

#[component]
pub fn Create() -> Element {
    rsx! { Protected { CreateView {} } }
}

#[component]
pub fn Profile() -> Element {
    rsx! { Protected { ProfileView {} } }
}

#[component]
pub fn TrendingTag(tag_id: String) -> Element {
    rsx! { Protected { TrendingTagView { tag_id } } }
}

#[component]
pub fn TrendingAuthor(author_id: String) -> Element {
    rsx! { Protected { TrendingAuthorView { author_id } } }
}

#[component]
pub fn Search(q: String) -> Element {
    rsx! { Protected { SearchView { q } } }
}

#[component]
pub fn Article(article_id: String) -> Element {
    rsx! { Protected { ArticleViewPage { article_id } } }
}

#[component]
pub fn Edit(id: String) -> Element {
    rsx! { Protected { EditView { id } } }
}

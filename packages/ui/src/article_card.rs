use client::models::ArticleSummary;
use client::text::{format_date, make_preview, truncate};
use dioxus::prelude::*;

use crate::icons::FaHeart;
use crate::Icon;

/// One article in a listing. Clicking anywhere on the card opens it.
#[component]
pub fn ArticleCard(
    article: ArticleSummary,
    on_open: EventHandler<i64>,
    /// Extra controls rendered in the card footer (edit/delete buttons).
    actions: Option<Element>,
) -> Element {
    let id = article.article_id;
    let preview = truncate(&make_preview(&article.content));
    let date = format_date(&article.created_at);
    let author = article.author_username.clone().unwrap_or_default();

    rsx! {
        div {
            class: "article-card",
            onclick: move |_| on_open.call(id),
            h3 { class: "article-title", "{article.title}" }
            if !author.is_empty() {
                p { class: "article-author", "By {author}" }
            }
            p { class: "article-preview", "{preview}" }
            div {
                class: "article-meta",
                span { "{date}" }
                span {
                    class: "article-likes",
                    Icon { icon: FaHeart, width: 12, height: 12 }
                    " {article.likes}"
                }
            }
            div {
                class: "article-tags",
                for tag in article.tags.iter() {
                    span { key: "{tag.name}", class: "tag-badge", "{tag.name}" }
                }
            }
            if let Some(actions) = actions {
                div {
                    class: "article-actions",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    {actions}
                }
            }
        }
    }
}

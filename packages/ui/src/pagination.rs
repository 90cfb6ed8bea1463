use client::pages::Pagination;
use client::SortKey;
use dioxus::prelude::*;

/// Prev/next controls with a "Page X of Y" label. Hidden for a single page.
#[component]
pub fn PaginationControls(
    pagination: Pagination,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    if !pagination.visible() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "pagination",
            button {
                class: "page-btn",
                disabled: !pagination.prev_enabled(),
                onclick: move |_| on_prev.call(()),
                "Previous"
            }
            span { class: "page-indicator", "{pagination.label()}" }
            button {
                class: "page-btn",
                disabled: !pagination.next_enabled(),
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}

#[component]
pub fn SortBar(current: SortKey, on_change: EventHandler<SortKey>) -> Element {
    rsx! {
        div {
            class: "sort-bar",
            for sort in SortKey::ALL {
                button {
                    key: "{sort}",
                    class: if sort == current { "sort-btn active" } else { "sort-btn" },
                    onclick: move |_| on_change.call(sort),
                    "{sort.label()}"
                }
            }
        }
    }
}

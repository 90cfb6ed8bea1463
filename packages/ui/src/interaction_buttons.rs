use client::interaction::InteractionToggle;
use client::models::InteractionKind;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_regular_icons;

use crate::icons::{FaBookmark, FaHeart};
use crate::Icon;

/// Like and save buttons. Icons reflect server-confirmed state only; a button
/// is disabled while its toggle is in flight.
#[component]
pub fn InteractionButtons(state: InteractionToggle, on_toggle: EventHandler<InteractionKind>) -> Element {
    let liked = state.flags.liked;
    let saved = state.flags.saved;

    rsx! {
        div {
            class: "interaction-buttons",
            button {
                class: if liked { "interaction-btn active" } else { "interaction-btn" },
                title: if liked { "Unlike" } else { "Like" },
                disabled: state.is_pending(InteractionKind::Like),
                onclick: move |_| on_toggle.call(InteractionKind::Like),
                if liked {
                    Icon { icon: FaHeart, width: 18, height: 18 }
                } else {
                    Icon { icon: fa_regular_icons::FaHeart, width: 18, height: 18 }
                }
            }
            button {
                class: if saved { "interaction-btn active" } else { "interaction-btn" },
                title: if saved { "Remove bookmark" } else { "Save" },
                disabled: state.is_pending(InteractionKind::Save),
                onclick: move |_| on_toggle.call(InteractionKind::Save),
                if saved {
                    Icon { icon: FaBookmark, width: 18, height: 18 }
                } else {
                    Icon { icon: fa_regular_icons::FaBookmark, width: 18, height: 18 }
                }
            }
        }
    }
}

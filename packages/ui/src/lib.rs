//! Shared UI for the article frontend: page views, the components they are
//! built from, and the context providers the app is wrapped in.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod dom;

mod services;
pub use services::{use_services, Services, ServicesProvider};

mod theme;
pub use theme::{apply_theme, ThemeProvider, ThemeSignal, ThemeToggle};

mod protected;
pub use protected::{use_credential, Protected};

mod navbar;
pub use navbar::Navbar;

mod modal;
pub use modal::ModalOverlay;

mod pagination;
pub use pagination::{PaginationControls, SortBar};

mod article_card;
pub use article_card::ArticleCard;

mod interaction_buttons;
pub use interaction_buttons::InteractionButtons;

pub mod editor;
pub use editor::{DomSurface, RichTextEditor};

pub mod views;

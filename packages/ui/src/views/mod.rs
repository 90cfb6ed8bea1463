//! Page bodies shared by the platform packages. Everything except
//! [`AuthView`] and [`SessionTimeoutView`] expects to render inside
//! [`crate::Protected`].

mod article;
pub use article::ArticleViewPage;

mod auth;
pub use auth::{AuthView, SessionTimeoutView};

mod composer;
pub use composer::{CreateView, EditView};

mod listing;
pub use listing::{
    BookmarksView, HomeView, ListingBody, MissingParameter, TrendingAuthorView, TrendingTagView,
};

mod profile;
pub use profile::ProfileView;

mod search;
pub use search::SearchView;

mod your_articles;
pub use your_articles::YourArticlesView;

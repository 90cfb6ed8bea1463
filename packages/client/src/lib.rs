pub mod api;
pub mod config;
pub mod cursor;
pub mod draft;
pub mod editor;
pub mod error;
pub mod guard;
pub mod interaction;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod session;
pub mod storage;
pub mod tags;
pub mod text;
pub mod theme;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::{prefers_dark_scheme, BrowserNavigator, BrowserStorage};

#[cfg(test)]
mod testing;

pub use api::{Backend, HttpBackend};
pub use config::ClientConfig;
pub use cursor::{ListingKind, ListingOrder, SortKey, ViewCursor};
pub use error::{ClientError, ErrorKind};
pub use guard::{protect_route, GuardOutcome};
pub use navigation::{Navigator, RecordingNavigator};
pub use session::SessionCredential;
pub use storage::{ClientStorage, KeyValueStore};
pub use theme::Theme;

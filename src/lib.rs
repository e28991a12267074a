//! Linkdock - bookmark store for an embedded-webview browser shell
//!
//! The embedding application owns the web engine, the windows and the real
//! toolbar/menu objects; this crate owns the bookmarks.
//!
//! # Features
//! - Two-level bookmark tree: folders on top, entries below, order preserved
//! - The toolbar folder and the "Other Bookmarks" folder are always present
//! - JSON array-of-arrays persistence in the platform config directory
//! - Icons stored as PNG sidecar files next to the bookmarks file
//! - Dirty-flag gated writes: shutdown flush only touches disk after changes
//! - Positional reconciliation of folder contents onto UI action lists
//! - Download progress presentation model for status-bar widgets

pub mod actions;
pub mod download;
pub mod events;
pub mod format;
pub mod icon;
pub mod model;
pub mod store;

pub use actions::{short_title, ActionContent, ActionSink};
pub use download::{DownloadProgress, DownloadState};
pub use events::StoreEvent;
pub use icon::{Icon, IconImage};
pub use model::{Bookmark, BookmarkTree, EntryLocation, Folder};
pub use store::BookmarkStore;

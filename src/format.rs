//! Bookmarks wire format
//!
//! The persisted file is a single JSON array of rows; each row is an array
//! of one to three string-or-null values:
//!
//! - `["Tool Bar"]` — folder header; bookmark rows that follow belong to it
//! - `["http://qt.io", "Qt"]` — bookmark without icon
//! - `["http://qt.io", "Qt", "<dir>/icon00_00_64.png"]` — bookmark with an
//!   icon sidecar file (the third element may also be `null`)

use crate::icon::{sidecar_file_name, Icon};
use crate::model::{normalize_url, Bookmark, BookmarkTree, Folder, TOOLBAR_FOLDER_TITLE};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// One row of the array-of-arrays document.
pub type Row = Vec<Option<String>>;

/// Structural errors in an otherwise syntactically valid document.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bookmarks file is not a JSON array of string rows: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {index} has {len} elements, expected 1 to 3")]
    RowLength { index: usize, len: usize },
    #[error("row {index}: folder title must not be null")]
    NullFolderTitle { index: usize },
    #[error("row {index}: bookmark URL must not be null or empty")]
    EmptyUrl { index: usize },
    #[error("row {index}: bookmark row before any folder header")]
    OrphanBookmark { index: usize },
}

/// Parse a bookmarks document. Icon paths are resolved as written;
/// unreadable icon files degrade to bookmarks without icons.
pub fn parse(json: &str) -> Result<BookmarkTree, FormatError> {
    let rows: Vec<Row> = serde_json::from_str(json)?;
    tree_from_rows(&rows)
}

/// Build the tree from already-decoded rows.
pub fn tree_from_rows(rows: &[Row]) -> Result<BookmarkTree, FormatError> {
    let mut folders: Vec<Folder> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        match row.len() {
            1 => {
                let title = row[0]
                    .clone()
                    .ok_or(FormatError::NullFolderTitle { index })?;
                folders.push(Folder::new(title));
            }
            2 | 3 => {
                let url = row[0]
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .ok_or(FormatError::EmptyUrl { index })?;
                let title = row[1].clone().unwrap_or_default();
                let icon = row
                    .get(2)
                    .and_then(|path| path.as_deref())
                    .and_then(load_icon);
                let folder = folders
                    .last_mut()
                    .ok_or(FormatError::OrphanBookmark { index })?;
                folder.entries.push(Bookmark {
                    url: normalize_url(url),
                    title,
                    icon,
                });
            }
            len => return Err(FormatError::RowLength { index, len }),
        }
    }
    Ok(BookmarkTree::from_folders(folders))
}

fn load_icon(path: &str) -> Option<Icon> {
    match Icon::load(Path::new(path)) {
        Ok(icon) if !icon.is_empty() => Some(icon),
        Ok(_) => None,
        Err(err) => {
            warn!("Skipping unreadable bookmark icon {}: {:#}", path, err);
            None
        }
    }
}

/// Serialize the tree to rows, writing icon sidecar PNGs under `icon_dir`.
/// An icon that fails to encode is dropped from its row with a warning; the
/// bookmark itself is kept.
pub fn serialize(tree: &BookmarkTree, icon_dir: &Path) -> Vec<Row> {
    let mut rows = Vec::new();
    for (f, folder) in tree.folders().enumerate() {
        rows.push(vec![Some(folder.title.clone())]);
        for (r, bookmark) in folder.entries.iter().enumerate() {
            let mut row = vec![Some(bookmark.url.clone()), Some(bookmark.title.clone())];
            if let Some(image) = bookmark.icon.as_ref().and_then(Icon::largest) {
                let path = icon_dir.join(sidecar_file_name(f, r, image.width));
                match image.write_png(&path) {
                    Ok(()) => row.push(Some(path.to_string_lossy().into_owned())),
                    Err(err) => {
                        warn!("Failed to write bookmark icon {:?}: {:#}", path, err);
                    }
                }
            }
            rows.push(row);
        }
    }
    rows
}

/// Pretty-print rows as the on-disk JSON document.
pub fn to_json(rows: &[Row]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Built-in bookmark set used on first run, when no persisted file exists.
pub fn default_tree() -> BookmarkTree {
    let mut toolbar = Folder::new(TOOLBAR_FOLDER_TITLE);
    for (url, title) in [
        ("http://qt.io", "Qt"),
        ("https://download.qt.io/snapshots/ci/pyside/", "Downloads"),
        ("https://doc.qt.io/qtforpython/", "Documentation"),
        ("https://bugreports.qt.io/projects/PYSIDE/", "Bug Reports"),
        ("https://www.python.org/", "Python"),
        ("https://wiki.qt.io/PySide6", "Qt for Python"),
    ] {
        toolbar.entries.push(Bookmark::new(url, title, None));
    }
    let mut tree = BookmarkTree::new();
    tree.toolbar = toolbar;
    tree
}

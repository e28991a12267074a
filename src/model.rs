//! Bookmark tree data model
//!
//! A two-level tree: folders at the top, bookmark entries below them. Depth
//! is fixed; folders never nest. The first two folders are structurally
//! special — the toolbar strip and the "Other Bookmarks" collection — and are
//! held as named fields so nothing has to index into a folder list to find
//! them.

use crate::icon::Icon;

/// Title of the folder whose entries populate the bookmark toolbar.
pub const TOOLBAR_FOLDER_TITLE: &str = "Tool Bar";

/// Title of the general bookmark collection shown in the bookmarks menu.
pub const OTHER_FOLDER_TITLE: &str = "Other Bookmarks";

/// A single saved URL with a display title and optional icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub icon: Option<Icon>,
}

impl Bookmark {
    /// Create a bookmark from user input, normalizing the URL.
    pub fn new(url: &str, title: &str, icon: Option<Icon>) -> Self {
        Self {
            url: normalize_url(url),
            title: title.to_string(),
            icon,
        }
    }
}

/// A named grouping of bookmarks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Folder {
    pub title: String,
    pub entries: Vec<Bookmark>,
}

impl Folder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }
}

/// Position of a bookmark entry: folder index (0 = toolbar, 1 = other,
/// 2.. = extras) plus the row within that folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLocation {
    pub folder: usize,
    pub row: usize,
}

impl EntryLocation {
    pub fn new(folder: usize, row: usize) -> Self {
        Self { folder, row }
    }
}

/// The full bookmark set. Folder order is significant and preserved across
/// load/save: toolbar first, then other, then any extra folders.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkTree {
    pub toolbar: Folder,
    pub other: Folder,
    pub extra: Vec<Folder>,
}

impl Default for BookmarkTree {
    fn default() -> Self {
        Self {
            toolbar: Folder::new(TOOLBAR_FOLDER_TITLE),
            other: Folder::new(OTHER_FOLDER_TITLE),
            extra: Vec::new(),
        }
    }
}

impl BookmarkTree {
    /// Create an empty tree with the two well-known folders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from an ordered folder list. The first folder becomes
    /// the toolbar folder and the second the "other" folder; missing
    /// well-known folders are padded with empty ones under their default
    /// titles so both are always addressable.
    pub fn from_folders(folders: Vec<Folder>) -> Self {
        let mut folders = folders.into_iter();
        Self {
            toolbar: folders
                .next()
                .unwrap_or_else(|| Folder::new(TOOLBAR_FOLDER_TITLE)),
            other: folders
                .next()
                .unwrap_or_else(|| Folder::new(OTHER_FOLDER_TITLE)),
            extra: folders.collect(),
        }
    }

    /// Folders in persistence order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        [&self.toolbar, &self.other]
            .into_iter()
            .chain(self.extra.iter())
    }

    pub fn folder_count(&self) -> usize {
        2 + self.extra.len()
    }

    pub fn folder(&self, index: usize) -> Option<&Folder> {
        match index {
            0 => Some(&self.toolbar),
            1 => Some(&self.other),
            n => self.extra.get(n - 2),
        }
    }

    pub fn folder_mut(&mut self, index: usize) -> Option<&mut Folder> {
        match index {
            0 => Some(&mut self.toolbar),
            1 => Some(&mut self.other),
            n => self.extra.get_mut(n - 2),
        }
    }

    /// Look up the bookmark at `location`, if any.
    pub fn bookmark(&self, location: EntryLocation) -> Option<&Bookmark> {
        self.folder(location.folder)?.entries.get(location.row)
    }
}

/// Normalize a URL typed by the user: trim surrounding whitespace and assume
/// `http` when no scheme is present ("qt.io" becomes "http://qt.io").
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    // "host:8080" is a port, not a scheme
    let has_scheme = trimmed.split_once(':').is_some_and(|(scheme, rest)| {
        !scheme.is_empty()
            && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            && !rest.starts_with(|c: char| c.is_ascii_digit())
    });
    if has_scheme {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

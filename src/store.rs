//! Bookmark store
//!
//! Owns the bookmark tree, keeps it in sync with a `bookmarks.json` file in
//! the configuration directory, and notifies registered observers about
//! mutations and bookmark activations. A dirty flag gates the shutdown
//! write: nothing touches the disk unless something actually changed.

use crate::actions::{self, ActionSink};
use crate::events::{Observer, Observers, StoreEvent};
use crate::format;
use crate::icon::Icon;
use crate::model::{Bookmark, BookmarkTree, EntryLocation, Folder};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the persisted bookmark set inside the config directory.
pub const BOOKMARK_FILE: &str = "bookmarks.json";

/// The bookmark store. Single-threaded by design; all operations run on the
/// embedder's UI thread and observers are called synchronously.
#[derive(Debug)]
pub struct BookmarkStore {
    tree: BookmarkTree,
    config_dir: PathBuf,
    modified: bool,
    observers: Observers,
}

impl BookmarkStore {
    /// Open the store in the platform configuration directory.
    pub fn load_default() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("io", "linkdock", "Linkdock")
            .context("Failed to determine config directory")?;
        Ok(Self::load(proj_dirs.config_dir()))
    }

    /// Open the store backed by `bookmarks.json` under `config_dir`. A
    /// missing file yields the built-in default set; an unreadable or
    /// malformed file does too, with a warning, instead of failing startup.
    pub fn load(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let path = config_dir.join(BOOKMARK_FILE);
        let tree = if path.exists() {
            info!("Reading {:?}...", path);
            match read_tree(&path) {
                Ok(tree) => tree,
                Err(err) => {
                    warn!(
                        "Cannot load {:?}, falling back to default bookmarks: {:#}",
                        path, err
                    );
                    format::default_tree()
                }
            }
        } else {
            format::default_tree()
        };
        Self {
            tree,
            config_dir,
            modified: false,
            observers: Observers::default(),
        }
    }

    pub fn tree(&self) -> &BookmarkTree {
        &self.tree
    }

    pub fn toolbar(&self) -> &Folder {
        &self.tree.toolbar
    }

    pub fn other(&self) -> &Folder {
        &self.tree.other
    }

    pub fn bookmark(&self, location: EntryLocation) -> Option<&Bookmark> {
        self.tree.bookmark(location)
    }

    /// Whether unsaved mutations exist.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Register an observer for change and activation events.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.subscribe(observer);
    }

    /// Append a bookmark to the "Other Bookmarks" folder.
    pub fn add_bookmark(&mut self, url: &str, title: &str, icon: Option<Icon>) {
        self.tree.other.entries.push(Bookmark::new(url, title, icon));
        self.touch();
    }

    /// Append a bookmark to the toolbar folder.
    pub fn add_toolbar_bookmark(&mut self, url: &str, title: &str, icon: Option<Icon>) {
        self.tree
            .toolbar
            .entries
            .push(Bookmark::new(url, title, icon));
        self.touch();
    }

    /// Insert a bookmark at `location`, shifting later rows down. Returns
    /// false when the location does not address an insertable row.
    pub fn insert_bookmark(&mut self, location: EntryLocation, bookmark: Bookmark) -> bool {
        let Some(folder) = self.tree.folder_mut(location.folder) else {
            return false;
        };
        if location.row > folder.entries.len() {
            return false;
        }
        folder.entries.insert(location.row, bookmark);
        self.touch();
        true
    }

    /// Remove the bookmark at `location` after the confirmation collaborator
    /// agrees. A declined confirmation is a normal outcome: no mutation, no
    /// event. Only leaf entries are addressable here; folders cannot be
    /// removed.
    pub fn remove_bookmark(
        &mut self,
        location: EntryLocation,
        confirm: impl FnOnce(&Bookmark) -> bool,
    ) -> bool {
        let Some(bookmark) = self.tree.bookmark(location) else {
            return false;
        };
        if !confirm(bookmark) {
            return false;
        }
        let Some(folder) = self.tree.folder_mut(location.folder) else {
            return false;
        };
        folder.entries.remove(location.row);
        self.touch();
        true
    }

    /// Rename the bookmark at `location`. Returns false if nothing is there.
    pub fn rename_bookmark(&mut self, location: EntryLocation, title: &str) -> bool {
        let Some(folder) = self.tree.folder_mut(location.folder) else {
            return false;
        };
        let Some(bookmark) = folder.entries.get_mut(location.row) else {
            return false;
        };
        bookmark.title = title.to_string();
        self.touch();
        true
    }

    /// Force the dirty flag, e.g. to rewrite a file in normalized form.
    pub fn mark_modified(&mut self) {
        self.touch();
    }

    /// Invoke the bookmark at `location` in the current tab.
    pub fn activate(&mut self, location: EntryLocation) {
        self.emit_activation(location, false);
    }

    /// Invoke the bookmark at `location` in a new tab.
    pub fn activate_in_new_tab(&mut self, location: EntryLocation) {
        self.emit_activation(location, true);
    }

    /// Reconcile the toolbar folder onto the embedder's toolbar actions.
    pub fn populate_toolbar(&self, sink: &mut dyn ActionSink) {
        actions::reconcile(&self.tree.toolbar, 0, sink, 0);
    }

    /// Reconcile the "Other Bookmarks" folder onto a menu's actions,
    /// skipping the menu's own fixed entries before `first_action`.
    pub fn populate_menu(&self, sink: &mut dyn ActionSink, first_action: usize) {
        actions::reconcile(&self.tree.other, 1, sink, first_action);
    }

    /// Persist the tree if it has unsaved changes, creating the config
    /// directory when needed. A directory that cannot be created aborts this
    /// save with a warning; the store keeps running unsaved. A successful
    /// write clears the dirty flag.
    pub fn write(&mut self) -> Result<()> {
        if !self.modified {
            return Ok(());
        }
        if let Err(err) = std::fs::create_dir_all(&self.config_dir) {
            warn!(
                "Cannot create {:?}, bookmarks not saved: {}",
                self.config_dir, err
            );
            return Ok(());
        }
        let rows = format::serialize(&self.tree, &self.config_dir);
        let json = format::to_json(&rows).context("Failed to serialize bookmarks")?;
        let path = self.config_dir.join(BOOKMARK_FILE);
        info!("Writing {:?}...", path);
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write bookmarks file: {:?}", path))?;
        self.modified = false;
        Ok(())
    }

    fn touch(&mut self) {
        self.modified = true;
        self.observers.emit(&StoreEvent::Changed);
    }

    fn emit_activation(&mut self, location: EntryLocation, new_tab: bool) {
        let Some(url) = self.tree.bookmark(location).map(|b| b.url.clone()) else {
            return;
        };
        self.observers.emit(&StoreEvent::BookmarkActivated {
            url,
            location,
            new_tab,
        });
    }
}

fn read_tree(path: &Path) -> Result<BookmarkTree> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookmarks file: {:?}", path))?;
    let tree = format::parse(&content)
        .with_context(|| format!("Failed to parse bookmarks file: {:?}", path))?;
    Ok(tree)
}

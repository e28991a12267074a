//! Toolbar/menu action reconciliation
//!
//! The embedding shell owns the real action objects (toolbar buttons, menu
//! items). The store maps a folder's entries onto that list positionally:
//! existing slots are rewritten in place, new slots are appended for entries
//! beyond the current count, and surplus slots are hidden rather than
//! removed so the toolkit objects survive the next change.

use crate::icon::Icon;
use crate::model::{EntryLocation, Folder};

/// Everything an action slot needs to present one bookmark. Attached to the
/// slot as a typed payload so activation does not have to look the bookmark
/// up by sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionContent {
    /// Truncated label, see [`short_title`].
    pub short_title: String,
    /// Full title, shown as the tooltip.
    pub full_title: String,
    pub url: String,
    pub icon: Option<Icon>,
    pub location: EntryLocation,
}

/// An ordered list of externally-owned action slots.
pub trait ActionSink {
    /// Number of slots currently in the list, visible or hidden.
    fn action_count(&self) -> usize;

    /// Full title currently stored on a slot. Used to skip rewriting slots
    /// whose bookmark has not changed.
    fn action_full_title(&self, index: usize) -> Option<String>;

    /// Rewrite an existing slot in place and make it visible.
    fn update_action(&mut self, index: usize, content: ActionContent);

    /// Append a new slot at the end of the list.
    fn append_action(&mut self, content: ActionContent);

    /// Hide a surplus slot without removing it.
    fn hide_action(&mut self, index: usize);
}

/// Reconcile `folder`'s entries onto `sink`, starting at slot `first_action`.
pub fn reconcile(
    folder: &Folder,
    folder_index: usize,
    sink: &mut dyn ActionSink,
    first_action: usize,
) {
    let existing = sink.action_count();
    let mut slot = first_action;
    for (row, bookmark) in folder.entries.iter().enumerate() {
        let content = ActionContent {
            short_title: short_title(&bookmark.title).to_string(),
            full_title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            icon: bookmark.icon.clone(),
            location: EntryLocation::new(folder_index, row),
        };
        if slot < existing {
            if sink.action_full_title(slot).as_deref() != Some(bookmark.title.as_str()) {
                sink.update_action(slot, content);
            }
        } else {
            sink.append_action(content);
        }
        slot += 1;
    }
    while slot < existing {
        sink.hide_action(slot);
        slot += 1;
    }
}

/// Short display form of a bookmark title for action labels:
/// cut at the first `" | "`, else at the first `" - "`
/// ("Qt | Cross Platform.." becomes "Qt").
pub fn short_title(title: &str) -> &str {
    match title.find(" | ").or_else(|| title.find(" - ")) {
        Some(cut) => &title[..cut],
        None => title,
    }
}

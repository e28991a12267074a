//! Bookmark store integration tests
//!
//! Exercise the full load -> mutate -> write -> reload cycle against a real
//! temporary config directory, including icon sidecar files.

use linkdock::{icon, Bookmark, BookmarkStore, EntryLocation, Icon, IconImage, StoreEvent};

fn checker_icon(width: u32, height: u32) -> Icon {
    let rgba = (0..width * height)
        .flat_map(|i| {
            if i % 2 == 0 {
                [0x00, 0x00, 0x00, 0xFF]
            } else {
                [0xFF, 0xFF, 0xFF, 0xFF]
            }
        })
        .collect();
    Icon::from_image(IconImage::new(width, height, rgba))
}

#[test]
fn test_first_run_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookmarkStore::load(dir.path());

    let urls: Vec<&str> = store
        .toolbar()
        .entries
        .iter()
        .map(|b| b.url.as_str())
        .collect();
    assert_eq!(
        urls,
        [
            "http://qt.io",
            "https://download.qt.io/snapshots/ci/pyside/",
            "https://doc.qt.io/qtforpython/",
            "https://bugreports.qt.io/projects/PYSIDE/",
            "https://www.python.org/",
            "https://wiki.qt.io/PySide6",
        ]
    );
    assert!(store.toolbar().entries[4].icon.is_none());
    assert!(store.other().entries.is_empty());
}

#[test]
fn test_add_write_reload_scenario() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    store.add_bookmark("https://crates.io/", "Crates", None);
    store.write().unwrap();

    let reloaded = BookmarkStore::load(dir.path());
    assert_eq!(reloaded.other().entries.len(), 1);
    assert_eq!(reloaded.other().entries[0].url, "https://crates.io/");
    assert_eq!(reloaded.other().entries[0].title, "Crates");
    assert!(!reloaded.is_modified());
}

#[test]
fn test_round_trip_preserves_titles_and_order() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    store.add_toolbar_bookmark("https://z.example", "Z | last added", None);
    store.add_bookmark("https://m.example", "M", None);
    store.add_bookmark("https://a.example", "A", None);
    store.write().unwrap();

    let reloaded = BookmarkStore::load(dir.path());
    assert_eq!(reloaded.tree(), store.tree());
    let other: Vec<&str> = reloaded
        .other()
        .entries
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(other, ["M", "A"]);
}

#[test]
fn test_icon_sidecar_written_and_reloaded() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    let icon = checker_icon(16, 16);
    store.add_bookmark("https://example.org", "Example", Some(icon.clone()));
    store.write().unwrap();

    // Other Bookmarks is folder 1 and the new entry is its row 0.
    let sidecar = dir.path().join(icon::sidecar_file_name(1, 0, 16));
    assert!(sidecar.exists());

    let reloaded = BookmarkStore::load(dir.path());
    let entry = &reloaded.other().entries[0];
    assert_eq!(entry.icon.as_ref().unwrap().largest(), icon.largest());
}

#[test]
fn test_missing_icon_file_degrades_to_no_icon() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"[
        ["Tool Bar"],
        ["http://qt.io", "Qt", "/nonexistent/icon00_00_64.png"],
        ["Other Bookmarks"]
    ]"#;
    std::fs::write(dir.path().join("bookmarks.json"), json).unwrap();

    let store = BookmarkStore::load(dir.path());
    assert_eq!(store.toolbar().entries.len(), 1);
    assert!(store.toolbar().entries[0].icon.is_none());
}

#[test]
fn test_remove_then_write_persists_removal() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    store.add_bookmark("https://one.example", "One", None);
    store.add_bookmark("https://two.example", "Two", None);
    store.write().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    assert!(store.remove_bookmark(EntryLocation::new(1, 0), |_| true));
    store.write().unwrap();

    let reloaded = BookmarkStore::load(dir.path());
    assert_eq!(reloaded.other().entries.len(), 1);
    assert_eq!(reloaded.other().entries[0].title, "Two");
}

#[test]
fn test_insert_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = BookmarkStore::load(dir.path());
    store.add_bookmark("https://b.example", "B", None);
    store.insert_bookmark(
        EntryLocation::new(1, 0),
        Bookmark::new("https://a.example", "A", None),
    );
    store.write().unwrap();

    let reloaded = BookmarkStore::load(dir.path());
    let titles: Vec<&str> = reloaded
        .other()
        .entries
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, ["A", "B"]);
}

#[test]
fn test_change_events_fire_for_every_mutation_kind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = BookmarkStore::load(dir.path());

    let changes = std::rc::Rc::new(std::cell::RefCell::new(0u32));
    {
        let changes = std::rc::Rc::clone(&changes);
        store.subscribe(Box::new(move |event| {
            if matches!(event, StoreEvent::Changed) {
                *changes.borrow_mut() += 1;
            }
        }));
    }

    store.add_bookmark("https://a.example", "A", None);
    store.add_toolbar_bookmark("https://b.example", "B", None);
    store.insert_bookmark(
        EntryLocation::new(1, 0),
        Bookmark::new("https://c.example", "C", None),
    );
    store.rename_bookmark(EntryLocation::new(1, 0), "C2");
    store.remove_bookmark(EntryLocation::new(1, 0), |_| true);

    assert_eq!(*changes.borrow(), 5);
}

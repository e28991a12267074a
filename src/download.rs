//! Download progress presentation model
//!
//! The web engine owns the transfer itself; this model turns its byte
//! counts and state changes into the strings a status-bar progress widget
//! shows. Embedders may also persist in-flight download metadata across
//! sessions, so the types serialize.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lifecycle of a single download, as reported by the web engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadState {
    #[default]
    Requested,
    InProgress,
    Completed,
    Cancelled,
    Interrupted,
}

impl DownloadState {
    fn suffix(self) -> &'static str {
        match self {
            DownloadState::Requested => "(requested)",
            DownloadState::InProgress => "(downloading)",
            DownloadState::Completed => "(completed)",
            DownloadState::Cancelled => "(cancelled)",
            DownloadState::Interrupted => "(interrupted)",
        }
    }
}

/// Progress of one download.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Source URL.
    pub url: String,
    /// Destination file.
    pub path: PathBuf,
    pub state: DownloadState,
    pub bytes_received: u64,
    pub bytes_total: u64,
}

impl DownloadProgress {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Record a progress report from the engine.
    pub fn update(&mut self, bytes_received: u64, bytes_total: u64) {
        self.bytes_received = bytes_received;
        self.bytes_total = bytes_total;
        self.state = DownloadState::InProgress;
    }

    /// Percentage complete, clamped to 0..=100. Unknown totals read as 0.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 0;
        }
        // Widen so 100 * received cannot overflow for huge transfers.
        let percent = 100 * u128::from(self.bytes_received) / u128::from(self.bytes_total);
        percent.min(100) as u8
    }

    /// Progress-bar label, e.g. `PySide6-5....x86_64.whl 42%`.
    pub fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        format!("{} {}%", elide_file_name(name), self.percent())
    }

    /// Multi-line status text: URL, destination, size and state.
    pub fn status_text(&self) -> String {
        let mut text = format!("{}\n{}", self.url, self.path.display());
        if self.bytes_total > 0 {
            text.push_str(&format!("\n{}K", self.bytes_total / 1024));
        }
        text.push('\n');
        text.push_str(self.state.suffix());
        text
    }

    /// Directory the finished file lands in, for "Show in Folder".
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// Long archive names do not fit a status-bar slot. Over 30 characters, keep
/// the first and last ten: `PySide6-5.11.0a1-...-linux_x86_64.whl` becomes
/// `PySide6-5....x86_64.whl`.
pub fn elide_file_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 30 {
        return name.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elide_file_name() {
        assert_eq!(elide_file_name("short.whl"), "short.whl");
        assert_eq!(
            elide_file_name("PySide6-5.11.0a1-5.11.0-cp36-cp36m-linux_x86_64.whl"),
            "PySide6-5....x86_64.whl"
        );
    }

    #[test]
    fn test_percent() {
        let mut progress = DownloadProgress::new("https://example.org/f", "/tmp/f");
        assert_eq!(progress.percent(), 0);
        progress.update(50, 200);
        assert_eq!(progress.percent(), 25);
        progress.update(200, 200);
        assert_eq!(progress.percent(), 100);
        // Engine may report more than the advertised total.
        progress.update(400, 200);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_percent_does_not_overflow_on_huge_transfers() {
        let mut progress = DownloadProgress::new("https://example.org/f", "/tmp/f");
        progress.update(u64::MAX, u64::MAX);
        assert_eq!(progress.percent(), 100);
        progress.update(u64::MAX / 2, u64::MAX);
        assert_eq!(progress.percent(), 49);
    }

    #[test]
    fn test_status_text() {
        let mut progress = DownloadProgress::new("https://example.org/f.whl", "/tmp/f.whl");
        progress.update(1024, 4096);
        progress.state = DownloadState::Completed;
        assert_eq!(
            progress.status_text(),
            "https://example.org/f.whl\n/tmp/f.whl\n4K\n(completed)"
        );
    }

    #[test]
    fn test_label_uses_file_name() {
        let mut progress = DownloadProgress::new("https://example.org/f.whl", "/tmp/f.whl");
        progress.update(1, 2);
        assert_eq!(progress.label(), "f.whl 50%");
    }
}

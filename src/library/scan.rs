use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlayerError;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Enumerate the playable files under `dir`, ordered by file name (case-insensitive).
///
/// Fails with `MissingDirectory` when `dir` is not a directory and with
/// `EmptyQueue` when nothing matched the configured extensions.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, PlayerError> {
    if !dir.is_dir() {
        return Err(PlayerError::MissingDirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            tracks.push(Track::new(path.to_path_buf()));
        }
    }

    if tracks.is_empty() {
        return Err(PlayerError::EmptyQueue);
    }

    tracks.sort_by_cached_key(|t| {
        t.path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    debug!(dir = %dir.display(), count = tracks.len(), "scanned music directory");
    Ok(tracks)
}

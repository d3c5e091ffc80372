//! Turning user-supplied paths into staged uploads.
//!
//! Plain files are taken as-is (the decoder decides later whether they
//! play). Directories are walked and filtered by the `library` settings.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Upload;

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

/// Walk `dir` and return the audio files in it, sorted by file name (case-insensitive).
pub fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
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

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
        })
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    files
}

/// Expand `paths` into uploads, in argument order.
///
/// Missing paths are skipped with a warning.
pub fn collect_uploads(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<Upload> {
    let mut uploads = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = scan_dir(path, settings);
            debug!("staging {} files from {}", found.len(), path.display());
            uploads.extend(found.into_iter().map(Upload::from_path));
        } else if path.is_file() {
            uploads.push(Upload::from_path(path.clone()));
        } else {
            warn!("skipping {}: no such file or directory", path.display());
        }
    }
    uploads
}

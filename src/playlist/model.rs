use std::path::{Path, PathBuf};

/// Artist shown for every entry; tags are never read.
pub const UNKNOWN_ARTIST: &str = "Unknown";
/// Duration label shown for every entry until real probing exists.
pub const PLACEHOLDER_DURATION_LABEL: &str = "3:30";

/// Opaque reference to an uploaded audio file.
///
/// Nothing is opened or decoded here; the sink materializes it lazily
/// through a `MediaUrl` when the track is loaded.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    path: PathBuf,
}

impl ResourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A file delivered by the upload source, not yet part of the playlist.
#[derive(Debug)]
pub struct Upload {
    pub name: String,
    pub handle: ResourceHandle,
}

impl Upload {
    /// Build an upload for `path`, naming it after the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            handle: ResourceHandle::new(path),
        }
    }
}

/// A playlist entry. Immutable once appended.
#[derive(Debug)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub duration_label: String,
    resource: ResourceHandle,
}

impl Track {
    pub fn from_upload(upload: Upload) -> Self {
        Self {
            name: upload.name,
            artist: UNKNOWN_ARTIST.to_string(),
            duration_label: PLACEHOLDER_DURATION_LABEL.to_string(),
            resource: upload.handle,
        }
    }

    pub fn resource(&self) -> &ResourceHandle {
        &self.resource
    }
}

//! Materialized resource URLs.
//!
//! A `MediaUrl` is what the sink loads. Each one is a tracked acquisition
//! in `ObjectUrls` and must be revoked once it is superseded.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::playlist::ResourceHandle;

#[derive(Debug, PartialEq, Eq)]
pub struct MediaUrl {
    id: u64,
    path: PathBuf,
}

impl MediaUrl {
    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:cadenza/{}", self.id)
    }
}

/// Registry of live URLs.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next_id: u64,
    live: HashSet<u64>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, handle: &ResourceHandle) -> MediaUrl {
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(id);
        MediaUrl {
            id,
            path: handle.path().to_path_buf(),
        }
    }

    /// Release `url`. Returns false if it was not live.
    pub fn revoke(&mut self, url: MediaUrl) -> bool {
        self.live.remove(&url.id)
    }

    #[cfg(test)]
    pub fn is_live(&self, url: &MediaUrl) -> bool {
        self.live.contains(&url.id)
    }

    /// Number of URLs created and not yet revoked.
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

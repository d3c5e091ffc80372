use super::model::Track;

/// Ordered track collection. Insertion order is playback order.
#[derive(Debug, Default)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` and return its index. Indices of existing entries never move on append.
    pub fn append(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

//! Observable session state.

/// Volume the widget starts at when nothing else is configured.
pub const DEFAULT_VOLUME: u8 = 30;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// Nothing loaded.
    #[default]
    Empty,
    Paused,
    Playing,
}

/// What `skip_previous` does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PreviousMode {
    /// Restart the current track; never moves to another entry.
    #[default]
    Restart,
    /// Step back one entry, restarting when already on the first.
    Navigate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Playlist index of the loaded track.
    pub current_index: Option<usize>,
    pub is_playing: bool,
    /// Seconds.
    pub position: f64,
    /// Seconds; 0 until the sink reports it.
    pub duration: f64,
    /// Percent, `0..=100`.
    pub volume: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_index: None,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl SessionState {
    pub fn transport(&self) -> Transport {
        match (self.current_index, self.is_playing) {
            (None, _) => Transport::Empty,
            (Some(_), true) => Transport::Playing,
            (Some(_), false) => Transport::Paused,
        }
    }
}

/// Display fields of one playlist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub name: String,
    pub artist: String,
    pub duration_label: String,
}

/// Read-only projection handed to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub playlist: Vec<PlaylistEntry>,
}

impl SessionSnapshot {
    /// The entry currently loaded, if any.
    pub fn now_playing(&self) -> Option<&PlaylistEntry> {
        self.state
            .current_index
            .and_then(|i| self.playlist.get(i))
    }
}

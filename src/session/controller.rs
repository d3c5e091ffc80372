use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info, warn};

use crate::playlist::{PlaylistStore, Track, Upload};
use crate::sink::{Generation, MediaSink, MediaUrl, ObjectUrls, SinkEvent, SinkEventKind};

use super::error::PlayerError;
use super::state::{
    DEFAULT_VOLUME, PlaylistEntry, PreviousMode, SessionSnapshot, SessionState,
};

/// Construction-time knobs for a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Percent, clamped to `0..=100`.
    pub initial_volume: u8,
    pub previous_mode: PreviousMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_volume: DEFAULT_VOLUME,
            previous_mode: PreviousMode::Restart,
        }
    }
}

/// Owns the playlist, the sink and the session state.
///
/// The sink's event stream is subscribed in `new` and released on drop,
/// together with the loaded resource and its URL.
pub struct SessionController<S: MediaSink> {
    sink: S,
    events: Option<Receiver<SinkEvent>>,
    playlist: PlaylistStore,
    urls: ObjectUrls,
    current_url: Option<MediaUrl>,
    generation: Generation,
    /// Most recent upload; what a first play starts with.
    pending_selection: Option<usize>,
    /// Position/duration still show the previous track until the new duration arrives.
    holding_display: bool,
    previous_mode: PreviousMode,
    state: SessionState,
    watchers: Vec<Sender<SessionSnapshot>>,
}

impl<S: MediaSink> SessionController<S> {
    pub fn new(mut sink: S, options: SessionOptions) -> Self {
        let events = sink.subscribe();
        let volume = options.initial_volume.min(100);
        sink.set_volume(normalized(volume));

        Self {
            sink,
            events: Some(events),
            playlist: PlaylistStore::new(),
            urls: ObjectUrls::new(),
            current_url: None,
            generation: 0,
            pending_selection: None,
            holding_display: false,
            previous_mode: options.previous_mode,
            state: SessionState {
                volume,
                ..SessionState::default()
            },
            watchers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[cfg(test)]
    pub fn pending_selection(&self) -> Option<usize> {
        self.pending_selection
    }

    /// Number of materialized URLs not yet released.
    #[cfg(test)]
    pub fn live_urls(&self) -> usize {
        self.urls.live()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            playlist: self
                .playlist
                .iter()
                .map(|t| PlaylistEntry {
                    name: t.name.clone(),
                    artist: t.artist.clone(),
                    duration_label: t.duration_label.clone(),
                })
                .collect(),
        }
    }

    /// Subscribe to state changes. The current snapshot is delivered first.
    pub fn watch(&mut self) -> Receiver<SessionSnapshot> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.snapshot());
        self.watchers.push(tx);
        rx
    }

    fn publish(&mut self) {
        if self.watchers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.watchers.retain(|w| w.send(snapshot.clone()).is_ok());
    }

    /// Index of the loaded track, re-validated against the playlist.
    fn loaded_index(&self) -> Option<usize> {
        self.current_url.as_ref()?;
        self.state
            .current_index
            .filter(|&i| i < self.playlist.len())
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0.0;
        }
        if self.state.duration > 0.0 {
            seconds.min(self.state.duration)
        } else {
            seconds
        }
    }

    /// Append an uploaded file and make it the pending selection.
    pub fn stage_upload(&mut self, upload: Upload) -> usize {
        let index = self.playlist.append(Track::from_upload(upload));
        self.pending_selection = Some(index);
        info!(
            "staged upload #{index}: {}",
            self.playlist.get(index).map(|t| t.name.as_str()).unwrap_or("?")
        );
        self.publish();
        index
    }

    /// Remove a playlist entry. Removing the loaded track unloads it.
    pub fn remove_track(&mut self, index: usize) -> Result<Track, PlayerError> {
        let len = self.playlist.len();
        let track = self
            .playlist
            .remove(index)
            .ok_or(PlayerError::IndexOutOfRange { index, len })?;

        match self.state.current_index {
            Some(current) if current == index => {
                self.sink.unload();
                if let Some(url) = self.current_url.take() {
                    self.urls.revoke(url);
                }
                // Anything still in flight for the removed track is stale now.
                self.generation += 1;
                self.holding_display = false;
                self.state = SessionState {
                    volume: self.state.volume,
                    ..SessionState::default()
                };
            }
            Some(current) if current > index => {
                self.state.current_index = Some(current - 1);
            }
            _ => {}
        }
        self.pending_selection = match self.pending_selection {
            Some(p) if p == index => None,
            Some(p) if p > index => Some(p - 1),
            other => other,
        };

        info!("removed #{index}: {}", track.name);
        self.publish();
        Ok(track)
    }

    /// Load the track at `index` and start playing it from the beginning.
    pub fn load_and_play(&mut self, index: usize) -> Result<(), PlayerError> {
        self.load_index(index, true)?;
        self.publish();
        Ok(())
    }

    fn load_index(&mut self, index: usize, reset_display: bool) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::IndexOutOfRange { index, len })?;
        let url = self.urls.create(track.resource());
        let generation = self.generation + 1;

        if let Err(e) = self.sink.load(&url, generation) {
            warn!("could not load {url}: {e}");
            self.urls.revoke(url);
            return Err(e.into());
        }

        debug!("track #{index} loaded as {url}, generation {generation}");
        if let Some(previous) = self.current_url.replace(url) {
            self.urls.revoke(previous);
        }
        self.generation = generation;
        self.sink.play();

        self.state.current_index = Some(index);
        self.state.is_playing = true;
        if reset_display {
            self.state.position = 0.0;
            self.state.duration = 0.0;
            self.holding_display = false;
        } else {
            self.holding_display = true;
        }
        Ok(())
    }

    /// Move to the next entry without clearing the seek bar.
    fn advance_from(&mut self, current: usize) -> Result<(), PlayerError> {
        self.load_index(current + 1, false)
    }

    fn has_next(&self, current: usize) -> bool {
        current + 1 < self.playlist.len()
    }

    /// Play/pause. With nothing loaded yet, starts the most recent upload.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        if self.loaded_index().is_none() {
            let index = self
                .pending_selection
                .filter(|&i| i < self.playlist.len())
                .ok_or(PlayerError::NoResourceSelected)?;
            return self.load_and_play(index);
        }

        if self.sink.is_paused() {
            self.sink.play();
        } else {
            self.sink.pause();
        }
        self.state.is_playing = !self.sink.is_paused();
        self.publish();
        Ok(())
    }

    /// Jump to `target_seconds`, clamped into `0..=duration`.
    pub fn seek(&mut self, target_seconds: f64) -> Result<(), PlayerError> {
        self.loaded_index().ok_or(PlayerError::NoResourceSelected)?;

        let position = self.clamp_position(target_seconds);
        self.sink.set_position(position);
        self.state.position = position;
        self.state.is_playing = !self.sink.is_paused();
        self.holding_display = false;
        self.publish();
        Ok(())
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_seconds: f64) -> Result<(), PlayerError> {
        self.seek(self.state.position + delta_seconds)
    }

    /// Set the volume in percent, clamped to `0..=100`. Returns the stored value.
    pub fn set_volume(&mut self, percent: i64) -> u8 {
        let volume = percent.clamp(0, 100) as u8;
        self.sink.set_volume(normalized(volume));
        self.state.volume = volume;
        self.publish();
        volume
    }

    pub fn adjust_volume(&mut self, delta: i64) -> u8 {
        self.set_volume(i64::from(self.state.volume) + delta)
    }

    /// Next entry if there is one; otherwise keep playing the current track where it is.
    pub fn skip_next(&mut self) -> Result<(), PlayerError> {
        let current = self.loaded_index().ok_or(PlayerError::NoResourceSelected)?;

        if self.has_next(current) {
            self.advance_from(current)?;
        } else {
            self.sink.play();
            self.state.is_playing = !self.sink.is_paused();
        }
        self.publish();
        Ok(())
    }

    /// Restart the current track (or step back, with `PreviousMode::Navigate`).
    pub fn skip_previous(&mut self) -> Result<(), PlayerError> {
        let current = self.loaded_index().ok_or(PlayerError::NoResourceSelected)?;

        if self.previous_mode == PreviousMode::Navigate && current > 0 {
            return self.load_and_play(current - 1);
        }

        self.sink.set_position(0.0);
        self.sink.play();
        self.state.position = 0.0;
        self.holding_display = false;
        self.state.is_playing = !self.sink.is_paused();
        self.publish();
        Ok(())
    }

    pub fn on_sink_position_update(&mut self, seconds: f64) {
        if self.holding_display {
            // The new resource started without reporting its length.
            self.state.duration = 0.0;
            self.holding_display = false;
        }
        self.state.position = self.clamp_position(seconds);
        self.publish();
    }

    pub fn on_sink_duration_known(&mut self, seconds: f64) {
        self.state.duration = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        if self.holding_display {
            self.state.position = 0.0;
            self.holding_display = false;
        }
        self.state.position = self.clamp_position(self.state.position);
        self.publish();
    }

    /// The loaded track finished: advance, or stop at the end of the playlist.
    pub fn on_sink_ended(&mut self) -> Result<(), PlayerError> {
        let next = self.loaded_index().filter(|&i| self.has_next(i));

        let result = match next {
            Some(current) => self.advance_from(current),
            None => {
                debug!("end of playlist");
                Ok(())
            }
        };
        if next.is_none() || result.is_err() {
            self.state.is_playing = false;
        }
        self.publish();
        result
    }

    /// Dispatch one sink event, dropping it if it belongs to an older load.
    pub fn handle_event(&mut self, event: SinkEvent) -> Result<(), PlayerError> {
        if self.current_url.is_none() || event.generation != self.generation {
            debug!(
                "dropping stale {:?} (generation {}, current {})",
                event.kind, event.generation, self.generation
            );
            return Ok(());
        }

        match event.kind {
            SinkEventKind::Position(secs) => self.on_sink_position_update(secs),
            SinkEventKind::DurationKnown(secs) => self.on_sink_duration_known(secs),
            SinkEventKind::Ended => self.on_sink_ended()?,
        }
        Ok(())
    }

    /// Handle every queued sink event, in order. Returns how many were processed.
    ///
    /// Stops at the first error; the remaining events stay queued.
    pub fn pump_events(&mut self) -> Result<usize, PlayerError> {
        let mut handled = 0;
        loop {
            let event = match self.events.as_ref().map(Receiver::try_recv) {
                Some(Ok(event)) => event,
                _ => break,
            };
            self.handle_event(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Scale the sink volume by `gain` (`0.0..=1.0`). The stored volume is untouched.
    pub fn set_output_gain(&mut self, gain: f32) {
        self.sink
            .set_volume(normalized(self.state.volume) * gain.clamp(0.0, 1.0));
    }
}

impl<S: MediaSink> Drop for SessionController<S> {
    fn drop(&mut self) {
        self.sink.unsubscribe();
        self.events = None;
        self.sink.unload();
        if let Some(url) = self.current_url.take() {
            self.urls.revoke(url);
        }
        if self.urls.live() > 0 {
            warn!("{} media urls still live at teardown", self.urls.live());
        }
    }
}

fn normalized(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

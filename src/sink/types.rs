//! Sink contract: commands, events and load errors.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use thiserror::Error;

use super::url::MediaUrl;

/// Monotonic tag attached to every load. Events carry the tag of the load
/// they belong to.
pub type Generation = u64;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SinkEventKind {
    /// Current playback position, in seconds.
    Position(f64),
    /// Total length of the loaded resource, in seconds.
    DurationKnown(f64),
    /// The loaded resource played to its end.
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SinkEvent {
    pub generation: Generation,
    pub kind: SinkEventKind,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output is unavailable")]
    OutputUnavailable,
}

/// A single-resource media player.
///
/// `load` replaces whatever was loaded and leaves it paused at the start;
/// on failure the previous resource stays loaded. Once a resource ends the
/// sink reports itself paused, and `play` starts it over.
pub trait MediaSink {
    /// Open the event stream. A new subscription replaces the previous one.
    fn subscribe(&mut self) -> Receiver<SinkEvent>;
    /// Close the event stream; no events are sent afterwards.
    fn unsubscribe(&mut self);
    fn load(&mut self, url: &MediaUrl, generation: Generation) -> Result<(), LoadError>;
    /// Drop the loaded resource, if any.
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    /// True when nothing is loaded, when paused, and after the resource ended.
    fn is_paused(&self) -> bool;
    fn set_position(&mut self, seconds: f64);
    /// Volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
}

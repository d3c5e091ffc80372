//! Media sink: the playback primitive the session drives.
//!
//! `MediaSink` is the seam between the session controller and whatever
//! actually decodes audio. `RodioSink` is the real implementation; tests
//! provide their own.

mod rodio_sink;
mod source;
mod types;
mod url;

pub use rodio_sink::RodioSink;
pub use types::*;
pub use url::*;

#[cfg(test)]
mod tests;

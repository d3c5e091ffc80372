//! Helpers for turning a file into a `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use super::types::LoadError;

/// Create a paused `Sink` for the file at `path`, starting at `start_at`.
///
/// Also returns the decoder's idea of the total length, when it has one.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(mixer);
    // `skip_duration` is the seek fallback; Duration::ZERO is a no-op.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}

/// Read the stream length from the container header.
///
/// Many MP3s don't report a length through the decoder, but their headers do.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

//! `MediaSink` backed by `rodio`.
//!
//! The output stream lives with the caller; a ticker thread watches the
//! active `rodio::Sink` and reports position and end-of-track through
//! the subscribed channel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};

use crate::config::AudioSettings;

use super::source::{create_sink_at, probe_duration};
use super::types::{Generation, LoadError, MediaSink, SinkEvent, SinkEventKind};
use super::url::MediaUrl;

/// State shared with the ticker thread.
struct Shared {
    sink: Option<Sink>,
    path: Option<PathBuf>,
    generation: Generation,
    ended: bool,
    volume: f32,
    events: Option<Sender<SinkEvent>>,
}

impl Shared {
    fn emit(&self, kind: SinkEventKind) {
        if let Some(tx) = &self.events {
            let _ = tx.send(SinkEvent {
                generation: self.generation,
                kind,
            });
        }
    }
}

pub struct RodioSink {
    stream: OutputStream,
    shared: Arc<Mutex<Shared>>,
    shutdown: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl RodioSink {
    /// Open the default output device and start the position ticker.
    pub fn open(settings: &AudioSettings) -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        let shared = Arc::new(Mutex::new(Shared {
            sink: None,
            path: None,
            generation: 0,
            ended: false,
            volume: 1.0,
            events: None,
        }));
        let shutdown = Arc::new(AtomicBool::new(false));
        let ticker = spawn_ticker(
            shared.clone(),
            shutdown.clone(),
            Duration::from_millis(settings.position_interval_ms.max(1)),
        );

        Ok(Self {
            stream,
            shared,
            shutdown,
            ticker: Some(ticker),
        })
    }

    /// Rebuild the active sink from the file, starting at `start_at`.
    fn rebuild_at(&self, shared: &mut Shared, start_at: Duration, paused: bool) {
        let Some(path) = shared.path.clone() else {
            return;
        };
        match create_sink_at(self.stream.mixer(), &path, start_at) {
            Ok((sink, _)) => {
                sink.set_volume(shared.volume);
                if !paused {
                    sink.play();
                }
                if let Some(old) = shared.sink.replace(sink) {
                    old.stop();
                }
                shared.ended = false;
            }
            Err(e) => warn!("seek rebuild failed: {e}"),
        }
    }
}

fn spawn_ticker(
    shared: Arc<Mutex<Shared>>,
    shutdown: Arc<AtomicBool>,
    interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            thread::sleep(interval);
            let Ok(mut s) = shared.lock() else {
                break;
            };
            if s.ended {
                continue;
            }
            let (position, drained) = match s.sink.as_ref() {
                Some(sink) if !sink.is_paused() => (sink.get_pos(), sink.empty()),
                _ => continue,
            };
            s.emit(SinkEventKind::Position(position.as_secs_f64()));
            if drained {
                s.ended = true;
                if let Some(sink) = s.sink.as_ref() {
                    sink.pause();
                }
                s.emit(SinkEventKind::Ended);
            }
        }
    })
}

impl MediaSink for RodioSink {
    fn subscribe(&mut self) -> Receiver<SinkEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut s) = self.shared.lock() {
            s.events = Some(tx);
        }
        rx
    }

    fn unsubscribe(&mut self) {
        if let Ok(mut s) = self.shared.lock() {
            s.events = None;
        }
    }

    fn load(&mut self, url: &MediaUrl, generation: Generation) -> Result<(), LoadError> {
        let (sink, total) = create_sink_at(self.stream.mixer(), url.path(), Duration::ZERO)?;
        let duration = total
            .filter(|d| !d.is_zero())
            .or_else(|| probe_duration(url.path()));

        let Ok(mut s) = self.shared.lock() else {
            sink.stop();
            return Err(LoadError::OutputUnavailable);
        };
        sink.set_volume(s.volume);
        if let Some(old) = s.sink.replace(sink) {
            old.stop();
        }
        s.path = Some(url.path().to_path_buf());
        s.generation = generation;
        s.ended = false;
        debug!("loaded {url} ({}) as generation {generation}", url.path().display());
        if let Some(d) = duration {
            s.emit(SinkEventKind::DurationKnown(d.as_secs_f64()));
        }
        Ok(())
    }

    fn unload(&mut self) {
        if let Ok(mut s) = self.shared.lock() {
            if let Some(old) = s.sink.take() {
                old.stop();
            }
            s.path = None;
            s.ended = false;
        }
    }

    fn play(&mut self) {
        let Ok(mut s) = self.shared.lock() else {
            return;
        };
        if s.ended {
            // Playing a finished resource starts it over.
            self.rebuild_at(&mut s, Duration::ZERO, false);
        } else if let Some(sink) = s.sink.as_ref() {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Ok(s) = self.shared.lock() {
            if let Some(sink) = s.sink.as_ref() {
                sink.pause();
            }
        }
    }

    fn is_paused(&self) -> bool {
        self.shared
            .lock()
            .ok()
            .and_then(|s| s.sink.as_ref().map(Sink::is_paused))
            .unwrap_or(true)
    }

    fn set_position(&mut self, seconds: f64) {
        let target = Duration::from_secs_f64(seconds.max(0.0));
        let Ok(mut s) = self.shared.lock() else {
            return;
        };
        let Some(sink) = s.sink.as_ref() else {
            return;
        };
        let paused = sink.is_paused();
        if s.ended {
            self.rebuild_at(&mut s, target, true);
            return;
        }
        if sink.empty() {
            // Drained but not yet reported as ended; keep the transport as is.
            self.rebuild_at(&mut s, target, paused);
            return;
        }
        if let Err(e) = sink.try_seek(target) {
            debug!("try_seek failed ({e}), rebuilding sink");
            self.rebuild_at(&mut s, target, paused);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Ok(mut s) = self.shared.lock() {
            s.volume = volume;
            if let Some(sink) = s.sink.as_ref() {
                sink.set_volume(volume);
            }
        }
    }
}

impl Drop for RodioSink {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(h) = self.ticker.take() {
            let _ = h.join();
        }
        self.unload();
    }
}

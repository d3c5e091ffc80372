use crate::config;
use crate::playlist::Upload;
use crate::session::{PreviousMode, SessionController, SessionOptions};
use crate::sink::MediaSink;

pub fn session_options(settings: &config::Settings) -> SessionOptions {
    SessionOptions {
        initial_volume: settings.playback.initial_volume.min(100),
        previous_mode: match settings.playback.previous_mode {
            config::PreviousModeSetting::Restart => PreviousMode::Restart,
            config::PreviousModeSetting::Navigate => PreviousMode::Navigate,
        },
    }
}

/// Stage every upload in order. Returns how many were staged.
pub fn stage_uploads<S: MediaSink>(session: &mut SessionController<S>, uploads: Vec<Upload>) -> usize {
    let count = uploads.len();
    for upload in uploads {
        session.stage_upload(upload);
    }
    count
}

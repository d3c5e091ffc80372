//! Playback session: the controller that owns what is loaded and playing.
//!
//! `SessionController` is the only mutator of the sink and of
//! `SessionState`. The UI issues commands, pumps sink events and renders
//! from `SessionSnapshot`s.

mod controller;
mod error;
mod format;
mod state;

pub use controller::*;
pub use error::*;
pub use format::*;
pub use state::*;

//! Application module: the UI-side model used by the TUI and runtime.
//!
//! `App` only holds what the widget needs on top of the session snapshot:
//! the playlist cursor, the upload prompt and the status hint.

mod model;

pub use model::*;

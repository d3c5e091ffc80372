//! Application model types: `App` and `InputMode`.

use std::path::PathBuf;

use crate::session::PlayerError;

/// Which keymap is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a path to upload.
    Upload,
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Cursor into the playlist.
    pub selected: usize,
    pub mode: InputMode,
    pub upload_input: String,
    /// One-line message for the user (errors, "nothing to play", ...).
    pub hint: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            (self.selected - 1).min(len - 1)
        };
    }

    /// Keep the cursor inside a playlist of `len` entries.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn enter_upload_mode(&mut self) {
        self.mode = InputMode::Upload;
        self.upload_input.clear();
    }

    pub fn cancel_upload(&mut self) {
        self.mode = InputMode::Normal;
        self.upload_input.clear();
    }

    pub fn push_upload_char(&mut self, c: char) {
        self.upload_input.push(c);
    }

    pub fn pop_upload_char(&mut self) {
        self.upload_input.pop();
    }

    /// Leave upload mode and return the typed path, if any. `~/` expands to `$HOME`.
    pub fn take_upload_path(&mut self) -> Option<PathBuf> {
        self.mode = InputMode::Normal;
        let raw = std::mem::take(&mut self.upload_input);
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return Some(PathBuf::from(home).join(rest));
            }
        }
        Some(PathBuf::from(raw))
    }

    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = Some(hint.into());
    }

    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    /// Turn a command failure into a hint.
    pub fn report(&mut self, err: &PlayerError) {
        let hint = match err {
            PlayerError::NoResourceSelected => "Nothing to play yet: press u to upload a file".to_string(),
            other => other.to_string(),
        };
        self.set_hint(hint);
    }
}

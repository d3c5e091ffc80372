use thiserror::Error;

use crate::sink::LoadError;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("track {index} is out of range (playlist has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Nothing loaded and nothing uploaded yet. Recoverable by the user.
    #[error("nothing to play: upload a file or pick a playlist entry")]
    NoResourceSelected,
}

//! Playlist storage and upload staging.
//!
//! The playlist owns every `Track` (and therefore every resource handle).
//! Everything else refers to entries by index only.

mod model;
mod store;
mod upload;

pub use model::*;
pub use store::*;
pub use upload::*;

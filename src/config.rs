//! Configuration schema and loader.
//!
//! Settings come from `config.toml` and `CADENZA__*` environment
//! variables; every field has a default so the file is optional.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;

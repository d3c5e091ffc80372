//! Logger bootstrap.
//!
//! The terminal belongs to the UI, so records only go to
//! `logging.file`. Without one, logging stays off.

use std::fs::OpenOptions;

use log::LevelFilter;

use crate::config::LoggingSettings;

/// Resolve the effective level: the configured one when a log file is set, `Off` otherwise.
fn effective_level(settings: &LoggingSettings) -> LevelFilter {
    if settings.file.is_none() {
        return LevelFilter::Off;
    }
    settings.level.parse().unwrap_or(LevelFilter::Warn)
}

pub fn init(settings: &LoggingSettings) {
    let mut builder = colog::default_builder();
    let mut level = effective_level(settings);

    if let Some(path) = settings.file.as_deref() {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .write_style(env_logger::WriteStyle::Never);
            }
            Err(e) => {
                eprintln!("cadenza: cannot open log file {}: {e}", path.display());
                level = LevelFilter::Off;
            }
        }
    }

    builder.filter(None, level);
    // A logger may already be installed (tests); that's fine.
    let _ = builder.try_init();
}

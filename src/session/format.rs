//! Time labels shown under the seek bar.

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

/// Format seconds as `m:ss`, e.g. `0:07`, `3:30`, `72:05`.
pub fn format_duration(seconds: f64) -> String {
    let secs = whole_seconds(seconds);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Time left, as `-m:ss`. Never negative.
pub fn format_remaining(position: f64, duration: f64) -> String {
    let left = if position.is_finite() && duration.is_finite() {
        (duration - position).max(0.0)
    } else {
        0.0
    };
    format!("-{}", format_duration(left))
}

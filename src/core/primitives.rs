use chrono::{TimeZone, Utc};

/// Formats an epoch-millisecond instant with a strftime-style pattern, in UTC.
///
/// Out-of-range instants fall back to the raw millisecond value so a bad
/// timestamp still produces a visible label instead of a panic.
#[must_use]
pub fn format_instant(instant_ms: f64, pattern: &str) -> String {
    match Utc.timestamp_millis_opt(instant_ms as i64) {
        chrono::LocalResult::Single(datetime) => datetime.format(pattern).to_string(),
        _ => format!("{instant_ms}"),
    }
}

//! Duration formatting helpers.

/// Format a duration in milliseconds to a human-readable string.
pub fn format_duration(millis: u64) -> String {
    if millis < 1000 {
        return format!("{}ms", millis);
    }
    let secs = millis / 1000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format a video position the way a player shows it: `m:ss`, or `h:mm:ss`.
pub fn format_playback(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

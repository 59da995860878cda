//! Display helpers shared by every consumer of the timer

/// Format a number of seconds as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24; they grow to whatever width the value needs.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Elapsed fraction of the current run, in `[0, 1]`.
///
/// Returns 0 when there is no duration to measure against.
pub fn fill_ratio(total_seconds: u64, remaining_seconds: u64) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    let elapsed = total_seconds.saturating_sub(remaining_seconds);
    (elapsed as f64 / total_seconds as f64).clamp(0.0, 1.0)
}

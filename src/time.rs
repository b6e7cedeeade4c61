/// Format a playback position in seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`.
pub fn format_progress(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{minutes:02}:{secs:02}")
}

/// Reading time as `M:SS` for the live progress display.
pub fn format_reading_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

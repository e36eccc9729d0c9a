//! Second counts rendered for display.
//!
//! Both formats ignore the sign, so an overtime timer renders as the
//! distance past zero.

/// `M:SS`, e.g. `225` renders as `3:45`.
pub fn format_time(seconds: i64) -> String {
    let abs = seconds.unsigned_abs();
    format!("{}:{:02}", abs / 60, abs % 60)
}

/// Japanese minutes and seconds, e.g. `3分45秒`, `45秒`, or `3分`.
pub fn format_time_japanese(seconds: i64) -> String {
    let abs = seconds.unsigned_abs();
    let (mins, secs) = (abs / 60, abs % 60);
    match (mins, secs) {
        (0, secs) => format!("{secs}秒"),
        (mins, 0) => format!("{mins}分"),
        (mins, secs) => format!("{mins}分{secs}秒"),
    }
}

//! Formatting helpers for presenting dashboard metrics.

/// Render a 0.0–1.0 fraction as a whole percent, e.g. `0.82` → `82%`.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_finite() {
        format!("{:.0}%", fraction * 100.0)
    } else {
        "—".to_string()
    }
}

/// Render practice minutes compactly: `45 min`, or `2h 05m` past the hour mark.
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "0 min".to_string();
    }
    if minutes < 60.0 {
        return format!("{minutes:.0} min");
    }
    let hours = (minutes / 60.0).floor() as i64;
    let rem = (minutes - hours as f64 * 60.0).round() as i64;
    format!("{hours}h {rem:02}m")
}

/// Day-count label for streaks.
pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

use time::{macros::format_description, Date};

/// Compact chart/list label for an ISO date string, e.g. `2024-01-03` →
/// `Jan 3`. Datetime strings are truncated at the `T`. Unparseable input
/// falls back to the raw string so a payload quirk never blanks a label.
pub(crate) fn short_date_label(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match Date::parse(date_part, format_description!("[year]-[month]-[day]")) {
        Ok(date) => date
            .format(format_description!("[month repr:short] [day padding:none]"))
            .unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

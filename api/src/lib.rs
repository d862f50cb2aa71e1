//! Server functions bridging the UI to the Phonoscope analytics backend.
//!
//! Each function proxies one backend endpoint and returns the response body
//! as raw JSON. The UI's normalizer layer owns all shape interpretation, so
//! nothing here needs to track backend payload evolution.

use dioxus::prelude::*;
use serde_json::Value;

/// Practice-history windows the backend accepts.
const HISTORY_WINDOWS: [u32; 3] = [7, 30, 90];

/// Overall stats: attempts, sessions, average score, practice time, streaks.
#[server]
pub async fn progress_overview() -> Result<Value, ServerFnError> {
    backend_get("/api/progress/overview").await
}

/// Per-day score history for the last `days` days. Out-of-range values are
/// clamped to the nearest supported window rather than rejected.
#[server]
pub async fn practice_history(days: u32) -> Result<Value, ServerFnError> {
    let days = clamp_window(days);
    backend_get(&format!("/api/progress/history?days={days}")).await
}

/// Per-phoneme mastery stats.
#[server]
pub async fn phoneme_stats() -> Result<Value, ServerFnError> {
    backend_get("/api/phonemes/stats").await
}

fn clamp_window(days: u32) -> u32 {
    HISTORY_WINDOWS
        .into_iter()
        .min_by_key(|window| window.abs_diff(days))
        .unwrap_or(30)
}

#[cfg(feature = "server")]
async fn backend_get(path: &str) -> Result<Value, ServerFnError> {
    let base = std::env::var("PHONOSCOPE_BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let url = format!("{}{path}", base.trim_end_matches('/'));

    tracing::debug!(%url, "fetching analytics payload");

    let response = reqwest::get(&url)
        .await
        .map_err(|err| ServerFnError::new(format!("backend request failed: {err}")))?;

    if !response.status().is_success() {
        return Err(ServerFnError::new(format!(
            "backend returned {} for {path}",
            response.status()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|err| ServerFnError::new(format!("backend sent invalid JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::clamp_window;

    #[test]
    fn supported_windows_pass_through() {
        assert_eq!(clamp_window(7), 7);
        assert_eq!(clamp_window(30), 30);
        assert_eq!(clamp_window(90), 90);
    }

    #[test]
    fn arbitrary_values_snap_to_nearest_window() {
        assert_eq!(clamp_window(0), 7);
        assert_eq!(clamp_window(14), 7);
        assert_eq!(clamp_window(21), 30);
        assert_eq!(clamp_window(60), 90);
        assert_eq!(clamp_window(365), 90);
    }
}

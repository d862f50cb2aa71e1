//! Normalization of analytics payloads into chart-ready records.
//!
//! The three backend payloads (aggregate overview, time-bucketed history,
//! phoneme statistics) arrive in loosely related shapes that have drifted
//! across backend revisions. Everything here is a pure function over
//! `serde_json::Value` with a best-effort contract: malformed or partial
//! input degrades to empty or zero output and never panics. All field
//! access goes through `core::payload`.

use serde::Serialize;
use serde_json::Value;

use crate::core::payload;
use crate::progress::utils::short_date_label;

/// One point of the score-over-time series. `score` is a whole percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub label: String,
    pub score: u32,
    pub attempts: u32,
}

/// Per-phoneme mastery snapshot. `current_score` is a 0.0–1.0 fraction,
/// trusted as delivered by the scoring backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhonemeRecord {
    pub symbol: String,
    pub arpabet_code: String,
    pub current_score: f64,
    pub attempts: u32,
}

impl PhonemeRecord {
    pub fn tier(&self) -> MasteryTier {
        MasteryTier::from_score(self.current_score)
    }

    /// Display name: IPA symbol when present, ARPAbet code otherwise.
    pub fn display_symbol(&self) -> &str {
        if self.symbol.is_empty() {
            &self.arpabet_code
        } else {
            &self.symbol
        }
    }
}

/// Mastery band for a phoneme score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MasteryTier {
    Mastered,
    Proficient,
    Developing,
    NeedsWork,
}

impl MasteryTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Self::Mastered
        } else if score >= 0.70 {
            Self::Proficient
        } else if score >= 0.50 {
            Self::Developing
        } else {
            Self::NeedsWork
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mastered => "Mastered",
            Self::Proficient => "Proficient",
            Self::Developing => "Developing",
            Self::NeedsWork => "Needs work",
        }
    }

    /// CSS modifier class, e.g. `mastery-bar--mastered`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Mastered => "mastery-bar--mastered",
            Self::Proficient => "mastery-bar--proficient",
            Self::Developing => "mastery-bar--developing",
            Self::NeedsWork => "mastery-bar--needs-work",
        }
    }
}

/// Direction of the recent score trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub magnitude_percent: u32,
}

/// One row of the recent-sessions table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub date: String,
    pub score_fraction: f64,
    pub attempts: u32,
    pub duration_minutes: f64,
}

/// Headline numbers from the aggregate overview payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_attempts: u32,
    pub total_sessions: u32,
    pub average_score_fraction: f64,
    pub practice_minutes: f64,
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
}

impl OverviewStats {
    pub fn from_payload(payload: &Value) -> Self {
        let streak = payload.get("streak").unwrap_or(&Value::Null);
        Self {
            total_attempts: payload::count(payload, &["total_attempts"]),
            total_sessions: payload::count(payload, &["total_sessions"]),
            average_score_fraction: payload::num(payload, &["overall_average_score"]),
            practice_minutes: payload::num(payload, &["total_practice_minutes"]),
            current_streak_days: payload::count(streak, &["current_streak"]),
            longest_streak_days: payload::count(streak, &["longest_streak"]),
        }
    }

    pub fn has_activity(&self) -> bool {
        self.total_attempts > 0
    }
}

/// Phoneme records grouped for the mastery panel. `all` is sorted by score
/// ascending; `weak` holds scores below 0.70 and `strong` scores at or
/// above 0.85.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhonemeBuckets {
    pub all: Vec<PhonemeRecord>,
    pub weak: Vec<PhonemeRecord>,
    pub strong: Vec<PhonemeRecord>,
}

const WEAK_CEILING: f64 = 0.70;
const STRONG_FLOOR: f64 = 0.85;

// Synthetic scores for the bare weak/strong code lists, which carry no
// numbers of their own.
const PLACEHOLDER_WEAK_SCORE: f64 = 0.5;
const PLACEHOLDER_STRONG_SCORE: f64 = 0.9;

/// Turn the history payload into a chronological score series. Input is
/// newest-first, so output order is reversed.
pub fn normalize_history(payload: &Value) -> Vec<ScorePoint> {
    payload::items(payload)
        .iter()
        .rev()
        .map(|item| ScorePoint {
            label: short_date_label(payload::text(item, "date")),
            score: (payload::num(item, &["average_score"]) * 100.0).round() as u32,
            attempts: payload::count(item, &["attempts_count", "attempts"]),
        })
        .collect()
}

/// Resolve phoneme records from the first source that yields any, in
/// priority order. Later sources are never merged in.
pub fn normalize_phonemes(phoneme_stats: &Value, aggregate: &Value) -> PhonemeBuckets {
    // Ordered adapter list keeps the precedence rule visible and lets each
    // source be tested on its own.
    let adapters: &[fn(&Value, &Value) -> Vec<PhonemeRecord>] = &[
        phonemes_from_grouped_stats,
        phonemes_from_progress_entries,
        phonemes_from_code_lists,
    ];

    let mut all = adapters
        .iter()
        .map(|adapter| adapter(phoneme_stats, aggregate))
        .find(|records| !records.is_empty())
        .unwrap_or_default();

    all.sort_by(|a, b| {
        a.current_score
            .partial_cmp(&b.current_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let weak = all
        .iter()
        .filter(|record| record.current_score < WEAK_CEILING)
        .cloned()
        .collect();
    let strong = all
        .iter()
        .filter(|record| record.current_score >= STRONG_FLOOR)
        .cloned()
        .collect();

    PhonemeBuckets { all, weak, strong }
}

/// Source (a): `{ by_type: { vowel: [...], consonant: [...] } }` on the
/// phoneme-stats payload, flattened across groups.
fn phonemes_from_grouped_stats(phoneme_stats: &Value, _aggregate: &Value) -> Vec<PhonemeRecord> {
    let Some(groups) = phoneme_stats.get("by_type").and_then(Value::as_object) else {
        return Vec::new();
    };

    groups
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(phoneme_from_entry)
        .collect()
}

/// Source (b): flat `phoneme_progress` list on the aggregate payload. Each
/// entry names its phoneme in one of three shapes: a nested `phoneme`
/// object, a flat `phoneme_code` field, or a bare string.
fn phonemes_from_progress_entries(_phoneme_stats: &Value, aggregate: &Value) -> Vec<PhonemeRecord> {
    let Some(entries) = payload::list_field(aggregate, "phoneme_progress") else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            if let Some(code) = entry.as_str() {
                return wrap_bare_code(code, 0.0);
            }

            let (symbol, code) = if let Some(nested) = entry.get("phoneme") {
                (
                    payload::text(nested, "symbol").to_string(),
                    payload::text(nested, "arpabet_code").to_string(),
                )
            } else {
                (String::new(), payload::text(entry, "phoneme_code").to_string())
            };

            if symbol.is_empty() && code.is_empty() {
                return None;
            }

            Some(PhonemeRecord {
                symbol,
                arpabet_code: code,
                current_score: payload::num(entry, &["current_score", "average_score"]),
                attempts: payload::count(entry, &["attempts", "total_attempts"]),
            })
        })
        .collect()
}

/// Source (c): bare `current_weak_phonemes` / `current_strong_phonemes`
/// identifier lists, wrapped with placeholder scores.
fn phonemes_from_code_lists(_phoneme_stats: &Value, aggregate: &Value) -> Vec<PhonemeRecord> {
    let mut records = Vec::new();

    for (key, score) in [
        ("current_weak_phonemes", PLACEHOLDER_WEAK_SCORE),
        ("current_strong_phonemes", PLACEHOLDER_STRONG_SCORE),
    ] {
        if let Some(codes) = payload::list_field(aggregate, key) {
            records.extend(
                codes
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|code| wrap_bare_code(code, score)),
            );
        }
    }

    records
}

fn wrap_bare_code(code: &str, score: f64) -> Option<PhonemeRecord> {
    if code.is_empty() {
        return None;
    }
    Some(PhonemeRecord {
        symbol: String::new(),
        arpabet_code: code.to_string(),
        current_score: score,
        attempts: 0,
    })
}

fn phoneme_from_entry(entry: &Value) -> Option<PhonemeRecord> {
    let symbol = payload::text(entry, "symbol").to_string();
    let arpabet_code = payload::text(entry, "arpabet_code").to_string();
    if symbol.is_empty() && arpabet_code.is_empty() {
        return None;
    }

    Some(PhonemeRecord {
        symbol,
        arpabet_code,
        current_score: payload::num(entry, &["current_score", "average_score"]),
        attempts: payload::count(entry, &["total_attempts", "attempts"]),
    })
}

/// Recent sessions, newest first, capped at ten rows. Prefers the history
/// payload; falls back to `recent_progress` on the aggregate payload.
pub fn normalize_sessions(history: &Value, aggregate: &Value) -> Vec<SessionRecord> {
    let primary = payload::items(history);
    let entries = if primary.is_empty() {
        payload::list_field(aggregate, "recent_progress").unwrap_or(&[])
    } else {
        primary
    };

    entries
        .iter()
        .take(10)
        .map(|entry| SessionRecord {
            date: payload::text(entry, "date").to_string(),
            score_fraction: payload::num(entry, &["average_score"]),
            attempts: payload::count(entry, &["attempts_count", "attempts"]),
            duration_minutes: payload::num(entry, &["total_practice_minutes", "duration"]),
        })
        .collect()
}

/// Compare the first and last score in the trailing seven-point window of a
/// chronological series. `None` when fewer than two points are available.
pub fn compute_trend(points: &[ScorePoint]) -> Option<Trend> {
    if points.len() < 2 {
        return None;
    }

    let window = &points[points.len().saturating_sub(7)..];
    let first = window.first()?.score as i64;
    let last = window.last()?.score as i64;
    let delta = last - first;

    let direction = match delta.cmp(&0) {
        std::cmp::Ordering::Greater => TrendDirection::Up,
        std::cmp::Ordering::Less => TrendDirection::Down,
        std::cmp::Ordering::Equal => TrendDirection::Flat,
    };

    Some(Trend {
        direction,
        magnitude_percent: delta.unsigned_abs() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_is_reversed_and_scaled_to_percent() {
        let payload = json!({
            "results": [
                { "date": "2024-01-03", "average_score": 0.8, "attempts_count": 5 },
                { "date": "2024-01-01", "average_score": 0.5, "attempts": 3 },
            ]
        });

        let points = normalize_history(&payload);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].score, 50);
        assert_eq!(points[0].attempts, 3);
        assert_eq!(points[1].score, 80);
        assert_eq!(points[1].attempts, 5);
    }

    #[test]
    fn history_tolerates_garbage_payloads() {
        assert!(normalize_history(&Value::Null).is_empty());
        assert!(normalize_history(&json!({})).is_empty());
        assert!(normalize_history(&json!({ "foo": 1 })).is_empty());
    }

    #[test]
    fn history_accepts_bare_arrays() {
        let payload = json!([{ "date": "2024-02-01", "average_score": 1.0 }]);
        let points = normalize_history(&payload);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].score, 100);
        assert_eq!(points[0].attempts, 0);
    }

    #[test]
    fn trend_uses_trailing_seven_point_window() {
        let points: Vec<ScorePoint> = [50, 60, 70, 80, 90, 95, 100, 110]
            .iter()
            .map(|score| ScorePoint {
                label: String::new(),
                score: *score,
                attempts: 1,
            })
            .collect();

        let trend = compute_trend(&points).unwrap();
        // First point (50) falls outside the window; 110 - 60 = 50.
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.magnitude_percent, 50);
    }

    #[test]
    fn trend_needs_at_least_two_points() {
        assert!(compute_trend(&[]).is_none());

        let single = [ScorePoint {
            label: String::new(),
            score: 50,
            attempts: 1,
        }];
        assert!(compute_trend(&single).is_none());
    }

    #[test]
    fn trend_reports_down_and_flat() {
        let mk = |scores: &[u32]| -> Vec<ScorePoint> {
            scores
                .iter()
                .map(|score| ScorePoint {
                    label: String::new(),
                    score: *score,
                    attempts: 0,
                })
                .collect()
        };

        let down = compute_trend(&mk(&[80, 60])).unwrap();
        assert_eq!(down.direction, TrendDirection::Down);
        assert_eq!(down.magnitude_percent, 20);

        let flat = compute_trend(&mk(&[70, 65, 70])).unwrap();
        assert_eq!(flat.direction, TrendDirection::Flat);
        assert_eq!(flat.magnitude_percent, 0);
    }

    #[test]
    fn mastery_tier_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(MasteryTier::from_score(0.85), MasteryTier::Mastered);
        assert_eq!(MasteryTier::from_score(0.849999), MasteryTier::Proficient);
        assert_eq!(MasteryTier::from_score(0.70), MasteryTier::Proficient);
        assert_eq!(MasteryTier::from_score(0.6999), MasteryTier::Developing);
        assert_eq!(MasteryTier::from_score(0.50), MasteryTier::Developing);
        assert_eq!(MasteryTier::from_score(0.49), MasteryTier::NeedsWork);
    }

    #[test]
    fn grouped_stats_win_over_progress_entries() {
        let stats = json!({
            "by_type": {
                "vowel": [
                    { "symbol": "æ", "arpabet_code": "AE", "current_score": 0.62, "total_attempts": 12 }
                ]
            }
        });
        let aggregate = json!({
            "phoneme_progress": [
                { "phoneme_code": "TH", "current_score": 0.4, "attempts": 3 }
            ]
        });

        let buckets = normalize_phonemes(&stats, &aggregate);
        assert_eq!(buckets.all.len(), 1);
        assert_eq!(buckets.all[0].arpabet_code, "AE");
        assert_eq!(buckets.all[0].attempts, 12);
    }

    #[test]
    fn progress_entries_resolve_all_three_identity_shapes() {
        let aggregate = json!({
            "phoneme_progress": [
                { "phoneme": { "symbol": "ð", "arpabet_code": "DH" }, "current_score": 0.55 },
                { "phoneme_code": "TH", "average_score": 0.75, "attempts": 4 },
                "NG",
            ]
        });

        let buckets = normalize_phonemes(&Value::Null, &aggregate);
        assert_eq!(buckets.all.len(), 3);

        let codes: Vec<&str> = buckets
            .all
            .iter()
            .map(|r| r.arpabet_code.as_str())
            .collect();
        assert!(codes.contains(&"DH"));
        assert!(codes.contains(&"TH"));
        assert!(codes.contains(&"NG"));
    }

    #[test]
    fn code_lists_get_placeholder_scores() {
        let aggregate = json!({
            "current_weak_phonemes": ["TH", "R"],
            "current_strong_phonemes": ["S"],
        });

        let buckets = normalize_phonemes(&Value::Null, &aggregate);
        assert_eq!(buckets.all.len(), 3);
        assert_eq!(buckets.weak.len(), 2);
        assert_eq!(buckets.strong.len(), 1);
        assert!(buckets.weak.iter().all(|r| r.current_score == 0.5));
        assert_eq!(buckets.strong[0].current_score, 0.9);
        assert!(buckets.all.iter().all(|r| r.attempts == 0));
    }

    #[test]
    fn buckets_sort_ascending_and_partition_by_threshold() {
        let stats = json!({
            "by_type": {
                "consonant": [
                    { "arpabet_code": "S", "current_score": 0.9 },
                    { "arpabet_code": "TH", "current_score": 0.4 },
                    { "arpabet_code": "R", "current_score": 0.72 },
                ]
            }
        });

        let buckets = normalize_phonemes(&stats, &Value::Null);
        let scores: Vec<f64> = buckets.all.iter().map(|r| r.current_score).collect();
        assert_eq!(scores, vec![0.4, 0.72, 0.9]);
        assert_eq!(buckets.weak.len(), 1);
        assert_eq!(buckets.strong.len(), 1);
    }

    #[test]
    fn sessions_prefer_history_and_cap_at_ten() {
        let history = json!({
            "results": (0..12).map(|i| json!({
                "date": format!("2024-03-{:02}", 12 - i),
                "average_score": 0.5,
                "attempts_count": 2,
                "total_practice_minutes": 6.5,
            })).collect::<Vec<_>>()
        });
        let aggregate = json!({ "recent_progress": [{ "date": "2023-01-01" }] });

        let sessions = normalize_sessions(&history, &aggregate);
        assert_eq!(sessions.len(), 10);
        assert_eq!(sessions[0].date, "2024-03-12");
        assert_eq!(sessions[0].duration_minutes, 6.5);
    }

    #[test]
    fn sessions_fall_back_to_recent_progress() {
        let aggregate = json!({
            "recent_progress": [
                { "date": "2024-03-01", "average_score": 0.8, "attempts": 4, "duration": 12.0 }
            ]
        });

        let sessions = normalize_sessions(&Value::Null, &aggregate);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].attempts, 4);
        assert_eq!(sessions[0].duration_minutes, 12.0);
    }

    #[test]
    fn overview_reads_nested_streaks() {
        let payload = json!({
            "total_attempts": 240,
            "total_sessions": 18,
            "overall_average_score": 0.74,
            "total_practice_minutes": 310.5,
            "streak": { "current_streak": 4, "longest_streak": 9 },
        });

        let stats = OverviewStats::from_payload(&payload);
        assert_eq!(stats.total_attempts, 240);
        assert_eq!(stats.current_streak_days, 4);
        assert_eq!(stats.longest_streak_days, 9);
        assert!(stats.has_activity());

        let empty = OverviewStats::from_payload(&Value::Null);
        assert!(!empty.has_activity());
    }
}

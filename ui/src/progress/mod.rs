pub mod normalize;
pub mod sparkline;

mod stats;
pub use stats::StatsGrid;

mod charts;
pub use charts::{ScoreTrendChart, TrendBadge, TrendSparkline};

mod mastery;
pub use mastery::MasteryPanel;

mod sessions;
pub use sessions::SessionsList;

mod export;
pub use export::ProgressExportPanel;

mod utils;
pub(crate) use utils::*;

use serde::Serialize;
use serde_json::Value;

use normalize::{
    compute_trend, normalize_history, normalize_phonemes, normalize_sessions, OverviewStats,
    PhonemeBuckets, ScorePoint, SessionRecord, Trend,
};

/// Selected history window, in days. The backend only buckets these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPeriod {
    Week,
    Month,
    Quarter,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 3] = [Self::Week, Self::Month, Self::Quarter];

    pub fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
        }
    }
}

/// Everything the dashboard renders, normalized from the three raw
/// payloads in one pass. Recomputed from scratch on every fetch or period
/// change; nothing here survives a render cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardModel {
    pub stats: OverviewStats,
    pub points: Vec<ScorePoint>,
    pub trend: Option<Trend>,
    pub buckets: PhonemeBuckets,
    pub sessions: Vec<SessionRecord>,
}

impl DashboardModel {
    pub fn from_payloads(overview: &Value, history: &Value, phonemes: &Value) -> Self {
        let points = normalize_history(history);
        let trend = compute_trend(&points);
        Self {
            stats: OverviewStats::from_payload(overview),
            trend,
            buckets: normalize_phonemes(phonemes, overview),
            sessions: normalize_sessions(history, overview),
            points,
        }
    }

    /// Score series as plain floats for the sparkline renderer.
    pub fn score_values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.score as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn period_days_match_backend_buckets() {
        assert_eq!(HistoryPeriod::Week.days(), 7);
        assert_eq!(HistoryPeriod::Month.days(), 30);
        assert_eq!(HistoryPeriod::Quarter.days(), 90);
    }

    #[test]
    fn model_assembles_all_sections_from_payloads() {
        let overview = json!({
            "total_attempts": 12,
            "total_sessions": 3,
            "overall_average_score": 0.66,
            "current_weak_phonemes": ["TH"],
        });
        let history = json!({
            "results": [
                { "date": "2024-01-02", "average_score": 0.7, "attempts": 4 },
                { "date": "2024-01-01", "average_score": 0.6, "attempts": 5 },
            ]
        });

        let model = DashboardModel::from_payloads(&overview, &history, &Value::Null);
        assert_eq!(model.points.len(), 2);
        assert_eq!(model.score_values(), vec![60.0, 70.0]);
        assert!(model.trend.is_some());
        assert_eq!(model.buckets.weak.len(), 1);
        assert_eq!(model.sessions.len(), 2);
        assert!(model.stats.has_activity());
    }

    #[test]
    fn model_from_null_payloads_is_fully_empty() {
        let model = DashboardModel::from_payloads(&Value::Null, &Value::Null, &Value::Null);
        assert!(model.points.is_empty());
        assert!(model.trend.is_none());
        assert!(model.buckets.all.is_empty());
        assert!(model.sessions.is_empty());
        assert!(!model.stats.has_activity());
    }
}

use dioxus::prelude::*;

use crate::core::format;
use crate::progress::charts::{TrendBadge, TrendSparkline};
use crate::progress::normalize::{OverviewStats, Trend};

/// Headline stat cards: attempts, sessions, average score (with the trend
/// sparkline), practice time, and streaks.
#[component]
pub fn StatsGrid(stats: OverviewStats, trend: Option<Trend>, spark_values: Vec<f64>) -> Element {
    let average = format::format_percent(stats.average_score_fraction);
    let practice = format::format_minutes(stats.practice_minutes);
    let current_streak = format::format_days(stats.current_streak_days);
    let longest_streak = format::format_days(stats.longest_streak_days);

    rsx! {
        div { class: "stats-grid",
            div { class: "stat-card",
                span { class: "stat-card__label", "Attempts" }
                strong { class: "stat-card__value", "{stats.total_attempts}" }
                span { class: "stat-card__meta", "{stats.total_sessions} sessions" }
            }

            div { class: "stat-card stat-card--score",
                span { class: "stat-card__label", "Average score" }
                div { class: "stat-card__row",
                    strong { class: "stat-card__value", "{average}" }
                    TrendBadge { trend }
                }
                TrendSparkline { values: spark_values, canvas_id: "stat-score-spark" }
            }

            div { class: "stat-card",
                span { class: "stat-card__label", "Practice time" }
                strong { class: "stat-card__value", "{practice}" }
                span { class: "stat-card__meta", "across all sessions" }
            }

            div { class: "stat-card",
                span { class: "stat-card__label", "Streak" }
                strong { class: "stat-card__value", "{current_streak}" }
                span { class: "stat-card__meta", "longest {longest_streak}" }
            }
        }
    }
}

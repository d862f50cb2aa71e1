use dioxus::prelude::*;
use serde_json::Value;

use crate::components::app_navbar;
use crate::progress::{
    DashboardModel, HistoryPeriod, MasteryPanel, ProgressExportPanel, ScoreTrendChart,
    SessionsList, StatsGrid,
};

/// Raw payloads from one fetch round, kept un-typed: the normalizer owns
/// all shape tolerance.
#[derive(Debug, Clone, PartialEq)]
struct PayloadBundle {
    overview: Value,
    history: Value,
    phonemes: Value,
}

#[cfg(debug_assertions)]
fn log_progress_render(state: &str) {
    println!("[progress] render ({state})");
}

/// The pronunciation-progress dashboard. All three payloads are fetched
/// together; any single failure surfaces as one unified error state whose
/// retry re-triggers the whole round.
#[component]
pub fn Progress() -> Element {
    let period = use_signal(|| HistoryPeriod::Month);

    // Reading `period` inside the closure keys the resource to it: a period
    // change drops any in-flight round before starting the next, so a slow
    // stale response can never overwrite newer data.
    let mut payloads = use_resource(move || async move {
        let days = period().days();
        let (overview, history, phonemes) = futures::join!(
            api::progress_overview(),
            api::practice_history(days),
            api::phoneme_stats(),
        );

        match (overview, history, phonemes) {
            (Ok(overview), Ok(history), Ok(phonemes)) => Ok(PayloadBundle {
                overview,
                history,
                phonemes,
            }),
            (overview, history, phonemes) => {
                let message = [overview.err(), history.err(), phonemes.err()]
                    .into_iter()
                    .flatten()
                    .map(|err| err.to_string())
                    .next()
                    .unwrap_or_else(|| "analytics backend unreachable".to_string());
                Err(message)
            }
        }
    });

    let body = match payloads() {
        None => {
            #[cfg(debug_assertions)]
            log_progress_render("loading");
            rsx! {
                p { class: "progress-status", "Loading your progress…" }
            }
        }
        Some(Err(message)) => {
            #[cfg(debug_assertions)]
            log_progress_render("error");
            rsx! {
                div { class: "progress-card progress-error",
                    h2 { "Couldn't load your progress" }
                    p { class: "progress-error__detail", "{message}" }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| payloads.restart(),
                        "Try again"
                    }
                }
            }
        }
        Some(Ok(bundle)) => {
            let model =
                DashboardModel::from_payloads(&bundle.overview, &bundle.history, &bundle.phonemes);

            if model.stats.has_activity() {
                #[cfg(debug_assertions)]
                log_progress_render("data");
                render_dashboard(model, period)
            } else {
                // No attempts yet is a first-run state, not a failure.
                #[cfg(debug_assertions)]
                log_progress_render("empty");
                rsx! {
                    div { class: "progress-card progress-empty",
                        h2 { "No practice yet" }
                        p { "Your stats, score trend, and phoneme mastery will build up here." }
                        {app_navbar::practice_link("Start practicing")}
                    }
                }
            }
        }
    };

    rsx! {
        section { class: "page page-progress",
            h1 { "Progress" }
            p {
                "How your pronunciation is developing: overall stats, the score trend, "
                "and which phonemes need attention."
            }
            {body}
        }
    }
}

fn render_dashboard(model: DashboardModel, period: Signal<HistoryPeriod>) -> Element {
    rsx! {
        StatsGrid {
            stats: model.stats.clone(),
            trend: model.trend,
            spark_values: model.score_values(),
        }

        ScoreTrendChart {
            points: model.points.clone(),
            trend: model.trend,
            period,
        }

        div { class: "progress__panels",
            MasteryPanel { buckets: model.buckets.clone() }
            SessionsList { sessions: model.sessions.clone() }
        }

        ProgressExportPanel { model }
    }
}

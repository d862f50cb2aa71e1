use dioxus::prelude::*;

use crate::core::format;
use crate::progress::normalize::SessionRecord;
use crate::progress::short_date_label;

/// Recent practice sessions, newest first. The normalizer caps the list at
/// ten rows.
#[component]
pub fn SessionsList(sessions: Vec<SessionRecord>) -> Element {
    rsx! {
        section { class: "progress-card sessions-list",
            div { class: "progress-card__header",
                h2 { "Recent sessions" }
                if !sessions.is_empty() {
                    span { class: "progress-card__meta", "{sessions.len()} shown" }
                }
            }

            if sessions.is_empty() {
                p { class: "progress-card__placeholder",
                    "Completed practice sessions will appear here."
                }
            } else {
                ul { class: "sessions-list__items",
                    for session in sessions.iter() {
                        li { class: "sessions-list__item",
                            span { class: "sessions-list__date", "{short_date_label(&session.date)}" }
                            span { class: "sessions-list__score",
                                "{format::format_percent(session.score_fraction)}"
                            }
                            span { class: "sessions-list__attempts", "{session.attempts} attempts" }
                            span { class: "sessions-list__duration",
                                "{format::format_minutes(session.duration_minutes)}"
                            }
                        }
                    }
                }
            }
        }
    }
}

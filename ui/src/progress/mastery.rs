use dioxus::prelude::*;

use crate::components::app_navbar;
use crate::core::format;
use crate::progress::normalize::{PhonemeBuckets, PhonemeRecord};

/// How many phonemes the panel lists before pointing at the full view.
const VISIBLE_ROWS: usize = 12;

/// Phoneme mastery panel: tier-colored bars, weakest first, with the
/// weak/strong partition summarized in the header.
#[component]
pub fn MasteryPanel(buckets: PhonemeBuckets) -> Element {
    let total = buckets.all.len();
    let weak = buckets.weak.len();
    let strong = buckets.strong.len();

    let rows: Vec<PhonemeRecord> = buckets.all.iter().take(VISIBLE_ROWS).cloned().collect();
    let overflow = total.saturating_sub(VISIBLE_ROWS);

    rsx! {
        section { class: "progress-card mastery-panel",
            div { class: "progress-card__header",
                h2 { "Phoneme mastery" }
                if total > 0 {
                    span { class: "progress-card__meta", "{weak} to focus · {strong} strong" }
                }
                {app_navbar::phonemes_link("View all phonemes")}
            }

            if total == 0 {
                p { class: "progress-card__placeholder",
                    "Phoneme scores appear after your first scored practice session."
                }
            } else {
                ul { class: "mastery-panel__rows",
                    for record in rows.into_iter() {
                        {mastery_row(&record)}
                    }
                }
                if overflow > 0 {
                    p { class: "progress-card__meta", "+{overflow} more tracked" }
                }
            }
        }
    }
}

fn mastery_row(record: &PhonemeRecord) -> Element {
    let tier = record.tier();
    let width = (record.current_score.clamp(0.0, 1.0) * 100.0).round();
    let score = format::format_percent(record.current_score);
    let symbol = record.display_symbol().to_string();
    let code = record.arpabet_code.clone();
    let attempts = record.attempts;

    rsx! {
        li { class: "mastery-row",
            span { class: "mastery-row__symbol", "{symbol}" }
            if !code.is_empty() && code != symbol {
                span { class: "mastery-row__code", "{code}" }
            }
            div { class: "mastery-bar {tier.css_class()}",
                div {
                    class: "mastery-bar__fill",
                    style: "width: {width}%",
                }
            }
            span { class: "mastery-row__score", "{score}" }
            span { class: "mastery-row__tier", "{tier.label()}" }
            if attempts > 0 {
                span { class: "mastery-row__attempts", "{attempts}×" }
            }
        }
    }
}

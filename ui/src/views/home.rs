use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            h1 { "Phonoscope" }
            p { "Pronunciation practice that shows its work." }
            p {
                "Practice short phrases, get phoneme-level feedback, and watch your "
                "accuracy build session over session."
            }

            ul { class: "page-home__features",
                li { "Guided practice drills scored phoneme by phoneme" }
                li { "A progress dashboard with trends, streaks, and mastery tiers" }
                li { "Exports for coaches: JSON, CSV, and PNG snapshots" }
            }
            p { class: "page-home__cta",
                "Head to the Progress tab to see where you stand."
            }
        }
    }
}

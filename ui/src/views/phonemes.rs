use dioxus::prelude::*;

/// Full phoneme inventory view. The dashboard's mastery panel links here
/// for sounds beyond its visible rows.
#[component]
pub fn Phonemes() -> Element {
    rsx! {
        section { class: "page page-phonemes",
            h1 { "Phonemes" }
            p {
                "Every sound we track, with your current mastery tier. "
                "Work the lowest bars first; they move the average fastest."
            }
        }
    }
}

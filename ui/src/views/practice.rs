use dioxus::prelude::*;

/// Landing page for the practice flow. The recording/scoring loop itself
/// lives behind the backend API; this page hosts whatever client the
/// deployment wires in.
#[component]
pub fn Practice() -> Element {
    rsx! {
        section { class: "page page-practice",
            h1 { "Practice" }
            p {
                "Pick a phrase, record yourself, and get phoneme-level feedback. "
                "Finished sessions show up on the Progress screen."
            }
        }
    }
}

use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet (mirrors legacy Navbar so styling applies here too)
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
///
/// If a builder is registered, `AppNavbar` renders its own nav with the
/// supplied links. If not, it falls back to any raw `children` passed
/// (legacy) so existing code does not break while platforms migrate.
///
/// Setup for a platform crate (desktop/web):
/// 1. Define a function returning `NavBuilder` where each closure constructs
///    a `Link { to: Route::..., class: "navbar__link", ... }`.
/// 2. Call `ui::components::app_navbar::register_nav(builder)` before
///    rendering the root (e.g. at top of `App()`).
/// 3. Use `AppNavbar {}` with no manual nav link children.
pub struct NavBuilder {
    // Each closure must return a Link (or element styled as a nav link)
    // whose children are exactly the label string passed in.
    pub home: fn(label: &str) -> Element,
    pub practice: fn(label: &str) -> Element,
    pub phonemes: fn(label: &str) -> Element,
    pub progress: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// A platform-built link to the practice screen, for in-page calls to
/// action. `None` when no builder is registered (tests, bare previews).
pub fn practice_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.practice)(label))
}

/// A platform-built link to the full phoneme inventory.
pub fn phonemes_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.phonemes)(label))
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    // Build the internal nav if a NavBuilder is registered. Each closure
    // receives the label and returns a Link that already contains it.
    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)("Home");
        let practice = (b.practice)("Practice");
        let phonemes = (b.phonemes)("Phonemes");
        let progress = (b.progress)("Progress");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {practice}
                {phonemes}
                {progress}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    rsx! {
        // Include shared navbar stylesheet (and inline in release native)
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                // Brand
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Phonoscope" }
                    }
                    span { class: "navbar__brand-subtitle", "Hear yourself improve" }
                }

                // Navigation (internal builder or legacy children)
                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}

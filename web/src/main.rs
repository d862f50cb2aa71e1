use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Home, Phonemes, Practice, Progress};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/practice")]
    Practice {},
    #[route("/phonemes")]
    Phonemes {},
    #[route("/progress")]
    Progress {},
}

// Web serves the same shared theme the desktop build embeds, so there is no
// per-platform stylesheet to keep in sync.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_practice(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Practice {},
        "{label}"
    })
}
fn nav_phonemes(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Phonemes {},
        "{label}"
    })
}
fn nav_progress(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Progress {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        practice: nav_practice,
        phonemes: nav_phonemes,
        progress: nav_progress,
    });

    rsx! {
        // Global app resources
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}

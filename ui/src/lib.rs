//! Shared UI crate for Phonoscope. Cross-platform views and dashboard logic live here.

pub mod core;
pub mod progress;
pub mod views;

mod navbar;
pub mod components {
    // Application navbar with platform-registered links (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Legacy minimalist Navbar passthrough (ui/src/navbar.rs)
    pub use super::navbar::Navbar;
}

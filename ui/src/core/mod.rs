pub mod format;
pub mod payload;
pub mod platform;

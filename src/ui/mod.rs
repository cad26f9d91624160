//! User Interface module
//!
//! Terminal UI using ratatui.

pub mod hud;

pub use hud::Hud;

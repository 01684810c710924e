//! Shared tuning constants for the grid board editor.
//!
//! Board dimensions live in [`board`], scene colours and camera limits in
//! [`render_settings`].

/// Board geometry and size bounds.
pub mod board;

/// Default palette, highlight colours and camera limits.
pub mod render_settings;

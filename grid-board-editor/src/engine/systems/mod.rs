//! Diagnostics systems.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the frontend via RPC and updates the native overlay.
pub mod fps_tracking;

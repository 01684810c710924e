//! Orbit camera around the board centre.
//!
//! Right-drag rotates, middle-drag pans and the wheel zooms. The camera
//! re-frames itself whenever the board is resized.

/// Viewport camera resource and controller system.
pub mod viewport_camera;

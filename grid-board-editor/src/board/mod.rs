//! Board data model: cell geometry, registries and configuration.
//!
//! Everything here is plain owned state with no Bevy scheduling attached.
//! The [`crate::tools::interaction::BoardEditor`] resource owns one of each
//! registry and is the only writer.
//!
//! ## Coordinates
//!
//! Cells are integer `(x, z)` pairs in `[0, size)`. Render space is centred on
//! the origin, one tile spanning [`constants::board::TILE_SPAN`] units:
//!
//! ```text
//! offset = size * span / 2 - span / 2
//! px     = x * span - offset
//! pz     = z * span - offset
//! ```

/// Board size, tile colours and label visibility, plus the JSON settings asset.
pub mod config;

/// Cell/world coordinate mapping and `A1`-style labels.
pub mod geometry;

/// Obstacle registry keyed by `"x-z"` ids.
pub mod obstacles;

/// Agent registry with counter-derived ids.
pub mod agents;

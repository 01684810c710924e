//! 3D presentation of the board.
//!
//! Every system here reads [`BoardEditor`](crate::tools::interaction::BoardEditor)
//! and reconciles entities against it when it changes. Nothing in this module
//! writes editor state.

use bevy::prelude::*;

use crate::board::geometry::Cell;

/// Agent cubes with idle animation and floating name tags.
pub mod agents;

/// Shared meshes, materials and scene lighting.
pub mod handles;

/// Screen-projected coordinate labels and anchored UI text.
pub mod labels;

/// Obstacle cubes, diffed against the registry.
pub mod obstacles;

/// Checkerboard tiles and drag highlighting.
pub mod tiles;

#[derive(Component, Debug, Clone, Copy)]
pub struct BoardTile {
    pub cell: Cell,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ObstacleCube {
    pub cell: Cell,
}

#[derive(Component, Debug, Clone)]
pub struct AgentToken {
    pub id: String,
    /// Resting centre; the bob animation oscillates around it.
    pub rest: Vec3,
}

#[derive(Component, Debug, Clone)]
pub struct AgentNameTag(pub String);

#[derive(Component, Debug, Clone, Copy)]
pub struct CoordinateLabel(pub Cell);

use std::collections::HashSet;

use bevy::prelude::*;
use constants::board::{OBSTACLE_SIZE, TILE_HEIGHT};

use super::ObstacleCube;
use super::handles::SceneHandles;
use crate::board::geometry::{Cell, cell_to_world};
use crate::tools::interaction::BoardEditor;
use crate::tools::selection::RangeMode;

/// Keeps one cube per registered obstacle. Cubes inside a live remove-range
/// switch to the marked material.
pub fn sync_obstacle_cubes(
    mut commands: Commands,
    editor: Res<BoardEditor>,
    handles: Res<SceneHandles>,
    mut cubes: Query<(Entity, &ObstacleCube, &mut MeshMaterial3d<StandardMaterial>)>,
    mut built_size: Local<u32>,
) {
    if !editor.is_changed() {
        return;
    }

    let size = editor.config().size;
    let wanted: HashSet<Cell> = editor.obstacles().iter().map(|o| o.cell()).collect();
    let mut present = HashSet::new();
    let preview = editor.drag_preview();

    for (entity, cube, mut material) in &mut cubes {
        if *built_size != size || !wanted.contains(&cube.cell) {
            commands.entity(entity).despawn();
            continue;
        }
        present.insert(cube.cell);

        let marked = preview
            .is_some_and(|p| p.mode == RangeMode::Remove && p.rect.contains(cube.cell));
        let handle = if marked {
            &handles.obstacle_marked
        } else {
            &handles.obstacle
        };
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }

    for obstacle in editor.obstacles().iter() {
        let cell = obstacle.cell();
        if present.contains(&cell) {
            continue;
        }
        let pos = cell_to_world(cell, size);
        commands.spawn((
            ObstacleCube { cell },
            Name::new(format!("Obstacle {}", obstacle.id)),
            Mesh3d(handles.obstacle_mesh.clone()),
            MeshMaterial3d(handles.obstacle.clone()),
            Transform::from_xyz(pos.x, TILE_HEIGHT * 0.5 + OBSTACLE_SIZE * 0.5, pos.y),
        ));
    }

    *built_size = size;
}

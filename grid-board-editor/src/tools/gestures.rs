use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::board::{AGENT_SIZE, OBSTACLE_SIZE};

use super::interaction::BoardEditor;
use super::ray::{ray_hits_obb, ray_to_cell};
use crate::board::geometry::Cell;
use crate::engine::scene::{AgentToken, ObstacleCube};

/// Pointer-over-UI flag, refreshed before gestures and camera input run.
#[derive(Resource, Default, Debug)]
pub struct PointerCapture {
    pub over_ui: bool,
}

/// What a ray through the cursor lands on first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    Agent(String),
    Cell(Cell),
}

/// Agents first, then obstacle cubes, then the tile-top plane.
pub fn pick_target<'a>(
    origin: Vec3,
    dir: Vec3,
    size: u32,
    agents: impl IntoIterator<Item = (&'a GlobalTransform, &'a str)>,
    obstacles: impl IntoIterator<Item = (&'a GlobalTransform, Cell)>,
) -> Option<PickTarget> {
    let nearest_agent = agents
        .into_iter()
        .filter_map(|(xf, id)| ray_hits_obb(origin, dir, xf, Vec3::splat(AGENT_SIZE)).map(|t| (t, id)))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, id)) = nearest_agent {
        return Some(PickTarget::Agent(id.to_string()));
    }

    let nearest_obstacle = obstacles
        .into_iter()
        .filter_map(|(xf, cell)| {
            ray_hits_obb(origin, dir, xf, Vec3::splat(OBSTACLE_SIZE)).map(|t| (t, cell))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, cell)) = nearest_obstacle {
        return Some(PickTarget::Cell(cell));
    }

    ray_to_cell(origin, dir, size).map(PickTarget::Cell)
}

pub fn update_pointer_capture(
    interactions: Query<&Interaction, With<Node>>,
    mut capture: ResMut<PointerCapture>,
) {
    let over_ui = interactions.iter().any(|i| *i != Interaction::None);
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}

/// Left-button gestures over the 3D view.
///
/// A press picks an agent (select) or a cell (click when placement is armed,
/// otherwise drag start). Moving with the button held extends the drag and
/// releasing anywhere ends it.
pub fn handle_pointer_gestures(
    buttons: Res<ButtonInput<MouseButton>>,
    capture: Res<PointerCapture>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    agents: Query<(&GlobalTransform, &AgentToken)>,
    obstacles: Query<(&GlobalTransform, &ObstacleCube)>,
    mut editor: ResMut<BoardEditor>,
    mut hovered: Local<Option<Cell>>,
) {
    if buttons.just_released(MouseButton::Left) {
        if editor.is_dragging() {
            editor.drag_end();
        }
        *hovered = None;
        return;
    }

    let pressed = buttons.just_pressed(MouseButton::Left);
    if !pressed && !editor.is_dragging() {
        return;
    }
    if pressed && capture.over_ui {
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };
    let Ok((camera, camera_xf)) = cameras.single() else { return };
    let Ok(ray) = camera.viewport_to_world(camera_xf, cursor_pos) else { return };

    let size = editor.config().size;
    let target = pick_target(
        ray.origin,
        *ray.direction,
        size,
        agents.iter().map(|(xf, token)| (xf, token.id.as_str())),
        obstacles.iter().map(|(xf, cube)| (xf, cube.cell)),
    );

    if pressed {
        match target {
            Some(PickTarget::Agent(id)) => {
                editor.select_agent(&id);
            }
            Some(PickTarget::Cell(cell)) if editor.placement().is_some() => {
                editor.cell_click(cell);
            }
            Some(PickTarget::Cell(cell)) => {
                if editor.drag_start(cell) {
                    *hovered = Some(cell);
                }
            }
            None => {}
        }
        return;
    }

    // Agents sit on cells too; hovering one still extends the drag.
    let cell = match target {
        Some(PickTarget::Cell(cell)) => Some(cell),
        Some(PickTarget::Agent(_)) => ray_to_cell(ray.origin, *ray.direction, size),
        None => None,
    };
    if let Some(cell) = cell {
        if *hovered != Some(cell) {
            *hovered = Some(cell);
            editor.drag_update(cell);
        }
    }
}

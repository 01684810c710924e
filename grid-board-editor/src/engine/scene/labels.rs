use bevy::prelude::*;
use constants::board::TILE_HEIGHT;

use super::CoordinateLabel;
use crate::board::geometry::{Cell, cell_to_world};
use crate::tools::interaction::BoardEditor;

/// UI node pinned to a world-space point. Re-projected every frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScreenAnchor(pub Vec3);

/// Parent of all coordinate labels; toggled by `show_labels`.
#[derive(Component)]
pub struct CoordinateLabelRoot;

pub fn spawn_label_root(mut commands: Commands) {
    commands.spawn((
        CoordinateLabelRoot,
        Name::new("CoordinateLabels"),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub fn sync_coordinate_labels(
    mut commands: Commands,
    editor: Res<BoardEditor>,
    mut root: Query<(Entity, &mut Visibility), With<CoordinateLabelRoot>>,
    mut labels: Query<(Entity, &CoordinateLabel, &mut TextColor)>,
    mut built_size: Local<Option<u32>>,
) {
    if !editor.is_changed() {
        return;
    }
    let Ok((root, mut visibility)) = root.single_mut() else {
        return;
    };

    let config = editor.config();
    let wanted = if config.show_labels {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }

    if *built_size == Some(config.size) {
        for (_, label, mut color) in &mut labels {
            let next = TextColor(config.label_color(label.0.is_dark()).into());
            if *color != next {
                *color = next;
            }
        }
        return;
    }

    for (entity, _, _) in &labels {
        commands.entity(entity).despawn();
    }

    commands.entity(root).with_children(|parent| {
        for x in 0..config.size {
            for z in 0..config.size {
                let cell = Cell::new(x, z);
                let pos = cell_to_world(cell, config.size);
                parent.spawn((
                    CoordinateLabel(cell),
                    ScreenAnchor(Vec3::new(pos.x, TILE_HEIGHT * 0.5 + 0.01, pos.y)),
                    Text::new(cell.label()),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(config.label_color(cell.is_dark()).into()),
                    Node {
                        position_type: PositionType::Absolute,
                        ..default()
                    },
                ));
            }
        }
    });
    *built_size = Some(config.size);
}

/// Moves anchored UI nodes to their projected screen position. Nodes whose
/// anchor falls behind the camera are hidden.
pub fn project_screen_anchors(
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut anchored: Query<(&ScreenAnchor, &ComputedNode, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_xf)) = cameras.single() else {
        return;
    };

    for (anchor, computed, mut node, mut visibility) in &mut anchored {
        match camera.world_to_viewport(camera_xf, anchor.0) {
            Ok(screen) => {
                // Centre the node on the anchor.
                let half = computed.size() * computed.inverse_scale_factor() * 0.5;
                node.left = Val::Px(screen.x - half.x);
                node.top = Val::Px(screen.y - half.y);
                if *visibility == Visibility::Hidden {
                    *visibility = Visibility::Inherited;
                }
            }
            Err(_) => {
                if *visibility != Visibility::Hidden {
                    *visibility = Visibility::Hidden;
                }
            }
        }
    }
}

use bevy::prelude::*;
use constants::render_settings::{HIGHLIGHT_ADD, HIGHLIGHT_REMOVE};

use super::BoardTile;
use super::handles::SceneHandles;
use crate::board::geometry::{Cell, cell_to_world};
use crate::tools::interaction::BoardEditor;
use crate::tools::selection::{DragPreview, RangeMode};

/// Emissive tint for a tile under the live drag rectangle.
pub fn tile_highlight(cell: Cell, occupied: bool, preview: Option<&DragPreview>) -> LinearRgba {
    match preview {
        Some(preview) if preview.affects(cell, occupied) => match preview.mode {
            RangeMode::Add => HIGHLIGHT_ADD,
            RangeMode::Remove => HIGHLIGHT_REMOVE,
        },
        _ => LinearRgba::BLACK,
    }
}

/// Rebuilds the tile grid on resize and recolours tiles on any editor change.
pub fn sync_board_tiles(
    mut commands: Commands,
    editor: Res<BoardEditor>,
    handles: Res<SceneHandles>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tiles: Query<(Entity, &BoardTile, &MeshMaterial3d<StandardMaterial>)>,
    mut built_size: Local<Option<u32>>,
) {
    if !editor.is_changed() {
        return;
    }

    let config = editor.config();
    let size = config.size;

    if *built_size != Some(size) {
        for (entity, _, _) in &tiles {
            commands.entity(entity).despawn();
        }

        for x in 0..size {
            for z in 0..size {
                let cell = Cell::new(x, z);
                let pos = cell_to_world(cell, size);
                let material = materials.add(StandardMaterial {
                    base_color: config.tile_color(cell.is_dark()).into(),
                    perceptual_roughness: 0.8,
                    ..default()
                });
                commands.spawn((
                    BoardTile { cell },
                    Name::new(format!("Tile {}", cell.label())),
                    Mesh3d(handles.tile_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(pos.x, 0.0, pos.y),
                ));
            }
        }

        debug!("Spawned {} tiles", size * size);
        *built_size = Some(size);
        return;
    }

    let preview = editor.drag_preview();
    for (_, tile, material) in &tiles {
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };
        let occupied = editor.obstacles().has(tile.cell);
        material.base_color = config.tile_color(tile.cell.is_dark()).into();
        material.emissive = tile_highlight(tile.cell, occupied, preview.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::selection::CellRect;

    fn preview(mode: RangeMode) -> DragPreview {
        DragPreview {
            rect: CellRect::spanning(Cell::new(0, 0), Cell::new(1, 1)),
            mode,
        }
    }

    #[test]
    fn add_preview_highlights_only_empty_tiles_in_rect() {
        let p = preview(RangeMode::Add);
        assert_eq!(tile_highlight(Cell::new(1, 1), false, Some(&p)), HIGHLIGHT_ADD);
        assert_eq!(tile_highlight(Cell::new(1, 1), true, Some(&p)), LinearRgba::BLACK);
        assert_eq!(tile_highlight(Cell::new(2, 1), false, Some(&p)), LinearRgba::BLACK);
    }

    #[test]
    fn remove_preview_highlights_occupied_tiles() {
        let p = preview(RangeMode::Remove);
        assert_eq!(tile_highlight(Cell::new(0, 1), true, Some(&p)), HIGHLIGHT_REMOVE);
        assert_eq!(tile_highlight(Cell::new(0, 1), false, Some(&p)), LinearRgba::BLACK);
    }

    #[test]
    fn no_drag_means_no_highlight() {
        assert_eq!(tile_highlight(Cell::new(0, 0), false, None), LinearRgba::BLACK);
    }
}

use bevy::prelude::*;

use super::interaction::BoardEditor;
use crate::board::agents::AgentType;
use crate::board::config::clamp_board_size;

/// Native keyboard shortcuts. The wasm build is driven over RPC instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_board_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut editor: ResMut<BoardEditor>) {
    if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::NumpadEnter) {
        editor.confirm();
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        editor.cancel();
        if editor.placement().is_some() {
            editor.arm_agent_placement(None);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyB) {
        editor.toggle_agent_placement(AgentType::Blue);
    }

    if keyboard.just_pressed(KeyCode::KeyL) {
        let show = !editor.config().show_labels;
        editor.set_show_labels(show);
    }

    let size = editor.config().size;
    let step = if keyboard.just_pressed(KeyCode::BracketLeft) {
        clamp_board_size(size.saturating_sub(1))
    } else if keyboard.just_pressed(KeyCode::BracketRight) {
        clamp_board_size(size + 1)
    } else {
        size
    };
    // Resizing clears the board, so a no-op step must not reach the editor.
    if step != size {
        editor.resize_board(step);
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_board_shortcuts() {}

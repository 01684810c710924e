//! Native editor panels.
//!
//! A collapsible settings panel on the left (board size, labels, tile
//! colours, controls guide), an agents panel on the right and a confirmation
//! dialog that follows the editor's pending mutation. Every button carries a
//! [`PanelAction`](state::PanelAction) and is dispatched by a single system.
//!
//! The wasm build hosts its UI in the parent page and talks to the editor over
//! JSON-RPC, so none of this is spawned there.

/// Button press handling and the action dispatcher.
pub mod interactions;

/// Panel resources, marker components and dialog text.
pub mod state;

/// Panel spawning and editor-to-UI reflection.
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
pub use state::BoardPanelUiState;

pub struct BoardPanelPlugin;

impl Plugin for BoardPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardPanelUiState>();

        #[cfg(not(target_arch = "wasm32"))]
        {
            use interactions::panel_button_interaction;
            use ui::{apply_collapse_state, reflect_editor_state, spawn_board_panels};

            app.add_systems(OnEnter(AppState::Running), spawn_board_panels)
                .add_systems(
                    Update,
                    (
                        panel_button_interaction,
                        apply_collapse_state,
                        reflect_editor_state,
                    )
                        .chain()
                        .run_if(in_state(AppState::Running)),
                );
        }
    }
}

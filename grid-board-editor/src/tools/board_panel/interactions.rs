use bevy::prelude::*;

use super::state::*;
use super::ui::{BUTTON_HOVER, BUTTON_PRESSED, base_color};
use crate::board::agents::AgentType;
use crate::board::config::{clamp_board_size, parse_color};
use crate::tools::interaction::BoardEditor;

/// Applies a panel button press. Returns `true` when the editor changed.
pub fn apply_panel_action(
    action: PanelAction,
    editor: &mut BoardEditor,
    ui_state: &mut BoardPanelUiState,
) -> bool {
    match action {
        PanelAction::ToggleCollapse(side) => {
            ui_state.toggle(side);
            false
        }
        PanelAction::ResizeStep(step) => {
            let size = editor.config().size;
            let next = clamp_board_size(size.saturating_add_signed(step));
            // Resizing wipes the board; the stepper's end stops are no-ops.
            if next == size {
                return false;
            }
            editor.resize_board(next);
            true
        }
        PanelAction::ToggleLabels => {
            let show = !editor.config().show_labels;
            editor.set_show_labels(show);
            true
        }
        PanelAction::SetColor(slot, hex) => {
            let field = match slot {
                ColorSlot::Primary => "color1",
                ColorSlot::Secondary => "color2",
            };
            let color = match parse_color(field, hex) {
                Ok(color) => color,
                Err(err) => {
                    warn!("{err}");
                    return false;
                }
            };
            let (color1, color2) = match slot {
                ColorSlot::Primary => (color, editor.config().color2),
                ColorSlot::Secondary => (editor.config().color1, color),
            };
            editor.set_colors(color1, color2);
            true
        }
        PanelAction::ToggleBlueAgent => {
            editor.toggle_agent_placement(AgentType::Blue);
            true
        }
        PanelAction::RemoveAllAgents => {
            if editor.agents().is_empty() {
                return false;
            }
            editor.clear_agents();
            true
        }
        PanelAction::DialogPrimary => match editor.agent_info().map(|a| a.id.clone()) {
            Some(id) => editor.remove_agent(&id),
            None => editor.confirm(),
        },
        PanelAction::Cancel => {
            editor.cancel();
            true
        }
    }
}

// Every panel button carries a PanelAction; one system handles them all.
pub fn panel_button_interaction(
    mut q: Query<
        (&Interaction, &PanelAction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut editor: ResMut<BoardEditor>,
    mut ui_state: ResMut<BoardPanelUiState>,
) {
    for (interaction, action, mut bg) in &mut q {
        let swatch = matches!(action, PanelAction::SetColor(..));
        match *interaction {
            Interaction::Pressed => {
                apply_panel_action(*action, &mut editor, &mut ui_state);
                if !swatch {
                    *bg = BackgroundColor(BUTTON_PRESSED);
                }
            }
            Interaction::Hovered if !swatch => *bg = BackgroundColor(BUTTON_HOVER),
            Interaction::Hovered => {}
            Interaction::None => *bg = BackgroundColor(base_color(*action, &editor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::Cell;
    use constants::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

    fn setup() -> (BoardEditor, BoardPanelUiState) {
        (BoardEditor::default(), BoardPanelUiState::default())
    }

    #[test]
    fn stepper_stops_at_bounds_without_clearing() {
        let (mut editor, mut ui) = setup();
        editor.resize_board(MAX_BOARD_SIZE);
        editor.cell_click(Cell::new(0, 0));
        editor.confirm();

        assert!(!apply_panel_action(PanelAction::ResizeStep(1), &mut editor, &mut ui));
        assert_eq!(editor.obstacles().len(), 1);

        editor.resize_board(MIN_BOARD_SIZE);
        assert!(!apply_panel_action(PanelAction::ResizeStep(-1), &mut editor, &mut ui));
        assert_eq!(editor.config().size, MIN_BOARD_SIZE);
    }

    #[test]
    fn stepper_resizes_within_bounds() {
        let (mut editor, mut ui) = setup();
        let size = editor.config().size;
        assert!(apply_panel_action(PanelAction::ResizeStep(1), &mut editor, &mut ui));
        assert_eq!(editor.config().size, size + 1);
    }

    #[test]
    fn swatch_sets_only_its_slot() {
        let (mut editor, mut ui) = setup();
        let before = editor.config().color1;
        apply_panel_action(
            PanelAction::SetColor(ColorSlot::Secondary, "#334155"),
            &mut editor,
            &mut ui,
        );
        assert_eq!(editor.config().color1, before);
        assert!(editor.config().color2.to_hex().eq_ignore_ascii_case("#334155"));
    }

    #[test]
    fn dialog_primary_removes_shown_agent() {
        let (mut editor, mut ui) = setup();
        apply_panel_action(PanelAction::ToggleBlueAgent, &mut editor, &mut ui);
        editor.cell_click(Cell::new(2, 2));
        let id = editor.agents().as_slice()[0].id.clone();
        editor.select_agent(&id);

        assert!(apply_panel_action(PanelAction::DialogPrimary, &mut editor, &mut ui));
        assert!(editor.agents().is_empty());
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn dialog_primary_confirms_mutation() {
        let (mut editor, mut ui) = setup();
        editor.cell_click(Cell::new(1, 1));
        assert!(apply_panel_action(PanelAction::DialogPrimary, &mut editor, &mut ui));
        assert!(editor.obstacles().has(Cell::new(1, 1)));
    }

    #[test]
    fn remove_all_is_inert_without_agents() {
        let (mut editor, mut ui) = setup();
        assert!(!apply_panel_action(PanelAction::RemoveAllAgents, &mut editor, &mut ui));
    }

    #[test]
    fn collapse_toggles_only_ui_state() {
        let (mut editor, mut ui) = setup();
        let changed = apply_panel_action(
            PanelAction::ToggleCollapse(PanelSide::Agents),
            &mut editor,
            &mut ui,
        );
        assert!(!changed);
        assert!(ui.agents_collapsed);
        assert!(!ui.settings_collapsed);
    }
}

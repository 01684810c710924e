use bevy::color::Srgba;
use bevy::prelude::*;
use serde::Serialize;

use super::selection::{DragOutcome, DragPreview, DragTracker};
use crate::board::agents::{Agent, AgentRegistry, AgentType};
use crate::board::config::{BoardConfig, clamp_board_size};
use crate::board::geometry::Cell;
use crate::board::obstacles::{Obstacle, ObstacleRegistry};

/// The single pending change awaiting confirmation, or an agent picked for
/// inspection. Holding it in one slot keeps the variants mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingMutation {
    SingleAdd { x: u32, z: u32 },
    SingleRemove { obstacle: Obstacle },
    MassAdd { cells: Vec<Cell> },
    MassRemove { obstacles: Vec<Obstacle> },
    AgentInfo { agent: Agent },
}

/// Result of a cell click, reported back to callers for logging and RPC replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Placement was armed and the cell was free.
    Placed(Agent),
    /// Placement was armed but the cell holds an obstacle or agent.
    Rejected,
    /// A single add/remove is now pending.
    Pending,
    /// Cell lies outside the board.
    Ignored,
}

/// Interaction mediator. Owns the registries, the board configuration and the
/// pending state. All writes go through its methods.
#[derive(Resource, Debug, Default)]
pub struct BoardEditor {
    config: BoardConfig,
    obstacles: ObstacleRegistry,
    agents: AgentRegistry,
    pending: Option<PendingMutation>,
    placement: Option<AgentType>,
    drag: DragTracker,
}

impl BoardEditor {
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    // Queries

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.obstacles
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn pending(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    pub fn agent_info(&self) -> Option<&Agent> {
        match self.pending {
            Some(PendingMutation::AgentInfo { ref agent }) => Some(agent),
            _ => None,
        }
    }

    pub fn placement(&self) -> Option<AgentType> {
        self.placement
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_preview(&self) -> Option<DragPreview> {
        self.drag.preview(&self.obstacles)
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        !self.obstacles.has(cell) && !self.agents.has(cell)
    }

    // Gestures

    pub fn cell_click(&mut self, cell: Cell) -> ClickOutcome {
        if !cell.in_bounds(self.config.size) {
            return ClickOutcome::Ignored;
        }

        if let Some(kind) = self.placement {
            if !self.is_free(cell) {
                info!("Placement rejected at {}: cell occupied", cell.label());
                return ClickOutcome::Rejected;
            }

            let agent = self.agents.add(cell, kind);
            self.placement = None;
            if self.agent_info().is_some() {
                self.pending = None;
            }
            info!("Placed {} '{}' at {}", kind.display_name(), agent.id, cell.label());
            return ClickOutcome::Placed(agent);
        }

        self.pending = Some(match self.obstacles.get(cell) {
            Some(obstacle) => PendingMutation::SingleRemove {
                obstacle: obstacle.clone(),
            },
            None => PendingMutation::SingleAdd {
                x: cell.x,
                z: cell.z,
            },
        });
        ClickOutcome::Pending
    }

    /// Starts a drag-select. Ignored while placement is armed.
    pub fn drag_start(&mut self, cell: Cell) -> bool {
        if self.placement.is_some() || !cell.in_bounds(self.config.size) {
            return false;
        }
        self.drag.begin(cell);
        true
    }

    pub fn drag_update(&mut self, cell: Cell) -> bool {
        if !cell.in_bounds(self.config.size) {
            return false;
        }
        self.drag.update(cell)
    }

    /// Global pointer-up. Resolves the drag into a click or a mass mutation.
    /// Range results are dropped while placement is armed.
    pub fn drag_end(&mut self) -> Option<DragOutcome> {
        let outcome = self.drag.finish(&self.obstacles)?;
        if self.placement.is_some() {
            debug!("Drag discarded: agent placement armed");
            return None;
        }

        match outcome {
            DragOutcome::Click(cell) => {
                self.cell_click(cell);
            }
            DragOutcome::AddRange(ref cells) => {
                self.pending = Some(PendingMutation::MassAdd {
                    cells: cells.clone(),
                });
            }
            DragOutcome::RemoveRange(ref obstacles) => {
                self.pending = Some(PendingMutation::MassRemove {
                    obstacles: obstacles.clone(),
                });
            }
        }
        Some(outcome)
    }

    /// Selects a placed agent for inspection, replacing any pending mutation.
    pub fn select_agent(&mut self, id: &str) -> bool {
        let Some(agent) = self.agents.get(id).cloned() else {
            return false;
        };
        self.pending = Some(PendingMutation::AgentInfo { agent });
        true
    }

    // Commands

    /// Applies the pending mutation. Returns `false` when there was nothing to
    /// apply; an agent selection is not a mutation and stays in place.
    pub fn confirm(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        match pending {
            PendingMutation::SingleAdd { x, z } => {
                let cell = Cell::new(x, z);
                if self.obstacles.add(cell) {
                    info!("Obstacle added at {}", cell.label());
                }
            }
            PendingMutation::SingleRemove { obstacle } => {
                if self.obstacles.remove(&obstacle.id) {
                    info!("Obstacle removed at {}", obstacle.cell().label());
                }
            }
            PendingMutation::MassAdd { cells } => {
                let added = self.obstacles.add_many(&cells);
                info!("Mass add: {added} obstacles");
            }
            PendingMutation::MassRemove { obstacles } => {
                let ids: Vec<&str> = obstacles.iter().map(|o| o.id.as_str()).collect();
                let removed = self.obstacles.remove_many(&ids);
                info!("Mass remove: {removed} obstacles");
            }
            PendingMutation::AgentInfo { agent } => {
                self.pending = Some(PendingMutation::AgentInfo { agent });
                return false;
            }
        }
        true
    }

    /// Drops the pending mutation and agent selection. Placement arming is kept.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn arm_agent_placement(&mut self, kind: Option<AgentType>) {
        if self.placement != kind {
            self.placement = kind;
            if kind.is_some() {
                self.drag.cancel();
            }
            match kind {
                Some(kind) => info!("Placement armed: {}", kind.display_name()),
                None => info!("Placement disarmed"),
            }
        }
    }

    /// Arms `kind`, or disarms if it is already armed.
    pub fn toggle_agent_placement(&mut self, kind: AgentType) {
        let next = if self.placement == Some(kind) { None } else { Some(kind) };
        self.arm_agent_placement(next);
    }

    pub fn remove_agent(&mut self, id: &str) -> bool {
        if !self.agents.remove(id) {
            return false;
        }
        if self.agent_info().is_some_and(|a| a.id == id) {
            self.pending = None;
        }
        info!("Agent '{id}' removed");
        true
    }

    pub fn clear_agents(&mut self) -> usize {
        let removed = self.agents.clear();
        if self.agent_info().is_some() {
            self.pending = None;
        }
        info!("Cleared {removed} agents");
        removed
    }

    /// Sets the board size (clamped) and resets obstacles, agents, the pending
    /// mutation and any drag. Returns the effective size.
    pub fn resize_board(&mut self, size: u32) -> u32 {
        let size = clamp_board_size(size);
        self.config.size = size;
        self.obstacles.clear();
        self.agents.clear();
        self.pending = None;
        self.drag.cancel();
        info!("Board resized to {size}x{size}");
        size
    }

    pub fn set_colors(&mut self, color1: Srgba, color2: Srgba) {
        self.config.color1 = color1;
        self.config.color2 = color2;
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.config.show_labels = show;
    }

    /// Applies a whole configuration, resetting the board like a resize.
    pub fn apply_config(&mut self, config: BoardConfig) {
        self.resize_board(config.size);
        self.set_colors(config.color1, config.color2);
        self.set_show_labels(config.show_labels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn occupied(editor: &BoardEditor) -> HashSet<Cell> {
        editor.obstacles().iter().map(Obstacle::cell).collect()
    }

    fn with_obstacles(cells: &[(u32, u32)]) -> BoardEditor {
        let mut editor = BoardEditor::default();
        for &(x, z) in cells {
            editor.cell_click(Cell::new(x, z));
            editor.confirm();
        }
        editor
    }

    fn drag(editor: &mut BoardEditor, from: (u32, u32), to: (u32, u32)) -> Option<DragOutcome> {
        editor.drag_start(Cell::new(from.0, from.1));
        editor.drag_update(Cell::new(to.0, to.1));
        editor.drag_end()
    }

    #[test]
    fn click_on_empty_cell_then_confirm_adds_one_obstacle() {
        let mut editor = BoardEditor::default();
        assert_eq!(editor.cell_click(Cell::new(2, 3)), ClickOutcome::Pending);
        assert_eq!(
            editor.pending(),
            Some(&PendingMutation::SingleAdd { x: 2, z: 3 })
        );

        assert!(editor.confirm());
        assert!(editor.obstacles().has(Cell::new(2, 3)));
        assert_eq!(editor.obstacles().len(), 1);
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn click_on_obstacle_proposes_removal() {
        let mut editor = with_obstacles(&[(1, 1)]);
        editor.cell_click(Cell::new(1, 1));
        assert_eq!(
            editor.pending(),
            Some(&PendingMutation::SingleRemove {
                obstacle: Obstacle::at(Cell::new(1, 1))
            })
        );

        editor.confirm();
        assert!(editor.obstacles().is_empty());
    }

    #[test]
    fn confirmed_mass_add_fills_exactly_the_listed_cells() {
        let mut editor = with_obstacles(&[(5, 5)]);
        let before = occupied(&editor);

        drag(&mut editor, (0, 0), (1, 1));
        let Some(PendingMutation::MassAdd { cells }) = editor.pending().cloned() else {
            panic!("expected mass add");
        };
        assert!(editor.confirm());

        let after = occupied(&editor);
        assert_eq!(after.len(), before.len() + cells.len());
        let expected: HashSet<Cell> = before.into_iter().chain(cells).collect();
        assert_eq!(after, expected);
    }

    #[test]
    fn drag_from_obstacle_proposes_mass_remove_of_occupied_cells_only() {
        let mut editor = with_obstacles(&[(2, 2), (4, 3), (7, 7)]);
        drag(&mut editor, (2, 2), (4, 4));

        assert_eq!(
            editor.pending(),
            Some(&PendingMutation::MassRemove {
                obstacles: vec![Obstacle::at(Cell::new(2, 2)), Obstacle::at(Cell::new(4, 3))]
            })
        );
        editor.confirm();
        assert_eq!(occupied(&editor), HashSet::from([Cell::new(7, 7)]));
    }

    #[test]
    fn drag_released_on_start_cell_acts_as_click() {
        let mut editor = BoardEditor::default();
        editor.drag_start(Cell::new(3, 3));
        assert_eq!(editor.drag_end(), Some(DragOutcome::Click(Cell::new(3, 3))));
        assert_eq!(
            editor.pending(),
            Some(&PendingMutation::SingleAdd { x: 3, z: 3 })
        );
    }

    #[test]
    fn drag_end_without_drag_changes_nothing() {
        let mut editor = with_obstacles(&[(0, 0)]);
        editor.cell_click(Cell::new(1, 1));
        let pending = editor.pending().cloned();

        assert_eq!(editor.drag_end(), None);
        assert_eq!(editor.pending().cloned(), pending);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut editor = with_obstacles(&[(0, 0)]);
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(1, 1));
        let agent_id = editor.agents().as_slice()[0].id.clone();
        editor.select_agent(&agent_id);

        editor.cancel();
        let once = (editor.pending().cloned(), editor.placement(), occupied(&editor));
        editor.cancel();
        let twice = (editor.pending().cloned(), editor.placement(), occupied(&editor));

        assert_eq!(once, twice);
        assert_eq!(once.0, None);
    }

    #[test]
    fn cancel_keeps_placement_armed() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cancel();
        assert_eq!(editor.placement(), Some(AgentType::Blue));
    }

    #[test]
    fn new_gesture_supersedes_previous_pending_state() {
        let mut editor = with_obstacles(&[(0, 0)]);
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(5, 5));
        let agent_id = editor.agents().as_slice()[0].id.clone();

        editor.cell_click(Cell::new(0, 0));
        assert!(matches!(editor.pending(), Some(PendingMutation::SingleRemove { .. })));

        drag(&mut editor, (1, 1), (2, 2));
        assert!(matches!(editor.pending(), Some(PendingMutation::MassAdd { .. })));

        editor.select_agent(&agent_id);
        assert!(matches!(editor.pending(), Some(PendingMutation::AgentInfo { .. })));
        assert_eq!(editor.agent_info().map(|a| a.id.as_str()), Some(agent_id.as_str()));

        editor.cell_click(Cell::new(3, 3));
        assert_eq!(editor.agent_info(), None);
        assert_eq!(
            editor.pending(),
            Some(&PendingMutation::SingleAdd { x: 3, z: 3 })
        );
    }

    #[test]
    fn placement_on_free_cell_places_and_disarms() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));

        let ClickOutcome::Placed(agent) = editor.cell_click(Cell::new(4, 4)) else {
            panic!("expected placement");
        };
        assert_eq!(agent.cell(), Cell::new(4, 4));
        assert_eq!(agent.kind, AgentType::Blue);
        assert!(editor.agents().has(Cell::new(4, 4)));
        assert_eq!(editor.placement(), None);
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn placement_on_obstacle_is_rejected_and_stays_armed() {
        let mut editor = with_obstacles(&[(3, 3)]);
        editor.arm_agent_placement(Some(AgentType::Blue));

        assert_eq!(editor.cell_click(Cell::new(3, 3)), ClickOutcome::Rejected);
        assert!(editor.agents().is_empty());
        assert_eq!(editor.placement(), Some(AgentType::Blue));
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn placement_on_agent_is_rejected() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(1, 1));
        editor.arm_agent_placement(Some(AgentType::Blue));

        assert_eq!(editor.cell_click(Cell::new(1, 1)), ClickOutcome::Rejected);
        assert_eq!(editor.agents().len(), 1);
    }

    #[test]
    fn drag_is_suppressed_while_placement_armed() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));

        assert!(!editor.drag_start(Cell::new(0, 0)));
        assert_eq!(editor.drag_end(), None);
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn arming_mid_drag_discards_the_range() {
        let mut editor = BoardEditor::default();
        editor.drag_start(Cell::new(0, 0));
        editor.drag_update(Cell::new(2, 2));
        editor.arm_agent_placement(Some(AgentType::Blue));

        assert!(!editor.is_dragging());
        assert_eq!(editor.drag_end(), None);
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn agent_selection_keeps_placement_state() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(0, 0));
        let id = editor.agents().as_slice()[0].id.clone();
        editor.arm_agent_placement(Some(AgentType::Blue));

        assert!(editor.select_agent(&id));
        assert_eq!(editor.placement(), Some(AgentType::Blue));
        assert!(!editor.select_agent("agent-missing"));
    }

    #[test]
    fn confirm_without_pending_or_with_agent_info_is_a_no_op() {
        let mut editor = BoardEditor::default();
        assert!(!editor.confirm());

        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(0, 0));
        let id = editor.agents().as_slice()[0].id.clone();
        editor.select_agent(&id);

        assert!(!editor.confirm());
        assert_eq!(editor.agent_info().map(|a| a.id.clone()), Some(id));
        assert!(editor.obstacles().is_empty());
    }

    #[test]
    fn removing_selected_agent_clears_selection() {
        let mut editor = BoardEditor::default();
        for cell in [Cell::new(0, 0), Cell::new(1, 0)] {
            editor.arm_agent_placement(Some(AgentType::Blue));
            editor.cell_click(cell);
        }
        let ids: Vec<String> = editor.agents().iter().map(|a| a.id.clone()).collect();

        editor.select_agent(&ids[0]);
        assert!(editor.remove_agent(&ids[1]));
        assert!(editor.agent_info().is_some());

        assert!(editor.remove_agent(&ids[0]));
        assert_eq!(editor.agent_info(), None);
        assert!(!editor.remove_agent(&ids[0]));
    }

    #[test]
    fn clear_agents_empties_registry_and_selection() {
        let mut editor = BoardEditor::default();
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(2, 2));
        let id = editor.agents().as_slice()[0].id.clone();
        editor.select_agent(&id);

        assert_eq!(editor.clear_agents(), 1);
        assert!(editor.agents().is_empty());
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn clear_agents_leaves_obstacle_mutation_pending() {
        let mut editor = BoardEditor::default();
        editor.cell_click(Cell::new(1, 1));
        editor.clear_agents();
        assert!(matches!(editor.pending(), Some(PendingMutation::SingleAdd { .. })));
    }

    #[test]
    fn resize_resets_everything() {
        let mut editor = with_obstacles(&[(0, 0), (6, 6)]);
        editor.arm_agent_placement(Some(AgentType::Blue));
        editor.cell_click(Cell::new(3, 3));
        drag(&mut editor, (1, 1), (2, 2));
        editor.drag_start(Cell::new(4, 4));

        assert_eq!(editor.resize_board(12), 12);
        assert!(editor.obstacles().is_empty());
        assert!(editor.agents().is_empty());
        assert_eq!(editor.pending(), None);
        assert!(!editor.is_dragging());
        assert_eq!(editor.config().size, 12);
    }

    #[test]
    fn resize_clamps_requested_size() {
        let mut editor = BoardEditor::default();
        assert_eq!(editor.resize_board(2), 4);
        assert_eq!(editor.resize_board(64), 20);
    }

    #[test]
    fn out_of_bounds_gestures_are_ignored() {
        let mut editor = BoardEditor::default();
        let size = editor.config().size;

        assert_eq!(editor.cell_click(Cell::new(size, 0)), ClickOutcome::Ignored);
        assert!(!editor.drag_start(Cell::new(0, size)));
        assert_eq!(editor.pending(), None);
    }

    #[test]
    fn add_then_remove_round_trip() {
        let mut editor = with_obstacles(&[(1, 2), (3, 4)]);
        let before = occupied(&editor);

        editor.cell_click(Cell::new(5, 5));
        editor.confirm();
        editor.cell_click(Cell::new(5, 5));
        editor.confirm();

        assert_eq!(occupied(&editor), before);
    }

    #[test]
    fn pending_mutation_serialises_with_kind_tag() {
        let json = serde_json::to_value(PendingMutation::SingleAdd { x: 1, z: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "single_add", "x": 1, "z": 2 }));
    }
}

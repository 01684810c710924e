use crate::board::geometry::Cell;
use crate::board::obstacles::{Obstacle, ObstacleRegistry};
use serde::Serialize;

/// Inclusive rectangle of cells spanned by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: Cell,
    pub max: Cell,
}

impl CellRect {
    pub fn spanning(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(a.x.min(b.x), a.z.min(b.z)),
            max: Cell::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.x..=self.max.x).contains(&cell.x) && (self.min.z..=self.max.z).contains(&cell.z)
    }

    /// Cells in column-major order (x outer, z inner).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.x..=self.max.x)
            .flat_map(move |x| (self.min.z..=self.max.z).map(move |z| Cell::new(x, z)))
    }
}

/// Whether a drag paints or erases, decided by its start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    Add,
    Remove,
}

impl RangeMode {
    pub fn for_start(start: Cell, obstacles: &ObstacleRegistry) -> Self {
        if obstacles.has(start) {
            Self::Remove
        } else {
            Self::Add
        }
    }
}

/// Live rectangle of an in-progress drag, used for tile highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub rect: CellRect,
    pub mode: RangeMode,
}

impl DragPreview {
    /// True when `cell` would be affected if the drag ended now.
    pub fn affects(&self, cell: Cell, occupied: bool) -> bool {
        self.rect.contains(cell)
            && match self.mode {
                RangeMode::Add => !occupied,
                RangeMode::Remove => occupied,
            }
    }
}

/// Resolved result of a finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Pointer released on the cell it went down on.
    Click(Cell),
    /// Empty cells of the rectangle, start cell was empty.
    AddRange(Vec<Cell>),
    /// Obstacles inside the rectangle, start cell was occupied.
    RemoveRange(Vec<Obstacle>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging { start: Cell, end: Cell },
}

/// Pointer-down / pointer-enter / pointer-up tracker over grid cells.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn begin(&mut self, cell: Cell) {
        self.state = DragState::Dragging {
            start: cell,
            end: cell,
        };
    }

    /// Moves the drag end. Returns `true` when the end actually changed.
    pub fn update(&mut self, cell: Cell) -> bool {
        match &mut self.state {
            DragState::Dragging { end, .. } if *end != cell => {
                *end = cell;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn preview(&self, obstacles: &ObstacleRegistry) -> Option<DragPreview> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { start, end } => Some(DragPreview {
                rect: CellRect::spanning(start, end),
                mode: RangeMode::for_start(start, obstacles),
            }),
        }
    }

    /// Ends the drag and returns to idle. `None` when no drag was in progress
    /// or the filtered range came out empty.
    pub fn finish(&mut self, obstacles: &ObstacleRegistry) -> Option<DragOutcome> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { start, end } => classify_drag(start, end, obstacles),
        }
    }
}

/// Turns a start/end pair into a click or a filtered range.
pub fn classify_drag(start: Cell, end: Cell, obstacles: &ObstacleRegistry) -> Option<DragOutcome> {
    if start == end {
        return Some(DragOutcome::Click(start));
    }

    let rect = CellRect::spanning(start, end);
    match RangeMode::for_start(start, obstacles) {
        RangeMode::Remove => {
            let hits: Vec<Obstacle> = rect
                .cells()
                .filter_map(|cell| obstacles.get(cell).cloned())
                .collect();
            (!hits.is_empty()).then_some(DragOutcome::RemoveRange(hits))
        }
        RangeMode::Add => {
            let empty: Vec<Cell> = rect.cells().filter(|&cell| !obstacles.has(cell)).collect();
            (!empty.is_empty()).then_some(DragOutcome::AddRange(empty))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(cells: &[(u32, u32)]) -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::default();
        for &(x, z) in cells {
            registry.add(Cell::new(x, z));
        }
        registry
    }

    #[test]
    fn drag_from_occupied_cell_removes_only_obstacles() {
        let obstacles = registry(&[(2, 2)]);
        let outcome = classify_drag(Cell::new(2, 2), Cell::new(4, 4), &obstacles);

        assert_eq!(
            outcome,
            Some(DragOutcome::RemoveRange(vec![Obstacle::at(Cell::new(2, 2))]))
        );
    }

    #[test]
    fn drag_over_empty_cells_adds_whole_rectangle() {
        let obstacles = ObstacleRegistry::default();
        let outcome = classify_drag(Cell::new(0, 0), Cell::new(1, 1), &obstacles);

        assert_eq!(
            outcome,
            Some(DragOutcome::AddRange(vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1),
            ]))
        );
    }

    #[test]
    fn add_range_skips_occupied_cells_and_handles_reversed_corners() {
        let obstacles = registry(&[(1, 0)]);
        let outcome = classify_drag(Cell::new(1, 1), Cell::new(0, 0), &obstacles);

        assert_eq!(
            outcome,
            Some(DragOutcome::AddRange(vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
            ]))
        );
    }

    #[test]
    fn remove_range_collects_obstacles_column_major() {
        let obstacles = registry(&[(3, 0), (1, 2), (1, 0), (5, 5)]);
        let outcome = classify_drag(Cell::new(1, 0), Cell::new(3, 2), &obstacles);

        assert_eq!(
            outcome,
            Some(DragOutcome::RemoveRange(vec![
                Obstacle::at(Cell::new(1, 0)),
                Obstacle::at(Cell::new(1, 2)),
                Obstacle::at(Cell::new(3, 0)),
            ]))
        );
    }

    #[test]
    fn same_start_and_end_is_a_click() {
        let mut tracker = DragTracker::default();
        tracker.begin(Cell::new(3, 3));
        assert_eq!(
            tracker.finish(&ObstacleRegistry::default()),
            Some(DragOutcome::Click(Cell::new(3, 3)))
        );
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn finish_without_drag_is_silent() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.finish(&ObstacleRegistry::default()), None);
        assert!(!tracker.update(Cell::new(1, 1)));
    }

    #[test]
    fn update_tracks_latest_end() {
        let mut tracker = DragTracker::default();
        tracker.begin(Cell::new(0, 0));
        assert!(tracker.update(Cell::new(2, 0)));
        assert!(!tracker.update(Cell::new(2, 0)));
        assert!(tracker.update(Cell::new(2, 1)));

        let outcome = tracker.finish(&ObstacleRegistry::default());
        let Some(DragOutcome::AddRange(cells)) = outcome else {
            panic!("expected add range, got {outcome:?}");
        };
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn preview_mode_follows_start_cell() {
        let obstacles = registry(&[(0, 0), (1, 1)]);
        let mut tracker = DragTracker::default();
        tracker.begin(Cell::new(0, 0));
        tracker.update(Cell::new(1, 1));

        let preview = tracker.preview(&obstacles).unwrap();
        assert_eq!(preview.mode, RangeMode::Remove);
        assert!(preview.affects(Cell::new(1, 1), true));
        assert!(!preview.affects(Cell::new(0, 1), false));
        assert!(!preview.affects(Cell::new(2, 2), true));
    }
}

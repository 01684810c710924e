use super::geometry::Cell;
use serde::{Deserialize, Serialize};

/// A cube occupying one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub x: u32,
    pub z: u32,
}

impl Obstacle {
    pub fn at(cell: Cell) -> Self {
        Self {
            id: obstacle_id(cell),
            x: cell.x,
            z: cell.z,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.z)
    }
}

/// Stable id for the obstacle at `cell`.
pub fn obstacle_id(cell: Cell) -> String {
    format!("{}-{}", cell.x, cell.z)
}

/// Occupied cells, in insertion order. At most one obstacle per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn has(&self, cell: Cell) -> bool {
        self.obstacles.iter().any(|o| o.x == cell.x && o.z == cell.z)
    }

    pub fn get(&self, cell: Cell) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.x == cell.x && o.z == cell.z)
    }

    /// Adds an obstacle at `cell`. Returns `false` if the cell was already occupied.
    pub fn add(&mut self, cell: Cell) -> bool {
        if self.has(cell) {
            return false;
        }
        self.obstacles.push(Obstacle::at(cell));
        true
    }

    /// Bulk [`add`](Self::add). Returns the number of obstacles created.
    pub fn add_many(&mut self, cells: &[Cell]) -> usize {
        cells.iter().filter(|&&cell| self.add(cell)).count()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.id != id);
        self.obstacles.len() != before
    }

    /// Removes every obstacle whose id is listed. Unknown ids are skipped.
    pub fn remove_many<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|o| !ids.iter().any(|id| id.as_ref() == o.id));
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

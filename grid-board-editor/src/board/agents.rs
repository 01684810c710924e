use super::geometry::Cell;
use serde::{Deserialize, Serialize};

/// Placeable agent kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Blue,
}

impl AgentType {
    /// Parse the wire identifier used by the RPC bridge.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue Agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub x: u32,
    pub z: u32,
    #[serde(rename = "type")]
    pub kind: AgentType,
}

impl Agent {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.z)
    }
}

/// Placed agents. Ids come from a session counter that is never reset, so an
/// id is not reused after `clear`.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    next_id: u64,
}

impl AgentRegistry {
    /// Creates an agent at `cell`. The caller checks the cell is free.
    pub fn add(&mut self, cell: Cell, kind: AgentType) -> Agent {
        self.next_id += 1;
        let agent = Agent {
            id: format!("agent-{}", self.next_id),
            x: cell.x,
            z: cell.z,
            kind,
        };
        self.agents.push(agent.clone());
        agent
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.agents.len();
        self.agents.retain(|a| a.id != id);
        self.agents.len() != before
    }

    pub fn clear(&mut self) -> usize {
        let count = self.agents.len();
        self.agents.clear();
        count
    }

    pub fn has(&self, cell: Cell) -> bool {
        self.agents.iter().any(|a| a.x == cell.x && a.z == cell.z)
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_stay_unique_across_clear() {
        let mut registry = AgentRegistry::default();
        let first = registry.add(Cell::new(0, 0), AgentType::Blue);
        registry.clear();
        let second = registry.add(Cell::new(0, 0), AgentType::Blue);

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn remove_by_id() {
        let mut registry = AgentRegistry::default();
        let a = registry.add(Cell::new(1, 2), AgentType::Blue);
        let b = registry.add(Cell::new(3, 4), AgentType::Blue);

        assert!(registry.remove(&a.id));
        assert!(!registry.remove(&a.id));
        assert!(!registry.has(Cell::new(1, 2)));
        assert_eq!(registry.get(&b.id), Some(&b));
    }

    #[test]
    fn agent_type_wire_names() {
        assert_eq!(AgentType::from_string("Blue"), Some(AgentType::Blue));
        assert_eq!(AgentType::from_string("red"), None);
        assert_eq!(
            serde_json::to_value(AgentType::Blue).unwrap(),
            serde_json::json!("blue")
        );
    }
}

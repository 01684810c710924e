use bevy::color::Srgba;
use serde::Serialize;

use crate::board::agents::{Agent, AgentType};
use crate::board::obstacles::Obstacle;
use crate::tools::interaction::{BoardEditor, PendingMutation};

/// Full editor state as sent to the frontend.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub size: u32,
    pub color1: String,
    pub color2: String,
    pub show_labels: bool,
    pub obstacles: Vec<Obstacle>,
    pub agents: Vec<Agent>,
    pub pending: Option<PendingMutation>,
    pub placement: Option<AgentType>,
    pub dragging: bool,
}

fn hex(color: Srgba) -> String {
    color.to_hex().to_lowercase()
}

impl BoardSnapshot {
    pub fn capture(editor: &BoardEditor) -> Self {
        let config = editor.config();
        Self {
            size: config.size,
            color1: hex(config.color1),
            color2: hex(config.color2),
            show_labels: config.show_labels,
            obstacles: editor.obstacles().as_slice().to_vec(),
            agents: editor.agents().as_slice().to_vec(),
            pending: editor.pending().cloned(),
            placement: editor.placement(),
            dragging: editor.is_dragging(),
        }
    }
}

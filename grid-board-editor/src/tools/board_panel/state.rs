use bevy::prelude::*;

use crate::board::geometry::Cell;
use crate::tools::interaction::PendingMutation;

// Resources
#[derive(Resource)]
pub struct BoardPanelUiState {
    pub settings_collapsed: bool,
    pub agents_collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for BoardPanelUiState {
    fn default() -> Self {
        Self {
            settings_collapsed: false,
            agents_collapsed: false,
            open_width: 280.0,
            closed_width: 32.0,
        }
    }
}

impl BoardPanelUiState {
    pub fn collapsed(&self, side: PanelSide) -> bool {
        match side {
            PanelSide::Settings => self.settings_collapsed,
            PanelSide::Agents => self.agents_collapsed,
        }
    }

    pub fn toggle(&mut self, side: PanelSide) {
        match side {
            PanelSide::Settings => self.settings_collapsed = !self.settings_collapsed,
            PanelSide::Agents => self.agents_collapsed = !self.agents_collapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Settings,
    Agents,
}

/// Which tile colour a swatch writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Primary,
    Secondary,
}

/// What a panel button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    ToggleCollapse(PanelSide),
    ResizeStep(i32),
    ToggleLabels,
    SetColor(ColorSlot, &'static str),
    ToggleBlueAgent,
    RemoveAllAgents,
    /// Confirms the pending mutation, or removes the agent shown in the dialog.
    DialogPrimary,
    Cancel,
}

// Components
#[derive(Component)]
pub struct PanelRoot(pub PanelSide);
#[derive(Component)]
pub struct PanelBody(pub PanelSide);
#[derive(Component)]
pub struct PanelTitle(pub PanelSide);
#[derive(Component)]
pub struct CollapseLabel(pub PanelSide);
#[derive(Component)]
pub struct SizeLabel;
#[derive(Component)]
pub struct LabelsToggleLabel;
#[derive(Component)]
pub struct AgentCountText;
#[derive(Component)]
pub struct BlueAgentLabel;
#[derive(Component)]
pub struct DialogRoot;
#[derive(Component)]
pub struct DialogTitle;
#[derive(Component)]
pub struct DialogBody;
#[derive(Component)]
pub struct DialogButtonLabel(pub DialogButton);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Primary,
    Secondary,
}

/// Text of the confirmation dialog for the current pending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogContent {
    pub title: String,
    pub body: String,
    pub primary: &'static str,
    pub secondary: &'static str,
    /// Agent dialogs remove the agent instead of confirming a mutation.
    pub agent: bool,
}

pub fn dialog_content(pending: Option<&PendingMutation>) -> Option<DialogContent> {
    let content = match pending? {
        PendingMutation::SingleAdd { x, z } => DialogContent {
            title: "Add obstacle?".into(),
            body: format!("Add obstacle at {}?", Cell::new(*x, *z).label()),
            primary: "Confirm",
            secondary: "Cancel",
            agent: false,
        },
        PendingMutation::SingleRemove { obstacle } => DialogContent {
            title: "Remove obstacle?".into(),
            body: format!("Remove obstacle at {}?", obstacle.cell().label()),
            primary: "Confirm",
            secondary: "Cancel",
            agent: false,
        },
        PendingMutation::MassAdd { cells } => DialogContent {
            title: "Fill area?".into(),
            body: format!("Fill {} cells?", cells.len()),
            primary: "Confirm",
            secondary: "Cancel",
            agent: false,
        },
        PendingMutation::MassRemove { obstacles } => DialogContent {
            title: "Clear area?".into(),
            body: format!("Remove {} obstacles?", obstacles.len()),
            primary: "Remove all",
            secondary: "Cancel",
            agent: false,
        },
        PendingMutation::AgentInfo { agent } => DialogContent {
            title: agent.kind.display_name().into(),
            body: format!(
                "Type: {}\nPosition: {}\nId: {}",
                agent.kind.as_str(),
                agent.cell().label(),
                agent.id
            ),
            primary: "Remove agent",
            secondary: "Close",
            agent: true,
        },
    };
    Some(content)
}

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the board settings asset.
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

pub fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("→ Board configured, transitioning to Running state");
    next_state.set(AppState::Running);
}

use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::board::SETTINGS_ASSET_PATH;

use crate::board::config::{BoardConfig, BoardSettings};
use crate::tools::interaction::BoardEditor;

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<BoardSettings>>,
    applied: bool,
}

impl SettingsLoader {
    pub fn is_applied(&self) -> bool {
        self.applied
    }
}

pub fn start_loading(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_ASSET_PATH));
}

/// Applies the settings asset to the editor once it resolves. A missing or
/// malformed file falls back to the built-in defaults.
pub fn apply_loaded_settings(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings: Res<Assets<BoardSettings>>,
    mut editor: ResMut<BoardEditor>,
) {
    if loader.applied {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    let config = if let Some(loaded) = settings.get(&handle) {
        match loaded.to_config() {
            Ok(config) => {
                info!("✓ Board settings loaded from {}", SETTINGS_ASSET_PATH);
                config
            }
            Err(err) => {
                warn!("Board settings rejected ({err}), using defaults");
                BoardConfig::default()
            }
        }
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Board settings unavailable ({err}), using defaults");
        BoardConfig::default()
    } else {
        return;
    };

    editor.apply_config(config);
    loader.applied = true;
}

pub fn settings_applied(loader: Res<SettingsLoader>) -> bool {
    loader.is_applied()
}

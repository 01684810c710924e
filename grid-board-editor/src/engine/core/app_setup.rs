use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Board model
use crate::board::config::BoardSettings;
// Crate engine modules
use crate::engine::camera::viewport_camera::{camera_controller, spawn_viewport_camera};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::settings_loader::{
    SettingsLoader, apply_loaded_settings, settings_applied, start_loading,
};
use crate::engine::scene::{
    agents::{animate_agents, sync_agent_tokens},
    handles::{SceneHandles, spawn_lighting},
    labels::{project_screen_anchors, spawn_label_root, sync_coordinate_labels},
    obstacles::sync_obstacle_cubes,
    tiles::sync_board_tiles,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
// Crate tools modules
use crate::tools::{
    board_panel::BoardPanelPlugin,
    gestures::{PointerCapture, handle_pointer_gestures, update_pointer_capture},
    interaction::BoardEditor,
    shortcuts::handle_board_shortcuts,
};
// Web RPC
use crate::rpc::web_rpc::{RpcSystems, WebRpcPlugin};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::{core::app_state::FpsText, systems::fps_tracking::fps_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers BoardSettings as a loadable asset from *.settings.json files.
        .add_plugins(JsonAssetPlugin::<BoardSettings>::new(&["settings.json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(BoardPanelPlugin);

    // Initialise resources early
    app.init_resource::<BoardEditor>()
        .init_resource::<SettingsLoader>()
        .init_resource::<PointerCapture>()
        .init_resource::<SceneHandles>();

    // State-based system scheduling
    app.add_systems(Startup, (spawn_lighting, start_loading))
        .add_systems(
            Update,
            (
                apply_loaded_settings,
                transition_to_running.run_if(settings_applied),
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_viewport_camera, spawn_label_root),
        );

    // Input first, then reconcile the scene against the editor.
    let input_systems = (
        update_pointer_capture,
        handle_board_shortcuts, // Native shortcuts or no-op for WASM
        handle_pointer_gestures,
        camera_controller,
    )
        .chain();

    let scene_systems = (
        sync_board_tiles,
        sync_obstacle_cubes,
        sync_agent_tokens,
        sync_coordinate_labels,
        animate_agents,
        project_screen_anchors,
    )
        .chain();

    app.add_systems(
        Update,
        (input_systems, scene_systems, fps_notification_system)
            .chain()
            .before(RpcSystems)
            .run_if(in_state(AppState::Running)),
    );

    // FPS overlay only for native builds; the host page shows fps_update.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlays)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(mut commands: Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Percent(50.0),
            ..default()
        },
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

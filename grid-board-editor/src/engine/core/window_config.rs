use bevy::prelude::*;
use bevy::window::PresentMode;

/// Primary window for the editor. On wasm32 the app renders into the `#bevy`
/// canvas supplied by the host page and follows its parent's size.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Grid Board Editor".into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Grid Board Editor".into(),
            resolution: (1280.0, 800.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

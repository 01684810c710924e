use bevy::prelude::*;

/// Default tile colours (light and dark grass).
pub const DEFAULT_COLOR_1: &str = "#6dc83c";
pub const DEFAULT_COLOR_2: &str = "#409136";

/// Swatches offered by the native settings panel.
pub const COLOR_SWATCHES: &[&str] = &[
    "#6dc83c", "#409136", "#f0d9b5", "#b58863", "#e2e8f0", "#334155", "#60a5fa", "#1e3a8a",
];

pub const OBSTACLE_COLOR: Color = Color::srgb(0.545, 0.271, 0.075);

pub const AGENT_BLUE_COLOR: Color = Color::srgb(0.231, 0.510, 0.965);
pub const AGENT_BLUE_EMISSIVE: LinearRgba = LinearRgba::new(0.023, 0.047, 0.138, 1.0);
/// Emissive for the agent open in the info dialog.
pub const AGENT_SELECTED_EMISSIVE: LinearRgba = LinearRgba::new(0.14, 0.28, 0.83, 1.0);

/// Drag preview emissive for cells an add-range would fill.
pub const HIGHLIGHT_ADD: LinearRgba = LinearRgba::new(0.08, 0.06, 0.40, 1.0);
/// Drag preview emissive for obstacles a remove-range would clear.
pub const HIGHLIGHT_REMOVE: LinearRgba = LinearRgba::new(0.43, 0.06, 0.06, 1.0);

pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const POINT_LIGHT_INTENSITY: f32 = 2_000_000.0;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;
/// Highest pitch below the horizon; keeps the camera above the board.
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

pub const AGENT_BOB_AMPLITUDE: f32 = 0.05;
pub const AGENT_BOB_SPEED: f32 = 2.0;
pub const AGENT_SPIN_SPEED: f32 = 0.6;

pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;

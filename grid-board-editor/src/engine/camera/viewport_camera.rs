use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use constants::render_settings::{
    CAMERA_FOV_DEGREES, CAMERA_MAX_DISTANCE, CAMERA_MAX_POLAR, CAMERA_MIN_DISTANCE,
};

use crate::tools::gestures::PointerCapture;
use crate::tools::interaction::BoardEditor;

/// Steepest downward pitch; just short of looking straight down.
const MIN_PITCH: f32 = -1.55;
/// Shallowest pitch. Keeps the eye above the board plane.
const MAX_PITCH: f32 = -(std::f32::consts::FRAC_PI_2 - CAMERA_MAX_POLAR);

#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub smooth_factor: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: 20.0,
            pitch: -0.6,
            yaw: 0.0,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            smooth_factor: 12.0,
        }
    }
}

impl ViewportCamera {
    /// Frames a board of `size` cells: eye at `(0, size*1.5, size*2)` looking
    /// at the origin.
    pub fn for_board(size: u32) -> Self {
        let eye = Vec3::new(0.0, size as f32 * 1.5, size as f32 * 2.0);
        let mut camera = Self::default();
        camera.frame(eye, Vec3::ZERO);
        camera
    }

    /// Resets the orbit so the eye sits at `eye` looking at `focus`.
    pub fn frame(&mut self, eye: Vec3, focus: Vec3) {
        let offset = eye - focus;
        self.focus_point = focus;
        self.distance = offset
            .length()
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (-offset.y)
            .atan2(offset.xz().length())
            .clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.rotation() * (Vec3::Z * self.distance)
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.rotate_sensitivity;
        self.pitch = (self.pitch - delta.y * self.rotate_sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Moves the focus in the camera's screen plane, scaled by distance.
    pub fn pan(&mut self, delta: Vec2) {
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let scale = self.distance * 0.0015;
        self.focus_point += (-right * delta.x + up * delta.y) * scale;
    }

    /// Positive `amount` zooms in.
    pub fn zoom(&mut self, amount: f32) {
        let factor = (1.0 - amount * self.zoom_sensitivity).max(0.1);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }
}

pub fn spawn_viewport_camera(mut commands: Commands, editor: Res<BoardEditor>) {
    let viewport = ViewportCamera::for_board(editor.config().size);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(viewport.eye()).looking_at(viewport.focus_point, Vec3::Y),
    ));
    commands.insert_resource(viewport);
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    capture: Res<PointerCapture>,
    editor: Res<BoardEditor>,
    mut framed_size: Local<Option<u32>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let size = editor.config().size;
    if framed_size.is_some_and(|framed| framed != size) {
        let framed = ViewportCamera::for_board(size);
        viewport.frame(framed.eye(), framed.focus_point);
    }
    *framed_size = Some(size);

    let delta = mouse_motion.delta;
    if delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Right) {
            viewport.orbit(delta);
        } else if mouse_button.pressed(MouseButton::Middle) {
            viewport.pan(delta);
        }
    }

    // Wheel over a panel belongs to the panel.
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll.abs() > f32::EPSILON && !capture.over_ui {
        viewport.zoom(scroll);
    }

    let target_pos = viewport.eye();
    let target_rot = viewport.rotation();
    let lerp_speed = (viewport.smooth_factor * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}

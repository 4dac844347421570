use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

pub struct OrbitCameraPlugin;

/// Label for the orbit input system so apps can order it against their own
/// pointer handling.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrbitCameraSet;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, orbit_camera_system.in_set(OrbitCameraSet));
    }
}

/// Settings component placed on the camera entity to enable turntable controls.
///
/// Controls:
/// - Left-click + drag: orbit around the focus point (yaw/pitch)
/// - Right-click + drag: pan the focus point (view-relative)
/// - Scroll wheel: zoom in/out (clamped radius)
///
/// The camera transform is only written in response to input; spawn the camera
/// with [`OrbitCamera::transform`] so the first frame already matches.
#[derive(Component)]
pub struct OrbitCamera {
    /// Point the camera orbits around and looks at.
    pub focus: Vec3,
    /// Distance from the focus point.
    pub radius: f32,
    /// Azimuth around world Y (radians).
    pub yaw: f32,
    /// Elevation above the ground plane (radians).
    pub pitch: f32,
    /// Orbit sensitivity (radians per pixel).
    pub sensitivity: f32,
    /// Pan sensitivity (units per pixel at radius 1).
    pub pan_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Lowest elevation; keeps the camera from diving under the table.
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Whether orbit controls are enabled. Set to false while a drag gesture
    /// owns the pointer.
    pub enabled: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 3.8, 5.2), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Orbit state whose pose matches a camera at `eye` looking at `focus`.
    pub fn looking_from(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let radius = offset.length().max(1e-3);
        Self {
            focus,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            sensitivity: 0.005,
            pan_sensitivity: 0.002,
            min_radius: 2.2,
            max_radius: 10.0,
            min_pitch: std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 2.05,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            enabled: true,
        }
    }

    /// Camera transform for the current orbit state.
    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        let eye = self.focus + rotation * Vec3::new(0.0, 0.0, self.radius);
        Transform::from_translation(eye).looking_at(self.focus, Vec3::Y)
    }
}

fn orbit_camera_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let mut mouse_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        mouse_delta += motion.delta;
    }
    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.01,
        };
    }

    for (mut settings, mut transform) in &mut camera_query {
        if !settings.enabled {
            continue;
        }

        let mut moved = false;

        if mouse_delta != Vec2::ZERO {
            if mouse.pressed(MouseButton::Left) {
                settings.yaw -= mouse_delta.x * settings.sensitivity;
                settings.pitch = (settings.pitch + mouse_delta.y * settings.sensitivity)
                    .clamp(settings.min_pitch, settings.max_pitch);
                moved = true;
            } else if mouse.pressed(MouseButton::Right) {
                let right = transform.right().as_vec3();
                let up = transform.up().as_vec3();
                let scale = settings.pan_sensitivity * settings.radius;
                settings.focus += (up * mouse_delta.y - right * mouse_delta.x) * scale;
                moved = true;
            }
        }

        if scroll != 0.0 {
            settings.radius = (settings.radius * (1.0 - scroll * 0.1))
                .clamp(settings.min_radius, settings.max_radius);
            moved = true;
        }

        if moved {
            *transform = settings.transform();
        }
    }
}

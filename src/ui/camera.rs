use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, camera_control_system);
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);

    let eye = Vec3::new(3.0, 3.0, 3.0);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::looking_from(eye, Vec3::ZERO),
    ));
}

/// Orbit state. Input moves the targets; the camera eases towards them.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    focus: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_focus: Vec3,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
const MIN_DISTANCE: f32 = 0.2;
const MAX_DISTANCE: f32 = 60.0;
// per second
const DAMPING: f32 = 8.0;

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length().max(MIN_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = -(offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            focus,
            yaw,
            pitch,
            distance,
            target_focus: focus,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
        }
    }

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn translation(&self) -> Vec3 {
        self.focus + self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    fn orbit(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * 0.005;
        self.target_pitch = (self.target_pitch - delta.y * 0.005).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn pan(&mut self, delta: Vec2) {
        let rotation = self.rotation();
        let speed = self.distance * 0.002;
        self.target_focus += (rotation * Vec3::NEG_X * delta.x + rotation * Vec3::Y * delta.y) * speed;
    }

    fn zoom(&mut self, amount: f32) {
        self.target_distance =
            (self.target_distance * (1.0 - amount * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn ease(&mut self, dt: f32) {
        let k = 1.0 - (-DAMPING * dt).exp();
        self.focus = self.focus.lerp(self.target_focus, k);
        self.yaw += (self.target_yaw - self.yaw) * k;
        self.pitch += (self.target_pitch - self.pitch) * k;
        self.distance += (self.target_distance - self.distance) * k;
    }
}

fn camera_control_system(
    mut contexts: EguiContexts,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let motion: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    let scroll: f32 = scroll_evr
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.02,
        })
        .sum();

    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    let ctx = contexts.ctx_mut();
    if !(ctx.is_pointer_over_area() || ctx.wants_pointer_input()) {
        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.orbit(motion);
        }
        if mouse_buttons.pressed(MouseButton::Right) {
            orbit.pan(motion);
        }
        if scroll != 0.0 {
            orbit.zoom(scroll);
        }
    }

    orbit.ease(time.delta_secs());
    transform.translation = orbit.translation();
    transform.look_at(orbit.focus, Vec3::Y);
}

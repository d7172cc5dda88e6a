use glam::{Vec2, Vec3};

use crate::config::OrbitConfig;
use crate::scene::Camera;

/// Pointer state for one frame, already translated from host events.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitInput {
    /// Cursor movement in pixels since the last frame.
    pub cursor_delta: Vec2,
    /// Wheel movement; positive zooms in.
    pub scroll_delta: f32,
    pub rotating: bool,
    pub panning: bool,
    pub screen_height: f32,
}

/// Orbits the default camera around a pivot, with optional damping.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub settings: OrbitConfig,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    /// Starts orbiting `center` from `position`.
    #[must_use]
    pub fn new(position: Vec3, center: Vec3, settings: OrbitConfig) -> Self {
        let offset = position - center;
        let radius = offset.length().max(f32::EPSILON);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            enabled: true,
            settings,
            center,
            radius,
            theta,
            phi,
            rotate_delta: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, camera: &mut Camera, input: &OrbitInput, dt: f32) {
        const EPS: f32 = 0.0001;

        if !self.enabled {
            return;
        }

        let screen_height = input.screen_height.max(1.0);

        if input.rotating {
            let rotate_per_pixel = std::f32::consts::TAU / screen_height;
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.settings.rotate_speed;
        }

        if self.settings.enable_damping {
            // Frame-rate independent: the factor is tuned for 60 Hz.
            let retention = (1.0 - self.settings.damping_factor).powf(dt * 60.0);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);

        if input.scroll_delta != 0.0 {
            let scale = (1.0 - self.settings.zoom_speed).powf(input.scroll_delta.abs());
            if input.scroll_delta > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self
                .radius
                .clamp(self.settings.min_distance, self.settings.max_distance);
        }

        let direction = self.direction();

        if input.panning {
            let world_height = 2.0 * self.radius * (camera.fov / 2.0).tan();
            let pixels_to_world = world_height / screen_height;

            let forward = -direction;
            let right = forward.cross(Vec3::Y).normalize();
            let up = right.cross(forward).normalize();

            let pan = right * -input.cursor_delta.x + up * input.cursor_delta.y;
            self.center += pan * pixels_to_world;
        }

        camera.position = self.center + direction * self.radius;
        camera.look_at(self.center, Vec3::Y);
    }

    fn direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_keeps_start_position() {
        let start = Vec3::new(0.0, 1.0, 7.0);
        let pivot = Vec3::new(0.0, 1.0, 0.0);
        let mut controls = OrbitControls::new(start, pivot, OrbitConfig::default());
        let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 500.0);

        controls.update(&mut camera, &OrbitInput::default(), 1.0 / 60.0);

        assert!((camera.position - start).length() < 1e-4);
    }

    #[test]
    fn disabled_controls_leave_camera_alone() {
        let mut controls =
            OrbitControls::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, OrbitConfig::default());
        controls.enabled = false;
        let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 500.0);
        camera.position = Vec3::new(9.0, 9.0, 9.0);

        let input = OrbitInput {
            scroll_delta: 3.0,
            ..OrbitInput::default()
        };
        controls.update(&mut camera, &input, 1.0 / 60.0);

        assert_eq!(camera.position, Vec3::new(9.0, 9.0, 9.0));
    }
}

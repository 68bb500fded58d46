//! Orbit-style camera control with optional damping.
//!
//! Pointer drags accumulate rotate/pan deltas; [`OrbitControls::update`]
//! applies them (a fraction per frame when damping is on), re-aims the camera
//! at the target, and reports whether the camera moved. Wheel input is not
//! handled here: depth changes go through the zoom policy in
//! [`crate::safety`].

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::SceneCamera;
use crate::constants::{ORBIT_DAMPING_FACTOR, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED};

const MOVE_EPS: f32 = 1e-6;
const POLE_EPS: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    last_position: Option<Vec3>,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            last_position: None,
        }
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= 2.0 * PI * dx / h * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / h * self.rotate_speed;
    }

    /// Queue a screen-space pan from a pointer drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &dyn SceneCamera) {
        let h = viewport_height.max(1.0);
        let offset = camera.position() - self.target;
        let distance = offset.length().max(MOVE_EPS);
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        // world units per pixel at the target plane (unit fov approximation)
        let scale = 2.0 * distance / h * self.pan_speed;
        self.pan_offset += (-right * dx + up * dy) * scale;
    }

    /// True while queued motion is still being applied.
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > MOVE_EPS
            || self.delta_phi.abs() > MOVE_EPS
            || self.pan_offset.length_squared() > MOVE_EPS * MOVE_EPS
    }

    /// Apply queued motion to `camera`. Returns true when the camera moved
    /// since the last reported change.
    pub fn update(&mut self, camera: &mut dyn SceneCamera) -> bool {
        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.target += self.pan_offset * factor;
        let mut position = camera.position() + self.pan_offset * factor;

        let offset = position - self.target;
        let radius = offset.length();
        if radius > MOVE_EPS {
            let theta = offset.x.atan2(offset.z) + self.delta_theta * factor;
            let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
            let on_pole = !(POLE_EPS..=PI - POLE_EPS).contains(&phi);
            // Nothing queued and off the poles: leave the position bit-exact.
            if self.delta_theta != 0.0 || self.delta_phi != 0.0 || on_pole {
                let phi = (phi + self.delta_phi * factor).clamp(POLE_EPS, PI - POLE_EPS);
                let sin_phi = phi.sin();
                position = self.target
                    + Vec3::new(
                        radius * sin_phi * theta.sin(),
                        radius * phi.cos(),
                        radius * sin_phi * theta.cos(),
                    );
            }
        }

        camera.set_position(position);
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
            if !self.is_settling() {
                self.delta_theta = 0.0;
                self.delta_phi = 0.0;
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }

        let moved = match self.last_position {
            Some(last) => last.distance_squared(position) > MOVE_EPS,
            None => true,
        };
        if moved {
            self.last_position = Some(position);
        }
        moved
    }
}

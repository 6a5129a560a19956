//! Orbit camera with pointer parallax.
//!
//! The camera orbits the tree under normal mouse control, and additionally
//! sways toward the gesture pointer for a subtle parallax response. The
//! pointer's influence is itself a smoothed scalar: when the tracker loses
//! the subject, the pointer freezes upstream and the influence fades to
//! zero here, so losing the hand never snaps the view.

use crate::{Vec2, Vec3};
use glam::Mat4;

/// How quickly the sway chases the pointer, per second.
const SWAY_RATE: f32 = 3.0;
/// How quickly pointer influence fades in/out on detection change.
const INFLUENCE_FADE_RATE: f32 = 2.0;
/// Parallax deflection at full pointer swing, radians.
const MAX_SWAY_YAW: f32 = 0.35;
const MAX_SWAY_PITCH: f32 = 0.18;

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    sway: Vec2,
    influence: f32,
}

impl Camera {
    /// Default framing: far enough back to hold the whole tree.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.12,
            distance: 16.0,
            target: Vec3::new(0.0, 4.6, 0.0),
            sway: Vec2::ZERO,
            influence: 0.0,
        }
    }

    /// Feed the latest pointer signal.
    ///
    /// `pointer` is the adapter's scaled last-known position; `detected`
    /// gates the influence envelope rather than the position itself.
    pub fn apply_pointer(&mut self, pointer: Vec2, detected: bool, dt: f32) {
        let step = (SWAY_RATE * dt.max(0.0)).min(1.0);
        self.sway += (pointer - self.sway) * step;

        let goal = if detected { 1.0 } else { 0.0 };
        let fade = (INFLUENCE_FADE_RATE * dt.max(0.0)).min(1.0);
        self.influence += (goal - self.influence) * fade;
    }

    /// Current parallax weight, 0 (no tracking) to 1 (fully tracked).
    pub fn influence(&self) -> f32 {
        self.influence
    }

    /// Eye position including parallax sway.
    pub fn position(&self) -> Vec3 {
        let yaw = self.yaw + self.sway.x * self.influence * MAX_SWAY_YAW;
        let pitch =
            (self.pitch + self.sway.y * self.influence * MAX_SWAY_PITCH).clamp(-1.5, 1.5);
        let x = self.distance * pitch.cos() * yaw.sin();
        let y = self.distance * pitch.sin();
        let z = self.distance * pitch.cos() * yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_influence_rises_while_detected() {
        let mut camera = Camera::new();
        for _ in 0..120 {
            camera.apply_pointer(Vec2::new(0.4, 0.1), true, 1.0 / 60.0);
        }
        assert!(camera.influence() > 0.9);
    }

    #[test]
    fn test_influence_fades_instead_of_snapping_on_loss() {
        let mut camera = Camera::new();
        for _ in 0..120 {
            camera.apply_pointer(Vec2::new(0.4, 0.1), true, 1.0 / 60.0);
        }
        let before = camera.influence();
        camera.apply_pointer(Vec2::new(0.4, 0.1), false, 1.0 / 60.0);
        let after = camera.influence();
        assert!(after < before);
        assert!(after > 0.8, "influence must fade gradually, got {}", after);
    }

    #[test]
    fn test_eye_orbits_at_distance() {
        let camera = Camera::new();
        let radius = (camera.position() - camera.target).length();
        assert!((radius - camera.distance).abs() < 1e-3);
    }
}

//! Spawn context for particle placement.
//!
//! Provides the seeded randomness and shape samplers the placement generator
//! builds resting positions from. One context exists per particle being
//! placed; its RNG is derived from the generation seed and the particle
//! index, so a fixed `(seed, count, params)` triple always reproduces the
//! same layout.
//!
//! ```ignore
//! let mut ctx = SpawnContext::new(i, count, seed);
//! let formed = ctx.cone_position(3.6, 9.0);
//! let chaos = ctx.scatter_position(formed, tree_center(), 10.3);
//! ```

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Minimum chaos-to-formed travel distance. A scatter point closer than this
/// to its formed counterpart is pushed outward so the transition never
/// degenerates into a zero-length hop.
pub const MIN_TRAVEL: f32 = 0.75;

/// Context provided to placement functions with helpers for the shapes the
/// scene is built from.
pub struct SpawnContext {
    /// Index of the particle being placed (0 to count-1).
    pub index: u32,
    /// Total number of particles in this generation pass.
    pub count: u32,
    /// Internal RNG - use helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a placement context for one particle.
    ///
    /// The RNG stream is a pure function of `(seed, index)`, which keeps a
    /// generation pass deterministic without coupling particles to each
    /// other's draw order.
    pub fn new(index: u32, count: u32, seed: u64) -> Self {
        let stream = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(stream),
        }
    }

    /// Normalized progress through the generation pass (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random u32 in the given range.
    #[inline]
    pub fn random_uint(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..max)
    }

    // ========== Formed-silhouette samplers ==========

    /// Random point inside an upright cone with apex up.
    ///
    /// Base sits on the XZ plane at y=0, apex at `(0, height, 0)`. Sampling
    /// is uniform over the cone volume, so per-slice density falls off with
    /// height and the silhouette reads as foliage thinning toward the tip.
    pub fn cone_position(&mut self, base_radius: f32, height: f32) -> Vec3 {
        // Cube root puts the height samples in proportion to slice volume.
        let y = height * (1.0 - self.rng.gen::<f32>().cbrt());
        let slice_radius = base_radius * (1.0 - y / height);
        let theta = self.rng.gen_range(0.0..TAU);
        let r = slice_radius * self.rng.gen::<f32>().sqrt();
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }

    /// Point on an ascending spiral wrapped around the cone silhouette.
    ///
    /// Particles are ordered by index from the base upward; `turns` full
    /// rotations are spread over `y_range`, and the radius tracks the cone
    /// slice at that height plus `jitter` of bounded radial noise.
    pub fn spiral_position(
        &mut self,
        base_radius: f32,
        height: f32,
        y_range: (f32, f32),
        turns: f32,
        jitter: f32,
    ) -> Vec3 {
        let t = self.progress();
        let y = y_range.0 + (y_range.1 - y_range.0) * t;
        let angle = t * TAU * turns;
        let r = (base_radius * (1.0 - y / height) + self.random_range(-jitter, jitter)).max(0.1);
        Vec3::new(r * angle.cos(), y, r * angle.sin())
    }

    /// Point on the front-facing sector of the cone surface.
    ///
    /// Photo tiles climb the viewer-facing side (+Z) of the silhouette,
    /// fanned across `half_arc` radians and pushed `offset` outside the
    /// foliage so they are not swallowed by it. Returns the position and the
    /// outward yaw the tile rests at.
    pub fn front_arc_position(
        &mut self,
        base_radius: f32,
        height: f32,
        y_range: (f32, f32),
        half_arc: f32,
        offset: f32,
    ) -> (Vec3, f32) {
        let t = self.progress();
        let y = y_range.0 + (y_range.1 - y_range.0) * t;
        // Alternate sides of the front axis so consecutive tiles fan out.
        let side = if self.index % 2 == 0 { 1.0 } else { -1.0 };
        let spread = (self.index / 2) as f32 / (self.count / 2).max(1) as f32;
        let yaw = side * spread * half_arc + self.random_range(-0.08, 0.08);
        let r = base_radius * (1.0 - y / height) + offset;
        (Vec3::new(r * yaw.sin(), y, r * yaw.cos()), yaw)
    }

    /// Random point inside a cylinder along the Y axis centered at `center_y`.
    pub fn cylinder_position(&mut self, radius: f32, half_height: f32, center_y: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let r = radius * self.rng.gen::<f32>().sqrt(); // sqrt for uniform disk
        Vec3::new(
            r * theta.cos(),
            center_y + self.rng.gen_range(-half_height..half_height),
            r * theta.sin(),
        )
    }

    // ========== Chaos scatter ==========

    /// Scatter point for a particle whose formed position is `formed`.
    ///
    /// Uniform inside a sphere of `radius` around `center`, then pushed away
    /// from `formed` until the travel distance is at least [`MIN_TRAVEL`].
    pub fn scatter_position(&mut self, formed: Vec3, center: Vec3, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = self.rng.gen_range(0.0..std::f32::consts::PI);
        // Cube root for uniform volume distribution
        let r = radius * self.rng.gen::<f32>().cbrt();
        let p = center
            + Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            );

        let travel = p - formed;
        let dist = travel.length();
        if dist >= MIN_TRAVEL {
            return p;
        }
        // Degenerate hop: push out along the offset, or a random direction
        // when the two points coincide.
        let dir = if dist > 1e-4 {
            travel / dist
        } else {
            let t = self.rng.gen_range(0.0..TAU);
            Vec3::new(t.cos(), 0.3, t.sin()).normalize()
        };
        formed + dir * MIN_TRAVEL
    }

    // ========== Color helpers ==========

    /// Color from HSV values.
    ///
    /// * `hue` - 0.0 to 1.0 (wraps: red → yellow → green → cyan → blue → magenta → red)
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `value` - 0.0 (black) to 1.0 (bright)
    pub fn hsv(&self, hue: f32, saturation: f32, value: f32) -> Vec3 {
        hsv_to_rgb(hue, saturation, value)
    }

    /// Jittered blend between two colors by `t`.
    pub fn gradient(&mut self, bottom: Vec3, top: Vec3, t: f32, jitter: f32) -> Vec3 {
        let t = (t + self.random_range(-jitter, jitter)).clamp(0.0, 1.0);
        bottom + (top - bottom) * t
    }
}

/// Convert HSV to RGB.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let ctx = SpawnContext::new(50, 100, 7);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_spawn_context_is_deterministic_per_seed() {
        let a = SpawnContext::new(3, 10, 42).cone_position(3.6, 9.0);
        let b = SpawnContext::new(3, 10, 42).cone_position(3.6, 9.0);
        let c = SpawnContext::new(3, 10, 43).cone_position(3.6, 9.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cone_position_stays_inside_silhouette() {
        let mut ctx = SpawnContext::new(0, 1, 1);
        for _ in 0..200 {
            let p = ctx.cone_position(3.6, 9.0);
            assert!(p.y >= 0.0 && p.y <= 9.0);
            let slice = 3.6 * (1.0 - p.y / 9.0);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r <= slice + 0.001, "r {} exceeds slice {}", r, slice);
        }
    }

    #[test]
    fn test_spiral_radius_tracks_the_cone_slice() {
        for i in 0..60 {
            let mut ctx = SpawnContext::new(i, 60, 9);
            let p = ctx.spiral_position(3.85, 9.5, (0.8, 8.4), 4.5, 0.3);
            assert!(p.y >= 0.8 && p.y <= 8.4);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            let slice = 3.85 * (1.0 - p.y / 9.5);
            assert!((r - slice).abs() <= 0.3 + 0.001, "r {} vs slice {}", r, slice);
        }
    }

    #[test]
    fn test_scatter_never_degenerates() {
        let formed = Vec3::new(0.0, 4.0, 0.0);
        let mut ctx = SpawnContext::new(0, 1, 5);
        for _ in 0..200 {
            // A tiny scatter radius around the formed point forces the
            // minimum-travel push on most draws.
            let p = ctx.scatter_position(formed, formed, 0.1);
            assert!((p - formed).length() >= MIN_TRAVEL - 0.001);
        }
    }

    #[test]
    fn test_hsv_to_rgb() {
        // Red
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);
    }
}

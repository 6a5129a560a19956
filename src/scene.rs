//! The scene: particle arenas, the blend register, and the per-frame
//! interpolator.
//!
//! A [`Scene`] owns one particle band per category, a single authoritative
//! [`BlendState`] register, and one private [`MixFilter`] per particle. Each
//! [`update`](Scene::update) advances every mix toward the register and
//! rebuilds the flat [`Instance`] buffer the renderer consumes. The buffer
//! is reused across frames; a steady-state tick allocates nothing.
//!
//! ```ignore
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.set_target(BlendState::Chaos);
//! scene.update(1.0 / 60.0, elapsed);
//! renderer.upload(scene.instances());
//! ```

use crate::blend::{BlendState, MixFilter, DECAY_RATE};
use crate::config::SceneConfig;
use crate::particle::{self, Category, Particle, ShapeParams};
use crate::photos::PhotoLibrary;
use crate::{Vec2, Vec3};
use glam::{EulerRot, Quat};
use std::f32::consts::TAU;

/// Ornament and photo categories spin freely below this mix.
pub const SPIN_THRESHOLD: f32 = 0.5;
/// The crown keeps its sinusoidal tilt up to this mix, then eases it out.
pub const CROWN_TILT_THRESHOLD: f32 = 0.9;
/// Chaos spin increment, radians per second on each affected axis.
pub const CHAOS_SPIN_RATE: f32 = 0.5;
/// Cosmetic snow drift speed, world units per second.
pub const SNOW_FALL_SPEED: f32 = 0.4;

const WOBBLE_RATE: f32 = 1.3;

/// Live render state for one particle, rebuilt every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
    pub color: Vec3,
    pub category: Category,
    pub photo_index: Option<usize>,
}

/// Private animation state owned by exactly one particle's update.
#[derive(Debug, Clone, Copy)]
struct InstanceState {
    mix: MixFilter,
    /// Accumulated chaos spin (x, y axes).
    spin: Vec2,
    /// Crown tilt (z, x axes), eased out near the formed state.
    tilt: Vec2,
}

impl InstanceState {
    fn at(mix: f32) -> Self {
        Self {
            mix: MixFilter::at(mix),
            spin: Vec2::ZERO,
            tilt: Vec2::ZERO,
        }
    }
}

struct Band {
    category: Category,
    particles: Vec<Particle>,
    states: Vec<InstanceState>,
}

/// The whole morphing scene.
pub struct Scene {
    config: SceneConfig,
    seed: u64,
    target: BlendState,
    photos: PhotoLibrary,
    bands: Vec<Band>,
    instances: Vec<Instance>,
    rejected: u64,
}

impl Scene {
    /// Build a scene from `config` (clamped first), resting fully formed.
    pub fn new(config: SceneConfig) -> Self {
        Self::with_seed(config, session_seed())
    }

    /// Like [`new`](Self::new) but with an explicit layout seed, for callers
    /// that need reproducible placements within a session.
    pub fn with_seed(config: SceneConfig, seed: u64) -> Self {
        let config = config.clamped();
        let photos = PhotoLibrary::new();
        let mut scene = Self {
            config,
            seed,
            target: BlendState::default(),
            photos,
            bands: Vec::new(),
            instances: Vec::new(),
            rejected: 0,
        };
        for category in Category::ALL {
            let band = scene.generate_band(category);
            scene.bands.push(band);
        }
        scene.rebuild_instances();
        log::info!(
            "scene generated: {} particles across {} categories (seed {})",
            scene.particle_count(),
            scene.bands.len(),
            seed
        );
        scene
    }

    // ========== Blend register ==========

    /// Current discrete target.
    pub fn target(&self) -> BlendState {
        self.target
    }

    /// Overwrite the target. Last write wins; redundant writes are harmless
    /// no-ops (filters only look at the value).
    pub fn set_target(&mut self, target: BlendState) {
        if self.target != target {
            log::debug!("blend target -> {:?}", target);
        }
        self.target = target;
    }

    /// Manual toggle, the host UI contract.
    pub fn toggle(&mut self) {
        self.set_target(self.target.flipped());
    }

    /// Upload-ritual hook: disperse everything.
    pub fn force_chaos(&mut self) {
        self.set_target(BlendState::Chaos);
    }

    /// Upload-ritual hook: reassemble. The settle delay between the two is
    /// the caller's responsibility.
    pub fn force_formed(&mut self) {
        self.set_target(BlendState::Formed);
    }

    // ========== Photos ==========

    /// Upload-ritual hook: swap the image list and remap every photo tile
    /// round-robin onto the new handles. Layout is untouched.
    pub fn replace_images(&mut self, handles: Vec<String>) {
        self.photos.replace(handles);
        let len = self.photos.len();
        for band in &mut self.bands {
            if band.category != Category::Photo {
                continue;
            }
            for (i, p) in band.particles.iter_mut().enumerate() {
                p.photo_index = (len > 0).then(|| i % len);
            }
        }
        self.rebuild_instances();
    }

    /// Current image handles, in assignment order.
    pub fn images(&self) -> &[String] {
        self.photos.handles()
    }

    /// Bumps whenever [`replace_images`](Self::replace_images) runs; texture
    /// caches reload when it changes.
    pub fn images_revision(&self) -> u64 {
        self.photos.revision()
    }

    // ========== Configuration ==========

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Apply a new configuration, regenerating only the categories whose
    /// parameters actually changed. Each regeneration swaps the whole band
    /// atomically; there are no partial updates.
    pub fn apply_config(&mut self, config: SceneConfig) {
        let config = config.clamped();
        if config == self.config {
            return;
        }
        let old = std::mem::replace(&mut self.config, config);
        for index in 0..self.bands.len() {
            let category = self.bands[index].category;
            if band_params_changed(category, &old, &self.config) {
                log::debug!("regenerating {:?} band", category);
                let band = self.generate_band(category);
                self.bands[index] = band;
            }
        }
        self.rebuild_instances();
    }

    // ========== Frame update ==========

    /// Advance every particle one frame.
    ///
    /// `dt` is the capped frame delta and `elapsed` the session time, both
    /// in seconds. A particle whose result comes out non-finite keeps its
    /// previous instance for this frame rather than poisoning the batch.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        let target = self.target;
        let rejected_before = self.rejected;
        let mut offset = 0;

        for band in &mut self.bands {
            let category = band.category;
            for (i, p) in band.particles.iter().enumerate() {
                let state = &mut band.states[i];
                let mix = state.mix.advance(target, dt);

                let mut position = lerp_exact(p.chaos_position, p.target_position, mix);
                let scale = lerp_exact(p.chaos_scale, p.target_scale, mix);
                let mut euler = p.rest_rotation;

                match category {
                    Category::Foliage => {}
                    Category::Snow => {
                        // Drift wraps within the snow volume and fades out
                        // entirely as the flake settles into formation.
                        let span = particle::SNOW_DRIFT_SPAN;
                        let fall = (elapsed * SNOW_FALL_SPEED + p.phase * span) % span;
                        position.y -= fall * (1.0 - mix);
                    }
                    Category::Ornament | Category::Photo => {
                        if mix < SPIN_THRESHOLD {
                            state.spin += Vec2::splat(CHAOS_SPIN_RATE * dt);
                        } else {
                            // Unwind to the nearest upright turn so tiles
                            // settle facing front instead of freezing at
                            // whatever angle the chaos spin reached.
                            let step = (DECAY_RATE * dt.max(0.0)).min(1.0);
                            state.spin =
                                Vec2::new(wrap_angle(state.spin.x), wrap_angle(state.spin.y));
                            state.spin += (Vec2::ZERO - state.spin) * step;
                        }
                        euler.x += state.spin.x;
                        euler.y += state.spin.y;
                        euler.z +=
                            (elapsed * WOBBLE_RATE + p.phase * TAU).sin() * p.chaos_tilt * (1.0 - mix);
                    }
                    Category::Crown => {
                        // The crown never stops its slow spin, even formed.
                        state.spin.y += CHAOS_SPIN_RATE * dt;
                        euler.y += state.spin.y;
                        if mix < CROWN_TILT_THRESHOLD {
                            let amp = (1.0 - mix) * p.chaos_tilt;
                            state.tilt =
                                Vec2::new(elapsed.sin() * amp, (elapsed * 0.8).cos() * amp);
                        } else {
                            let step = (DECAY_RATE * dt.max(0.0)).min(1.0);
                            state.tilt += (Vec2::ZERO - state.tilt) * step;
                        }
                        euler.z += state.tilt.x;
                        euler.x += state.tilt.y;
                    }
                }

                let rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
                if !(position.is_finite() && scale.is_finite() && rotation.is_finite()) {
                    self.rejected += 1;
                    offset += 1;
                    continue;
                }

                self.instances[offset] = Instance {
                    position,
                    scale,
                    rotation,
                    color: p.color,
                    category,
                    photo_index: p.photo_index,
                };
                offset += 1;
            }
        }

        if self.rejected > rejected_before {
            log::debug!(
                "skipped {} non-finite particle updates this frame",
                self.rejected - rejected_before
            );
        }
    }

    /// The flat instance buffer, in [`Category::ALL`] draw order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Total particles across every category.
    pub fn particle_count(&self) -> usize {
        self.bands.iter().map(|b| b.particles.len()).sum()
    }

    /// Particles of one category.
    pub fn particles(&self, category: Category) -> &[Particle] {
        self.bands
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.particles.as_slice())
            .unwrap_or(&[])
    }

    /// Current mix values, in the same order as [`instances`](Self::instances).
    pub fn mixes(&self) -> impl Iterator<Item = f32> + '_ {
        self.bands
            .iter()
            .flat_map(|b| b.states.iter().map(|s| s.mix.value()))
    }

    /// Lifetime count of non-finite updates rejected by the frame loop.
    pub fn rejected_updates(&self) -> u64 {
        self.rejected
    }

    // ========== Internals ==========

    fn generate_band(&self, category: Category) -> Band {
        let params = ShapeParams::from_config(&self.config, self.photos.len());
        let count = category_count(category, &self.config);
        // Category seeds are decorrelated so regenerating one band does not
        // reshuffle its neighbors.
        let seed = self.seed ^ (category_tag(category) << 56);
        let particles = particle::generate(category, count, &params, seed);
        let states = vec![InstanceState::at(self.target.as_mix()); particles.len()];
        Band {
            category,
            particles,
            states,
        }
    }

    /// Re-size and re-fill the instance buffer from resting data. Called
    /// after any regeneration; the next `update` overwrites everything.
    fn rebuild_instances(&mut self) {
        self.instances.clear();
        for band in &self.bands {
            for (p, state) in band.particles.iter().zip(&band.states) {
                let mix = state.mix.value();
                self.instances.push(Instance {
                    position: lerp_exact(p.chaos_position, p.target_position, mix),
                    scale: lerp_exact(p.chaos_scale, p.target_scale, mix),
                    rotation: Quat::from_euler(
                        EulerRot::XYZ,
                        p.rest_rotation.x,
                        p.rest_rotation.y,
                        p.rest_rotation.z,
                    ),
                    color: p.color,
                    category: band.category,
                    photo_index: p.photo_index,
                });
            }
        }
    }
}

/// Wrap an angle into `(-PI, PI]`.
#[inline]
fn wrap_angle(a: f32) -> f32 {
    let w = a % TAU;
    if w > std::f32::consts::PI {
        w - TAU
    } else if w < -std::f32::consts::PI {
        w + TAU
    } else {
        w
    }
}

/// Lerp that lands exactly on its endpoints. A particle fully at rest must
/// sit bit-for-bit on its resting pose, which `a + (b - a) * t` does not
/// guarantee at `t = 1`.
#[inline]
fn lerp_exact(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a.lerp(b, t)
    }
}

fn category_count(category: Category, config: &SceneConfig) -> u32 {
    match category {
        Category::Foliage => config.foliage_count,
        Category::Snow => config.snow_count,
        Category::Ornament => config.ornament_count,
        Category::Photo => config.photo_count,
        Category::Crown => 1,
    }
}

fn category_tag(category: Category) -> u64 {
    match category {
        Category::Foliage => 1,
        Category::Snow => 2,
        Category::Ornament => 3,
        Category::Photo => 4,
        Category::Crown => 5,
    }
}

/// Which config fields feed which band's generator.
fn band_params_changed(category: Category, old: &SceneConfig, new: &SceneConfig) -> bool {
    match category {
        Category::Foliage => {
            old.foliage_count != new.foliage_count || old.foliage_size != new.foliage_size
        }
        Category::Snow => old.snow_count != new.snow_count || old.snow_size != new.snow_size,
        Category::Ornament => {
            old.ornament_count != new.ornament_count
                || old.ball_scale != new.ball_scale
                || old.ball_variance != new.ball_variance
        }
        Category::Photo => {
            old.photo_count != new.photo_count || old.photo_scale != new.photo_scale
        }
        Category::Crown => old.star_scale != new.star_scale,
    }
}

fn session_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        SceneConfig {
            foliage_count: 1000,
            snow_count: 100,
            ornament_count: 10,
            photo_count: 4,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_scene_starts_formed_at_rest() {
        let scene = Scene::with_seed(small_config(), 7);
        assert_eq!(scene.target(), BlendState::Formed);
        assert!(scene.mixes().all(|m| m == 1.0));
    }

    #[test]
    fn test_instance_buffer_matches_particle_count() {
        let mut scene = Scene::with_seed(small_config(), 7);
        assert_eq!(scene.instances().len(), scene.particle_count());
        scene.update(1.0 / 60.0, 0.016);
        assert_eq!(scene.instances().len(), scene.particle_count());
    }

    #[test]
    fn test_update_moves_particles_toward_chaos() {
        let mut scene = Scene::with_seed(small_config(), 7);
        scene.set_target(BlendState::Chaos);
        for frame in 0..120 {
            scene.update(1.0 / 60.0, frame as f32 / 60.0);
        }
        assert!(scene.mixes().all(|m| m < 0.05));
    }

    #[test]
    fn test_apply_config_regenerates_only_changed_band() {
        let mut scene = Scene::with_seed(small_config(), 7);
        let foliage_before: Vec<_> = scene
            .particles(Category::Foliage)
            .iter()
            .map(|p| p.target_position)
            .collect();

        let mut config = small_config();
        config.snow_count = 200;
        scene.apply_config(config);

        assert_eq!(scene.particles(Category::Snow).len(), 200);
        let foliage_after: Vec<_> = scene
            .particles(Category::Foliage)
            .iter()
            .map(|p| p.target_position)
            .collect();
        assert_eq!(foliage_before, foliage_after);
    }

    #[test]
    fn test_replace_images_remaps_photo_band_in_place() {
        let mut scene = Scene::with_seed(small_config(), 7);
        let layout_before: Vec<_> = scene
            .particles(Category::Photo)
            .iter()
            .map(|p| p.target_position)
            .collect();

        scene.replace_images(vec!["x.png".into(), "y.png".into()]);

        let photos = scene.particles(Category::Photo);
        for (i, p) in photos.iter().enumerate() {
            assert_eq!(p.photo_index, Some(i % 2));
            assert_eq!(p.target_position, layout_before[i]);
        }
        assert_eq!(scene.images_revision(), 1);
    }

    #[test]
    fn test_crown_band_has_one_particle() {
        let scene = Scene::with_seed(small_config(), 7);
        assert_eq!(scene.particles(Category::Crown).len(), 1);
    }
}

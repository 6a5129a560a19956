//! Integration tests for the blend engine's observable guarantees.
//!
//! These drive the public API the way a host would: build a scene, push
//! gesture samples, tick frames, and check what lands in the instance
//! buffer.

use tannen::blend::MixFilter;
use tannen::prelude::*;
use tannen::particle::{self, ShapeParams, TREE_BASE_RADIUS, TREE_HEIGHT};

const DT: f32 = 1.0 / 60.0;

fn small_config() -> SceneConfig {
    SceneConfig {
        foliage_count: 1000,
        snow_count: 100,
        ornament_count: 12,
        photo_count: 6,
        ..SceneConfig::default()
    }
}

fn tick(scene: &mut Scene, frames: u32, elapsed: &mut f32) {
    for _ in 0..frames {
        scene.update(DT, *elapsed);
        *elapsed += DT;
    }
}

// ============================================================================
// Session start
// ============================================================================

#[test]
fn test_session_starts_formed_at_rest() {
    let mut scene = Scene::with_seed(small_config(), 1);
    assert_eq!(scene.target(), BlendState::Formed);
    assert!(scene.mixes().all(|m| m == 1.0));

    // A zero-delta tick must leave every particle exactly on its formed pose.
    scene.update(0.0, 0.0);
    let positions: Vec<Vec3> = scene.instances().iter().map(|i| i.position).collect();
    let mut checked = 0;
    let mut offset = 0;
    for category in Category::ALL {
        for p in scene.particles(category) {
            assert_eq!(positions[offset], p.target_position);
            offset += 1;
            checked += 1;
        }
    }
    assert_eq!(checked, scene.particle_count());
}

// ============================================================================
// Mix invariants
// ============================================================================

#[test]
fn test_mix_stays_convex_under_rapid_flips() {
    let mut scene = Scene::with_seed(small_config(), 2);
    let mut elapsed = 0.0;
    for i in 0..200 {
        if i % 2 == 0 {
            scene.toggle();
        }
        // Deliberately large, irregular deltas.
        let dt = if i % 7 == 0 { 0.5 } else { DT };
        scene.update(dt, elapsed);
        elapsed += dt;
        assert!(scene.mixes().all(|m| (0.0..=1.0).contains(&m)));
    }
}

#[test]
fn test_monotonic_convergence_toward_held_target() {
    let mut filter = MixFilter::formed();
    let mut distance = 1.0;
    for _ in 0..600 {
        let value = filter.advance(BlendState::Chaos, DT);
        let d = value.abs();
        assert!(d <= distance + 1e-7, "distance increased: {distance} -> {d}");
        distance = d;
    }
    assert!(distance < 1e-3);
}

#[test]
fn test_redundant_set_target_does_not_disturb_trajectories() {
    let mut plain = Scene::with_seed(small_config(), 3);
    let mut noisy = Scene::with_seed(small_config(), 3);
    plain.set_target(BlendState::Chaos);
    noisy.set_target(BlendState::Chaos);

    let mut elapsed = 0.0;
    for _ in 0..90 {
        // The noisy scene re-asserts its target every frame.
        noisy.set_target(BlendState::Chaos);
        plain.update(DT, elapsed);
        noisy.update(DT, elapsed);
        elapsed += DT;
        assert_eq!(plain.instances(), noisy.instances());
    }
}

// ============================================================================
// Generation round-trip
// ============================================================================

#[test]
fn test_regeneration_is_statistically_consistent() {
    let params = ShapeParams::from_config(&SceneConfig::default().clamped(), 8);
    let a = particle::generate(Category::Foliage, 500, &params, 100);
    let b = particle::generate(Category::Foliage, 500, &params, 200);
    assert_eq!(a.len(), b.len());

    let bounds = |set: &[tannen::Particle]| {
        let mut max_r: f32 = 0.0;
        let mut max_y: f32 = 0.0;
        for p in set {
            let t = p.target_position;
            max_r = max_r.max((t.x * t.x + t.z * t.z).sqrt());
            max_y = max_y.max(t.y);
        }
        (max_r, max_y)
    };
    let (ra, ya) = bounds(&a);
    let (rb, yb) = bounds(&b);

    // Different scatter, same silhouette envelope.
    for (r, y) in [(ra, ya), (rb, yb)] {
        assert!(r <= TREE_BASE_RADIUS + 0.001);
        assert!(y <= TREE_HEIGHT + 0.001);
    }
    assert!((ra - rb).abs() < TREE_BASE_RADIUS * 0.2);
    assert!((ya - yb).abs() < TREE_HEIGHT * 0.2);
}

#[test]
fn test_count_change_swaps_band_atomically() {
    let mut scene = Scene::with_seed(small_config(), 4);
    let mut config = small_config();
    config.foliage_count = 2000;
    scene.apply_config(config);

    assert_eq!(scene.particles(Category::Foliage).len(), 2000);
    assert_eq!(scene.instances().len(), scene.particle_count());
    for p in scene.particles(Category::Foliage) {
        let travel = (p.chaos_position - p.target_position).length();
        assert!(travel > 0.0);
    }
}

// ============================================================================
// Gesture scenarios
// ============================================================================

#[test]
fn test_end_to_end_gesture_scenario() {
    let mut scene = Scene::with_seed(small_config(), 5);
    let mut adapter = GestureAdapter::new();
    let feed = adapter.feed();

    feed.push(GestureSample {
        detected: true,
        is_open: true,
        position: Vec2::new(0.3, 0.1),
    });
    if let Some(wanted) = adapter.drain(scene.target()) {
        scene.set_target(wanted);
    }
    assert_eq!(scene.target(), BlendState::Chaos);
    assert!((adapter.pointer().x - 0.36).abs() < 1e-6);
    assert!((adapter.pointer().y - 0.1).abs() < 1e-6);

    // Losing the subject changes neither the target nor the pointer.
    feed.push(GestureSample::lost());
    assert_eq!(adapter.drain(scene.target()), None);
    assert_eq!(scene.target(), BlendState::Chaos);
    assert!((adapter.pointer().x - 0.36).abs() < 1e-6);
    assert!((adapter.pointer().y - 0.1).abs() < 1e-6);
    assert!(!adapter.detected());
}

#[test]
fn test_feed_silence_freezes_the_scene_target() {
    let mut scene = Scene::with_seed(small_config(), 6);
    let mut adapter = GestureAdapter::new();
    // The tracking collaborator never delivers anything (permission denied).
    let mut elapsed = 0.0;
    for _ in 0..30 {
        assert_eq!(adapter.drain(scene.target()), None);
        scene.update(DT, elapsed);
        elapsed += DT;
    }
    assert_eq!(scene.target(), BlendState::Formed);
    assert!(scene.mixes().all(|m| m == 1.0));
}

// ============================================================================
// Upload ritual
// ============================================================================

#[test]
fn test_upload_ritual_scenario() {
    let mut scene = Scene::with_seed(small_config(), 7);
    let mut elapsed = 0.0;

    scene.force_chaos();
    tick(&mut scene, 60, &mut elapsed);
    assert!(scene.mixes().all(|m| m < 0.3));

    let urls: Vec<String> = (1..=8).map(|i| format!("upload/{i}.jpg")).collect();
    scene.replace_images(urls.clone());
    assert_eq!(scene.images(), urls.as_slice());
    // Exactly one replacement happened.
    assert_eq!(scene.images_revision(), 1);
    for (i, p) in scene.particles(Category::Photo).iter().enumerate() {
        assert_eq!(p.photo_index, Some(i % 8));
    }

    // Settle delay, then reassemble.
    tick(&mut scene, 48, &mut elapsed);
    scene.force_formed();
    tick(&mut scene, 300, &mut elapsed);
    assert_eq!(scene.target(), BlendState::Formed);
    assert!(scene.mixes().all(|m| m > 0.99));
    // The ritual replaced references exactly once; no further bumps.
    assert_eq!(scene.images_revision(), 1);
}

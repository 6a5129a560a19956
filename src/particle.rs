//! Particle data model and procedural placement.
//!
//! Every visual unit in the scene — a foliage bit, a snowflake, a ball
//! ornament, a photo tile, the crowning ornament — is a [`Particle`] carrying
//! two resting poses: a scattered "chaos" pose and an assembled "formed"
//! pose. The two are generated together by [`generate`] and never reassigned
//! independently; everything in between is produced at runtime by blending.
//!
//! Placement is a pure function of `(category, count, params, seed)`. A new
//! count or changed parameters means a full regeneration of that category;
//! partial updates are not supported, which keeps indices and endpoint pairs
//! from ever drifting apart.

use crate::config::SceneConfig;
use crate::spawn::SpawnContext;
use crate::Vec3;

// Formed-silhouette geometry. The foliage cone rises from the ground plane
// to TREE_HEIGHT; the crown rests just above the apex and floats higher
// while chaotic.
pub const TREE_BASE_RADIUS: f32 = 3.6;
pub const TREE_HEIGHT: f32 = 9.0;
pub const CROWN_REST_Y: f32 = 9.2;
pub const CROWN_CHAOS_Y: f32 = 13.0;

const SNOW_RADIUS: f32 = 7.0;
const SNOW_HALF_HEIGHT: f32 = 8.0;
const SNOW_CENTER_Y: f32 = 7.0;
/// Vertical wrap length for cosmetic snow drift.
pub(crate) const SNOW_DRIFT_SPAN: f32 = SNOW_HALF_HEIGHT * 2.0;

/// Chaos scatter radius as a multiple of the category's formed bounding
/// radius. Large enough that the transition reads as a real dispersal,
/// small enough that it never reads as teleportation.
pub const CHAOS_SCATTER_FACTOR: f32 = 1.8;

// Display-unit to world-unit conversions for the sprite categories.
const FOLIAGE_SPRITE_SCALE: f32 = 0.012;
const SNOW_SPRITE_SCALE: f32 = 0.008;
const ORNAMENT_WORLD_SCALE: f32 = 0.5;
const PHOTO_WORLD_SCALE: f32 = 0.25;
const CROWN_WORLD_SCALE: f32 = 0.07;

// Ornaments read bigger while they float free; photos slightly smaller.
const ORNAMENT_CHAOS_GROWTH: f32 = 1.25;
const PHOTO_CHAOS_SHRINK: f32 = 0.8;

const FOLIAGE_BOTTOM: Vec3 = Vec3::new(0.008, 0.169, 0.110);
const FOLIAGE_TOP: Vec3 = Vec3::new(0.129, 0.478, 0.275);
const SNOW_COLOR: Vec3 = Vec3::new(0.93, 0.96, 1.0);
const CROWN_GOLD: Vec3 = Vec3::new(1.0, 0.843, 0.0);

/// Particle category. Determines placement shape, palette, and which
/// idiosyncratic motion the interpolator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Needle sprites filling the tree cone.
    Foliage,
    /// Ambient flakes filling a volume around the tree.
    Snow,
    /// Decorative balls along an ascending spiral.
    Ornament,
    /// User photo tiles on the front face.
    Photo,
    /// The single crowning ornament at the apex.
    Crown,
}

impl Category {
    /// All categories, in draw order (photos last so they blend over the rest).
    pub const ALL: [Category; 5] = [
        Category::Foliage,
        Category::Snow,
        Category::Ornament,
        Category::Crown,
        Category::Photo,
    ];
}

/// Shape parameters consumed by [`generate`], derived from a clamped
/// [`SceneConfig`] plus the number of currently available images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub foliage_size: f32,
    pub snow_size: f32,
    pub ball_scale: f32,
    pub ball_variance: f32,
    pub photo_scale: f32,
    pub star_scale: f32,
    pub image_count: usize,
}

impl ShapeParams {
    /// Derive shape parameters from an already-clamped config.
    pub fn from_config(config: &SceneConfig, image_count: usize) -> Self {
        Self {
            foliage_size: config.foliage_size,
            snow_size: config.snow_size,
            ball_scale: config.ball_scale,
            ball_variance: config.ball_variance,
            photo_scale: config.photo_scale,
            star_scale: config.star_scale,
            image_count,
        }
    }
}

/// One animated visual unit.
///
/// The two resting poses are immutable after generation. `photo_index` is the
/// only field the scene rewrites in place (when the image list is replaced),
/// because it references external data rather than layout.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Resting position in the scattered state.
    pub chaos_position: Vec3,
    /// Resting position in the formed state.
    pub target_position: Vec3,
    /// Size while scattered.
    pub chaos_scale: Vec3,
    /// Size while formed.
    pub target_scale: Vec3,
    /// Static orientation in the formed state (XYZ Euler, radians).
    pub rest_rotation: Vec3,
    /// Fixed color; never interpolated.
    pub color: Vec3,
    /// Wobble amplitude applied only while mostly chaotic.
    pub chaos_tilt: f32,
    /// Phase offset for cosmetic drift (snow) and wobble.
    pub phase: f32,
    /// Index into the scene's image list; photo tiles only.
    pub photo_index: Option<usize>,
}

/// Formed-silhouette bounding radius for a category, measured from the
/// category's scatter center. Chaos volumes are sized from this.
fn silhouette_radius(category: Category) -> f32 {
    match category {
        Category::Foliage | Category::Ornament | Category::Photo => {
            TREE_BASE_RADIUS.max(TREE_HEIGHT * 0.5)
        }
        Category::Snow => SNOW_RADIUS.max(SNOW_HALF_HEIGHT),
        Category::Crown => TREE_HEIGHT * 0.5,
    }
}

/// Center the chaos cloud on the silhouette's midpoint, not the origin, so
/// dispersal reads as the tree bursting apart rather than sinking.
fn scatter_center(category: Category) -> Vec3 {
    match category {
        Category::Snow => Vec3::new(0.0, SNOW_CENTER_Y, 0.0),
        _ => Vec3::new(0.0, TREE_HEIGHT * 0.55, 0.0),
    }
}

/// Generate a full particle set for one category.
///
/// Pure function of its arguments: the same `(category, count, params, seed)`
/// always yields the same set. Counts are taken as already clamped by
/// [`SceneConfig::clamped`].
pub fn generate(category: Category, count: u32, params: &ShapeParams, seed: u64) -> Vec<Particle> {
    let scatter_radius = silhouette_radius(category) * CHAOS_SCATTER_FACTOR;
    let center = scatter_center(category);

    (0..count)
        .map(|i| {
            let mut ctx = SpawnContext::new(i, count, seed);
            match category {
                Category::Foliage => foliage(&mut ctx, params, center, scatter_radius),
                Category::Snow => snow(&mut ctx, params, center, scatter_radius),
                Category::Ornament => ornament(&mut ctx, params, center, scatter_radius),
                Category::Photo => photo(&mut ctx, params, center, scatter_radius),
                Category::Crown => crown(&mut ctx, params),
            }
        })
        .collect()
}

fn foliage(ctx: &mut SpawnContext, params: &ShapeParams, center: Vec3, radius: f32) -> Particle {
    let target = ctx.cone_position(TREE_BASE_RADIUS, TREE_HEIGHT);
    let chaos = ctx.scatter_position(target, center, radius);
    let scale = Vec3::splat(params.foliage_size * FOLIAGE_SPRITE_SCALE);
    let color = ctx.gradient(FOLIAGE_BOTTOM, FOLIAGE_TOP, target.y / TREE_HEIGHT, 0.05);
    Particle {
        chaos_position: chaos,
        target_position: target,
        chaos_scale: scale,
        target_scale: scale,
        rest_rotation: Vec3::ZERO,
        color,
        chaos_tilt: 0.0,
        phase: ctx.random(),
        photo_index: None,
    }
}

fn snow(ctx: &mut SpawnContext, params: &ShapeParams, center: Vec3, radius: f32) -> Particle {
    let target = ctx.cylinder_position(SNOW_RADIUS, SNOW_HALF_HEIGHT, SNOW_CENTER_Y);
    let chaos = ctx.scatter_position(target, center, radius);
    let scale = Vec3::splat(params.snow_size * SNOW_SPRITE_SCALE);
    Particle {
        chaos_position: chaos,
        target_position: target,
        chaos_scale: scale,
        target_scale: scale,
        rest_rotation: Vec3::ZERO,
        color: SNOW_COLOR,
        chaos_tilt: 0.0,
        phase: ctx.random(),
        photo_index: None,
    }
}

fn ornament(ctx: &mut SpawnContext, params: &ShapeParams, center: Vec3, radius: f32) -> Particle {
    let target = ctx.spiral_position(
        TREE_BASE_RADIUS + 0.25,
        TREE_HEIGHT + 0.5,
        (0.8, TREE_HEIGHT - 0.6),
        4.5,
        0.3,
    );
    let chaos = ctx.scatter_position(target, center, radius);

    let size = params.ball_scale
        * ORNAMENT_WORLD_SCALE
        * (1.0 + params.ball_variance * ctx.random_range(-1.0, 1.0));
    let target_scale = Vec3::splat(size.max(0.02));

    // Classic ball palette: red, gold, silver, deep crimson.
    let color = match ctx.random_uint(0, 4) {
        0 => ctx.hsv(0.0, 0.85, 0.85),
        1 => ctx.hsv(0.11, 0.75, 0.95),
        2 => ctx.hsv(0.0, 0.0, 0.88),
        _ => ctx.hsv(0.97, 0.9, 0.7),
    };

    Particle {
        chaos_position: chaos,
        target_position: target,
        chaos_scale: target_scale * ORNAMENT_CHAOS_GROWTH,
        target_scale,
        rest_rotation: Vec3::new(
            ctx.random_range(0.0, std::f32::consts::TAU),
            ctx.random_range(0.0, std::f32::consts::TAU),
            0.0,
        ),
        color,
        chaos_tilt: ctx.random_range(0.2, 0.5),
        phase: ctx.random(),
        photo_index: None,
    }
}

fn photo(ctx: &mut SpawnContext, params: &ShapeParams, center: Vec3, radius: f32) -> Particle {
    let (target, yaw) = ctx.front_arc_position(
        TREE_BASE_RADIUS,
        TREE_HEIGHT + 1.0,
        (1.5, TREE_HEIGHT - 1.6),
        0.9,
        0.35,
    );
    let chaos = ctx.scatter_position(target, center, radius);
    let target_scale = Vec3::splat(params.photo_scale * PHOTO_WORLD_SCALE);
    let index = ctx.index as usize;

    Particle {
        chaos_position: chaos,
        target_position: target,
        chaos_scale: target_scale * PHOTO_CHAOS_SHRINK,
        target_scale,
        // Face outward, with a slight polaroid-style roll.
        rest_rotation: Vec3::new(0.0, yaw, ctx.random_range(-0.08, 0.08)),
        color: Vec3::ONE,
        chaos_tilt: ctx.random_range(0.15, 0.35),
        phase: ctx.random(),
        photo_index: (params.image_count > 0).then(|| index % params.image_count),
    }
}

fn crown(ctx: &mut SpawnContext, params: &ShapeParams) -> Particle {
    let scale = Vec3::splat(params.star_scale * CROWN_WORLD_SCALE);
    Particle {
        chaos_position: Vec3::new(0.0, CROWN_CHAOS_Y, 0.0),
        target_position: Vec3::new(0.0, CROWN_REST_Y, 0.0),
        chaos_scale: scale,
        target_scale: scale,
        rest_rotation: Vec3::ZERO,
        color: CROWN_GOLD,
        chaos_tilt: 0.5,
        phase: ctx.random(),
        photo_index: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ShapeParams {
        ShapeParams::from_config(&SceneConfig::default().clamped(), 8)
    }

    #[test]
    fn test_generate_is_deterministic_for_fixed_inputs() {
        let a = generate(Category::Ornament, 40, &params(), 11);
        let b = generate(Category::Ornament, 40, &params(), 11);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.chaos_position, y.chaos_position);
            assert_eq!(x.target_position, y.target_position);
        }
    }

    #[test]
    fn test_foliage_fills_the_cone() {
        let set = generate(Category::Foliage, 2000, &params(), 3);
        assert_eq!(set.len(), 2000);
        for p in &set {
            let t = p.target_position;
            assert!(t.y >= 0.0 && t.y <= TREE_HEIGHT);
            let r = (t.x * t.x + t.z * t.z).sqrt();
            assert!(r <= TREE_BASE_RADIUS + 0.001);
        }
    }

    #[test]
    fn test_foliage_density_decreases_with_height() {
        let set = generate(Category::Foliage, 4000, &params(), 3);
        let lower = set
            .iter()
            .filter(|p| p.target_position.y < TREE_HEIGHT / 2.0)
            .count();
        // Uniform cone volume puts ~7/8 of the mass in the lower half.
        assert!(lower > set.len() * 3 / 4, "lower half holds {}", lower);
    }

    #[test]
    fn test_travel_distance_never_degenerate() {
        for category in Category::ALL {
            let count = if category == Category::Crown { 1 } else { 300 };
            for p in generate(category, count, &params(), 17) {
                let travel = (p.chaos_position - p.target_position).length();
                assert!(travel >= crate::spawn::MIN_TRAVEL - 0.001);
            }
        }
    }

    #[test]
    fn test_chaos_cloud_is_bounded() {
        let radius = TREE_BASE_RADIUS.max(TREE_HEIGHT * 0.5) * CHAOS_SCATTER_FACTOR;
        let center = Vec3::new(0.0, TREE_HEIGHT * 0.55, 0.0);
        for p in generate(Category::Foliage, 2000, &params(), 23) {
            // MIN_TRAVEL pushes can poke marginally past the sphere.
            assert!((p.chaos_position - center).length() <= radius + 1.0);
        }
    }

    #[test]
    fn test_photo_images_cycle_round_robin() {
        let mut shape = params();
        shape.image_count = 8;
        let set = generate(Category::Photo, 12, &shape, 5);
        for (i, p) in set.iter().enumerate() {
            assert_eq!(p.photo_index, Some(i % 8));
        }
    }

    #[test]
    fn test_ornament_variance_respects_floor() {
        let mut shape = params();
        shape.ball_scale = 0.1;
        shape.ball_variance = 1.0;
        for p in generate(Category::Ornament, 200, &shape, 29) {
            assert!(p.target_scale.x >= 0.02);
        }
    }

    #[test]
    fn test_crown_rests_at_apex() {
        let set = generate(Category::Crown, 1, &params(), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].target_position, Vec3::new(0.0, CROWN_REST_Y, 0.0));
        assert_eq!(set[0].chaos_position, Vec3::new(0.0, CROWN_CHAOS_Y, 0.0));
    }
}

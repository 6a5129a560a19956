//! Scene configuration.
//!
//! A flat set of named numeric parameters consumed by the placement
//! generator: particle counts and sizes per category, the photo tile scale,
//! and the crown ornament scale. Host UIs (a tuning panel, a config file)
//! produce one of these; the engine never trusts the values and clamps every
//! field to its supported range before use.
//!
//! # Example
//!
//! ```ignore
//! let mut config = SceneConfig::default();
//! config.foliage_count = 12_000;
//! let scene = Scene::new(config);
//! ```

/// Tunable parameters for the whole scene.
///
/// Field defaults match the reference scene. Use [`SceneConfig::mobile`] for
/// constrained devices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Snowflake sprite size (display units).
    pub snow_size: f32,
    /// Number of snowflakes.
    pub snow_count: u32,
    /// Foliage sprite size (display units).
    pub foliage_size: f32,
    /// Number of foliage particles.
    pub foliage_count: u32,
    /// Number of decorative ball ornaments.
    pub ornament_count: u32,
    /// Base scale of ball ornaments.
    pub ball_scale: f32,
    /// Random per-ball scale variance, 0 = uniform.
    pub ball_variance: f32,
    /// Number of photo tiles.
    pub photo_count: u32,
    /// Uniform scale factor for photo tiles.
    pub photo_scale: f32,
    /// Scale of the crowning ornament.
    pub star_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            snow_size: 11.0,
            snow_count: 400,
            foliage_size: 15.0,
            foliage_count: 6000,
            ornament_count: 60,
            ball_scale: 0.7,
            ball_variance: 0.2,
            photo_count: 12,
            photo_scale: 2.5,
            star_scale: 11.0,
        }
    }
}

impl SceneConfig {
    /// Reduced-count preset for low-powered devices.
    pub fn mobile() -> Self {
        Self {
            snow_count: 200,
            foliage_count: 2500,
            ..Self::default()
        }
    }

    /// Clamp every field to its supported range.
    ///
    /// Counts are clamped before any allocation happens, so an out-of-range
    /// count can never balloon the particle arena. Note the default
    /// `foliage_size` (15.0) sits above the supported ceiling; the clamp
    /// wins and the effective size is 10.0.
    pub fn clamped(self) -> Self {
        Self {
            snow_size: self.snow_size.clamp(0.5, 20.0),
            snow_count: self.snow_count.clamp(100, 10_000),
            foliage_size: self.foliage_size.clamp(1.0, 10.0),
            foliage_count: self.foliage_count.clamp(1000, 150_000),
            ornament_count: self.ornament_count.clamp(1, 500),
            ball_scale: self.ball_scale.clamp(0.1, 3.0),
            ball_variance: self.ball_variance.clamp(0.0, 1.0),
            photo_count: self.photo_count.clamp(1, 64),
            photo_scale: self.photo_scale.clamp(0.5, 2.5),
            star_scale: self.star_scale.clamp(1.0, 20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_clamping_except_foliage_size() {
        let clamped = SceneConfig::default().clamped();
        let mut expected = SceneConfig::default();
        expected.foliage_size = 10.0;
        assert_eq!(clamped, expected);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = SceneConfig {
            snow_count: 5,
            foliage_count: u32::MAX,
            ball_scale: -3.0,
            photo_scale: 100.0,
            ..SceneConfig::default()
        };
        let clamped = config.clamped();
        assert_eq!(clamped.snow_count, 100);
        assert_eq!(clamped.foliage_count, 150_000);
        assert_eq!(clamped.ball_scale, 0.1);
        assert_eq!(clamped.photo_scale, 2.5);
    }

    #[test]
    fn test_mobile_preset_reduces_counts() {
        let mobile = SceneConfig::mobile();
        let default = SceneConfig::default();
        assert!(mobile.snow_count < default.snow_count);
        assert!(mobile.foliage_count < default.foliage_count);
    }
}

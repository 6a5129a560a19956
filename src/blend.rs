//! The two-layer blend model: a discrete target register and a continuous
//! per-consumer mix filter.
//!
//! "What is wanted" and "where things currently are" are deliberately
//! separate types. [`BlendState`] is the process-wide answer to the first
//! question: a two-value register mutated by whichever input lands last
//! (manual toggle, gesture, upload ritual). [`MixFilter`] answers the second
//! for one consumer: a scalar that exponentially approaches the register
//! every frame, so flipping the register never produces a discontinuity in
//! anything on screen.

/// Exponential approach rate shared by every mix filter, per second.
/// Roughly: the remaining distance halves every ~0.35 s.
pub const DECAY_RATE: f32 = 2.0;

/// The discrete authoritative target: scattered or assembled.
///
/// Last write wins; there is no queuing and no conflict detection, because
/// every input source expresses the same binary intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// Scattered cloud (`mix = 0`).
    Chaos,
    /// Assembled formation (`mix = 1`). Sessions start formed.
    #[default]
    Formed,
}

impl BlendState {
    /// The mix value this state pulls filters toward.
    #[inline]
    pub fn as_mix(self) -> f32 {
        match self {
            BlendState::Chaos => 0.0,
            BlendState::Formed => 1.0,
        }
    }

    /// The other state.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            BlendState::Chaos => BlendState::Formed,
            BlendState::Formed => BlendState::Chaos,
        }
    }
}

/// One consumer's continuous position between the two resting states.
///
/// The update rule is a convex combination, so a filter that starts inside
/// `[0, 1]` can never leave it, and the distance to a held target is
/// non-increasing: no overshoot, no oscillation.
#[derive(Debug, Clone, Copy)]
pub struct MixFilter {
    current: f32,
}

impl MixFilter {
    /// Filter resting at the formed state (session start).
    pub fn formed() -> Self {
        Self { current: 1.0 }
    }

    /// Filter resting at an arbitrary mix, clamped to `[0, 1]`.
    pub fn at(mix: f32) -> Self {
        Self {
            current: mix.clamp(0.0, 1.0),
        }
    }

    /// Current mix value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Advance one frame toward `target`, returning the new value.
    ///
    /// The step factor is capped at 1 so a long frame lands exactly on the
    /// target instead of shooting past it.
    #[inline]
    pub fn advance(&mut self, target: BlendState, dt: f32) -> f32 {
        let step = (DECAY_RATE * dt.max(0.0)).min(1.0);
        self.current += (target.as_mix() - self.current) * step;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defaults_to_formed() {
        assert_eq!(BlendState::default(), BlendState::Formed);
        assert_eq!(BlendState::default().as_mix(), 1.0);
    }

    #[test]
    fn test_flip_round_trips() {
        assert_eq!(BlendState::Formed.flipped(), BlendState::Chaos);
        assert_eq!(BlendState::Formed.flipped().flipped(), BlendState::Formed);
    }

    #[test]
    fn test_filter_converges_monotonically() {
        let mut filter = MixFilter::formed();
        let mut distance = 1.0;
        for _ in 0..200 {
            let value = filter.advance(BlendState::Chaos, 1.0 / 60.0);
            let d = (value - 0.0).abs();
            assert!(d <= distance + 1e-7, "distance grew: {} -> {}", distance, d);
            distance = d;
        }
        assert!(distance < 0.002);
    }

    #[test]
    fn test_filter_never_overshoots_on_huge_delta() {
        let mut filter = MixFilter::formed();
        // A 10-second frame caps the step at exactly reaching the target.
        let value = filter.advance(BlendState::Chaos, 10.0);
        assert_eq!(value, 0.0);
        let value = filter.advance(BlendState::Chaos, 10.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_filter_stays_convex_under_rapid_flips() {
        let mut filter = MixFilter::at(0.5);
        let mut target = BlendState::Chaos;
        for i in 0..500 {
            if i % 3 == 0 {
                target = target.flipped();
            }
            let value = filter.advance(target, 0.3);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_negative_delta_is_inert() {
        let mut filter = MixFilter::at(0.4);
        let value = filter.advance(BlendState::Formed, -1.0);
        assert_eq!(value, 0.4);
    }
}

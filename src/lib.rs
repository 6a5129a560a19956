//! # Tannen - Dual-State Particle Blend Engine
//!
//! An interactive scene of several thousand particles that continuously
//! morphs between two resting states: a scattered "chaos" cloud and an
//! assembled tree formation. Tannen owns the placement, blending, and input
//! mapping; hand tracking, page chrome, and asset pipelines stay outside and
//! talk to it through narrow contracts.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tannen::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let scene = Scene::new(SceneConfig::default());
//!     let viewer = Viewer::new(scene);
//!
//!     let feed = viewer.gesture_feed();
//!     // Hand `feed` to your tracking pipeline; push a sample per video frame:
//!     // feed.push(GestureSample { detected: true, is_open: true, position });
//!
//!     viewer.run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Two resting poses per particle
//!
//! Every particle carries a chaos pose and a formed pose, generated together
//! by the placement generator and never reassigned independently. Foliage
//! fills a cone, snow fills a tall cylinder, ornaments climb a spiral, photo
//! tiles fan across the front face, and the crown holds the apex.
//!
//! ### Discrete target, continuous mix
//!
//! "What is wanted" is a two-value register ([`BlendState`]), flipped by the
//! manual toggle, the gesture adapter, or the upload ritual — last write
//! wins. "Where things are" is a private [`blend::MixFilter`] per particle
//! that exponentially chases the register, so no flip ever causes a visual
//! discontinuity.
//!
//! ### Push-driven gestures, tick-driven application
//!
//! The tracking collaborator pushes [`GestureSample`]s through a
//! [`GestureFeed`] whenever it likes; the scene applies them only at the top
//! of a render tick. An open hand scatters, a closed hand assembles, and
//! losing the subject freezes the pointer instead of snapping it.
//!
//! ### The upload ritual
//!
//! Swapping the photo set is a three-step sequence owned by the caller:
//! [`Scene::force_chaos`], [`Scene::replace_images`], and — after a settle
//! delay — [`Scene::force_formed`].

pub mod blend;
pub mod camera;
pub mod config;
pub mod error;
pub mod gesture;
pub mod particle;
pub mod photos;
pub mod render;
pub mod scene;
pub mod shader;
pub mod spawn;
pub mod time;
pub mod window;

pub use blend::BlendState;
pub use camera::Camera;
pub use config::SceneConfig;
pub use error::{AssetError, GpuError, SceneError};
pub use gesture::{GestureAdapter, GestureFeed, GestureSample};
pub use glam::{Quat, Vec2, Vec3};
pub use particle::{Category, Particle, ShapeParams};
pub use photos::PhotoLibrary;
pub use scene::{Instance, Scene};
pub use spawn::SpawnContext;
pub use time::FrameClock;
pub use window::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tannen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blend::BlendState;
    pub use crate::camera::Camera;
    pub use crate::config::SceneConfig;
    pub use crate::error::SceneError;
    pub use crate::gesture::{GestureAdapter, GestureFeed, GestureSample};
    pub use crate::particle::Category;
    pub use crate::scene::Scene;
    pub use crate::time::FrameClock;
    pub use crate::window::Viewer;
    pub use crate::{Vec2, Vec3};
}

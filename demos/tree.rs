//! Full default scene.
//!
//! Space toggles between the formed tree and the chaos cloud; left drag
//! orbits, scroll zooms.
//! Run with: cargo run --example tree

use tannen::prelude::*;

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let mut config = SceneConfig::default();
    config.ornament_count = 80;

    Viewer::new(Scene::new(config))
        .with_title("Tannen - tree")
        .run()
}

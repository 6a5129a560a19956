//! Headless walk through the photo-upload ritual.
//!
//! Drives the engine without a window: force chaos, swap the image list
//! while everything floats free, wait for the settle delay, then reassemble.
//! Prints the mean mix so the three phases are visible in the output.
//! Run with: cargo run --example upload_ritual

use tannen::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn mean_mix(scene: &Scene) -> f32 {
    let (sum, n) = scene.mixes().fold((0.0, 0u32), |(s, n), m| (s + m, n + 1));
    sum / n as f32
}

fn run_phase(scene: &mut Scene, elapsed: &mut f32, frames: u32, label: &str) {
    for _ in 0..frames {
        scene.update(DT, *elapsed);
        *elapsed += DT;
    }
    println!("{label:<24} mean mix {:.3}", mean_mix(scene));
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new(SceneConfig::mobile());
    let mut elapsed = 0.0;
    run_phase(&mut scene, &mut elapsed, 30, "at rest (formed)");

    // 1. Disperse behind the loading screen.
    scene.force_chaos();
    run_phase(&mut scene, &mut elapsed, 90, "force_chaos");

    // 2. Swap the photo set while everything floats free.
    let uploads: Vec<String> = (1..=8).map(|i| format!("upload/{i}.jpg")).collect();
    scene.replace_images(uploads);
    println!(
        "replaced images        revision {} ({} handles)",
        scene.images_revision(),
        scene.images().len()
    );

    // 3. Settle delay, then fly everything into formation.
    run_phase(&mut scene, &mut elapsed, 48, "settle delay");
    scene.force_formed();
    run_phase(&mut scene, &mut elapsed, 240, "force_formed");
}

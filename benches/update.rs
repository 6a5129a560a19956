//! Frame-update benchmark: how long a full default-scene tick takes on the
//! CPU. A 60 fps frame leaves ~16 ms for everything, so the engine tick
//! should stay comfortably under a millisecond.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tannen::prelude::*;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_update");

    for (label, config) in [
        ("mobile", SceneConfig::mobile()),
        ("default", SceneConfig::default()),
    ] {
        let mut scene = Scene::with_seed(config, 42);
        scene.set_target(BlendState::Chaos);
        let mut elapsed = 0.0f32;

        group.bench_function(label, |b| {
            b.iter(|| {
                elapsed += 1.0 / 60.0;
                scene.update(black_box(1.0 / 60.0), black_box(elapsed));
                black_box(scene.instances().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);

//! Synthetic hand-tracking collaborator.
//!
//! Stands in for a real tracking pipeline: a background thread pushes
//! gesture samples at ~30 Hz, waving the pointer side to side, opening and
//! closing the hand every few seconds, and dropping detection entirely now
//! and then to exercise the loss path.
//! Run with: cargo run --example gesture_feed

use std::thread;
use std::time::Duration;

use tannen::prelude::*;

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let viewer = Viewer::new(Scene::new(SceneConfig::mobile()));
    let feed = viewer.gesture_feed();

    thread::spawn(move || {
        let mut t = 0.0f32;
        loop {
            t += 1.0 / 30.0;

            // Lose the subject for one second out of every ten.
            let detected = (t % 10.0) > 1.0;
            let sample = if detected {
                GestureSample {
                    detected: true,
                    // Open hand (chaos) for the first half of each cycle.
                    is_open: (t % 8.0) < 4.0,
                    position: Vec2::new((t * 0.4).sin() * 0.6, (t * 0.23).cos() * 0.3),
                }
            } else {
                GestureSample::lost()
            };

            if !feed.push(sample) {
                // Viewer is gone; wind the collaborator down.
                break;
            }
            thread::sleep(Duration::from_millis(33));
        }
    });

    viewer.run()
}

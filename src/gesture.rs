//! Gesture input adapter.
//!
//! The hand-tracking collaborator lives outside this crate and pushes
//! [`GestureSample`]s through a [`GestureFeed`] on its own cadence, typically
//! once per processed video frame. Samples are queued and drained once per
//! render tick, never applied mid-frame, so a sample arriving while the
//! particle batch is updating cannot tear the shared target.
//!
//! The mapping is deliberately stateless and unsmoothed: an open hand wants
//! the scattered state, a closed hand wants the formed state, and jitter
//! suppression is the tracker's job. The only memory the adapter keeps is
//! the last known pointer position, retained across detection loss so the
//! camera response fades instead of snapping to center.
//!
//! ```ignore
//! let mut adapter = GestureAdapter::new();
//! let feed = adapter.feed(); // hand to the tracking thread
//!
//! // once per render tick:
//! if let Some(wanted) = adapter.drain(scene.target()) {
//!     scene.set_target(wanted);
//! }
//! ```

use crate::blend::BlendState;
use crate::Vec2;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Horizontal pointer gain compensating for the tracker's sensor framing,
/// which under-reports x travel relative to the display.
pub const POINTER_X_SCALE: f32 = 1.2;

/// One detection event from the external tracking collaborator.
///
/// `position` is normalized to `[-1, 1]` on both axes. When `detected` is
/// false the other fields are meaningless and ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub detected: bool,
    pub is_open: bool,
    pub position: Vec2,
}

impl GestureSample {
    /// A sample reporting the subject was lost.
    pub fn lost() -> Self {
        Self {
            detected: false,
            is_open: false,
            position: Vec2::ZERO,
        }
    }
}

/// Producer handle for the tracking collaborator. Cheap to clone; safe to
/// push from any thread.
#[derive(Clone)]
pub struct GestureFeed {
    tx: Sender<GestureSample>,
}

impl GestureFeed {
    /// Queue a sample for the next render tick. Returns false once the
    /// consuming adapter is gone, letting the producer wind down.
    pub fn push(&self, sample: GestureSample) -> bool {
        self.tx.send(sample).is_ok()
    }
}

/// Consumes gesture samples and maps them onto the blend register and the
/// pointer signal.
pub struct GestureAdapter {
    rx: Receiver<GestureSample>,
    tx: Sender<GestureSample>,
    pointer: Vec2,
    detected: bool,
}

impl GestureAdapter {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            rx,
            tx,
            pointer: Vec2::ZERO,
            detected: false,
        }
    }

    /// A new producer handle for this adapter's queue.
    pub fn feed(&self) -> GestureFeed {
        GestureFeed {
            tx: self.tx.clone(),
        }
    }

    /// Last known pointer position, x pre-scaled by [`POINTER_X_SCALE`].
    /// Frozen, not reset, while the subject is lost.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether the most recent sample reported a detected subject. Downstream
    /// parallax fades its influence on this flag rather than jumping.
    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Apply one sample; returns the state this sample asks for, if any.
    ///
    /// A lost sample changes nothing except the `detected` flag: target and
    /// pointer keep their last values on the very tick the loss occurs.
    pub fn apply(&mut self, sample: &GestureSample) -> Option<BlendState> {
        if !sample.detected {
            self.detected = false;
            return None;
        }
        self.detected = true;
        self.pointer = Vec2::new(sample.position.x * POINTER_X_SCALE, sample.position.y);
        Some(if sample.is_open {
            BlendState::Chaos
        } else {
            BlendState::Formed
        })
    }

    /// Drain every queued sample in arrival order and return the target the
    /// stream settled on, or `None` when nothing arrived or the wanted state
    /// already matches `current` (redundant writes are suppressed).
    pub fn drain(&mut self, current: BlendState) -> Option<BlendState> {
        let mut wanted = None;
        while let Ok(sample) = self.rx.try_recv() {
            if let Some(state) = self.apply(&sample) {
                wanted = Some(state);
            }
        }
        wanted.filter(|state| *state != current)
    }
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

//! Photo image-handle registry.
//!
//! Image references are opaque handles (URLs or paths) passed through the
//! engine unmodified; decoding belongs to the render layer. The registry
//! starts with the bundled default set so the scene is never bare before the
//! first upload, caps uploads at [`MAX_IMAGES`], and bumps a revision counter
//! on every replacement so consumers holding decoded textures know when to
//! reload.

/// Bundled images shown before any user upload.
pub const DEFAULT_IMAGES: [&str; 8] = [
    "defaultImg/1.jpg",
    "defaultImg/2.jpg",
    "defaultImg/3.jpg",
    "defaultImg/4.jpg",
    "defaultImg/5.jpg",
    "defaultImg/6.jpg",
    "defaultImg/7.jpg",
    "defaultImg/8.jpg",
];

/// Upper bound on retained image handles per replacement.
pub const MAX_IMAGES: usize = 30;

/// Ordered list of the scene's current image handles.
#[derive(Debug, Clone)]
pub struct PhotoLibrary {
    handles: Vec<String>,
    revision: u64,
}

impl PhotoLibrary {
    /// Registry seeded with the default image set.
    pub fn new() -> Self {
        Self {
            handles: DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect(),
            revision: 0,
        }
    }

    /// Current handles, in assignment order.
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Monotonic counter, bumped once per [`replace`](Self::replace).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Handle a photo tile at `index` should display, wrapping round-robin
    /// when there are fewer images than tiles.
    pub fn assignment(&self, index: usize) -> Option<&str> {
        if self.handles.is_empty() {
            None
        } else {
            Some(self.handles[index % self.handles.len()].as_str())
        }
    }

    /// Replace every retained handle with `handles`, truncated to
    /// [`MAX_IMAGES`]. The previous handles are released; callers that
    /// minted revocable URLs should revoke them once this returns.
    pub fn replace(&mut self, mut handles: Vec<String>) {
        if handles.len() > MAX_IMAGES {
            log::warn!(
                "photo upload truncated from {} to {} images",
                handles.len(),
                MAX_IMAGES
            );
            handles.truncate(MAX_IMAGES);
        }
        let released = std::mem::replace(&mut self.handles, handles);
        self.revision += 1;
        log::debug!(
            "photo library revision {}: {} handles in, {} released",
            self.revision,
            self.handles.len(),
            released.len()
        );
    }
}

impl Default for PhotoLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_default_set() {
        let library = PhotoLibrary::new();
        assert_eq!(library.len(), 8);
        assert_eq!(library.revision(), 0);
        assert_eq!(library.assignment(0), Some("defaultImg/1.jpg"));
    }

    #[test]
    fn test_assignment_wraps_round_robin() {
        let library = PhotoLibrary::new();
        assert_eq!(library.assignment(9), library.assignment(1));
    }

    #[test]
    fn test_replace_bumps_revision_once() {
        let mut library = PhotoLibrary::new();
        library.replace(vec!["a.png".into(), "b.png".into()]);
        assert_eq!(library.revision(), 1);
        assert_eq!(library.len(), 2);
        assert_eq!(library.assignment(3), Some("b.png"));
    }

    #[test]
    fn test_replace_truncates_to_cap() {
        let mut library = PhotoLibrary::new();
        let too_many: Vec<String> = (0..50).map(|i| format!("{i}.png")).collect();
        library.replace(too_many);
        assert_eq!(library.len(), MAX_IMAGES);
    }

    #[test]
    fn test_empty_replacement_yields_no_assignments() {
        let mut library = PhotoLibrary::new();
        library.replace(Vec::new());
        assert!(library.is_empty());
        assert_eq!(library.assignment(0), None);
    }
}

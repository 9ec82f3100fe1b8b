//! Boundary between the frame loop and whatever draws, reads input and
//! decodes images.

use std::collections::HashSet;

use super::keys::Key;
use super::snapshot::FrameSnapshot;

/// Window the backend is asked to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub name: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Input state sampled once per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub quit: bool,
    /// Keys currently held down.
    pub pressed: HashSet<Key>,
}

impl InputSnapshot {
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("no rendering backend available: {0}")]
    Unavailable(String),
    #[error("failed to open window `{name}`: {reason}")]
    Open { name: String, reason: String },
}

pub trait AssetLoader {
    /// Backend-specific image handle. Cloned into every snapshot.
    type Image: Clone;

    /// `None` when the file is missing or cannot be decoded.
    fn load_image(&mut self, path: &str) -> Option<Self::Image>;
}

/// A pull-style backend driven by `frame::run`.
pub trait Backend: AssetLoader {
    fn open(&mut self, window: &WindowSpec) -> Result<(), BackendError>;
    fn poll(&mut self) -> InputSnapshot;
    fn present(&mut self, frame: &FrameSnapshot<Self::Image>);
    fn release(&mut self);
}

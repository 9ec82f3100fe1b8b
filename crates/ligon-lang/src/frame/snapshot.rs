use crate::runtime::state::{RectCommand, Rgb};

/// Everything a backend needs to draw one tick, back to front: background,
/// rectangles in creation order, then sprites in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot<I> {
    pub background: Rgb,
    pub rectangles: Vec<RectCommand>,
    pub sprites: Vec<SpriteDraw<I>>,
}

/// Positions are whole pixels, truncated toward zero.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteDraw<I> {
    Image {
        name: String,
        image: I,
        position: (i32, i32),
    },
    /// Drawn when the sprite has no loaded image.
    Placeholder {
        name: String,
        position: (i32, i32),
        size: u32,
        color: Rgb,
    },
}

//! Real-time 2D loop: input, physics, animation and snapshot emission.

pub mod backend;
pub mod clock;
pub mod frame_loop;
pub mod keys;
pub mod physics;
pub mod snapshot;

pub use backend::{AssetLoader, Backend, BackendError, InputSnapshot, WindowSpec};
pub use clock::FrameClock;
pub use frame_loop::{FrameConfig, FrameError, FrameLoop, FrameStats, run};
pub use keys::Key;
pub use snapshot::{FrameSnapshot, SpriteDraw};

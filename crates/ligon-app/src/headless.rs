//! Windowless backend: runs a fixed number of ticks without pacing. Images
//! are only probed for their dimensions.

use ligon_lang::{AssetLoader, Backend, BackendError, FrameSnapshot, InputSnapshot, WindowSpec};

use crate::assets::AssetDir;

pub struct HeadlessBackend {
    dir: AssetDir,
    remaining: u64,
}

impl HeadlessBackend {
    pub fn new(dir: AssetDir, ticks: u64) -> Self {
        Self { dir, remaining: ticks }
    }
}

impl AssetLoader for HeadlessBackend {
    /// Width and height in pixels.
    type Image = (u32, u32);

    fn load_image(&mut self, path: &str) -> Option<(u32, u32)> {
        let full = self.dir.resolve(path);
        match image::image_dimensions(&full) {
            Ok(size) => Some(size),
            Err(e) => {
                log::warn!("failed to read {}: {e}", full.display());
                None
            }
        }
    }
}

impl Backend for HeadlessBackend {
    fn open(&mut self, window: &WindowSpec) -> Result<(), BackendError> {
        log::info!("headless: window `{}` {}x{}, {} tick(s)",
            window.name, window.width, window.height, self.remaining);
        Ok(())
    }

    fn poll(&mut self) -> InputSnapshot {
        let quit = self.remaining == 0;
        self.remaining = self.remaining.saturating_sub(1);
        InputSnapshot { quit, ..InputSnapshot::default() }
    }

    fn present(&mut self, frame: &FrameSnapshot<(u32, u32)>) {
        log::trace!("frame: {} rect(s), {} sprite(s)", frame.rectangles.len(), frame.sprites.len());
    }

    fn release(&mut self) {
        log::debug!("headless backend released");
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use ligon_lang::{setup, FrameConfig};

    use super::*;

    #[test]
    fn runs_requested_ticks() {
        let mut state = setup(r#"
            ligon.initialize("2d")
            ligon.sprite.create("hero", "no-such-file.png", 0, 0)
            ligon.sprite.set_velocity("hero", 60, 0)
        "#).unwrap().state;
        let mut backend = HeadlessBackend::new(AssetDir::for_script(Path::new("x.ligon")), 30);
        let config = FrameConfig { paced: false, ..FrameConfig::default() };
        let stats = ligon_lang::run(&mut state, &mut backend, config).unwrap();

        assert_eq!(stats.ticks, 30);
        assert!((state.sprites[0].position.x - 30.0).abs() < 1e-9);
        assert_eq!(stats.diagnostics.len(), 1);
    }

    #[test]
    fn quits_after_budget() {
        let mut backend = HeadlessBackend::new(AssetDir::for_script(Path::new("x.ligon")), 1);
        assert!(backend.load_image("no-such-file.png").is_none());
        assert!(!backend.poll().quit);
        assert!(backend.poll().quit);
        assert!(backend.poll().quit);
    }
}

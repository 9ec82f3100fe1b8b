use crate::error::{Error, ErrorCode};
use crate::runtime::state::{Rgb, RuntimeState, Sprite, Window};
use crate::Value;

use super::backend::{AssetLoader, Backend, BackendError, InputSnapshot, WindowSpec};
use super::clock::FrameClock;
use super::keys::Key;
use super::physics;
use super::snapshot::{FrameSnapshot, SpriteDraw};

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    pub ticks_per_second: u32,
    /// Used when the script declares no window.
    pub default_window: (String, Window),
    pub placeholder_size: u32,
    pub placeholder_color: Rgb,
    pub title: String,
    /// Sleep between ticks in `run`. Off for headless runs.
    pub paced: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            default_window: ("main".to_string(), Window { width: 800, height: 600 }),
            placeholder_size: 32,
            placeholder_color: Rgb(200, 200, 200),
            title: "Ligon - Preview".to_string(),
            paced: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error(transparent)]
    BackendUnavailable(#[from] BackendError),
}

/// Outcome of a completed `run`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub ticks: u64,
    pub diagnostics: Vec<Error>,
}

// ─── Sprite images ────────────────────────────────────────────────────────────

/// Loaded frames of one sprite. Empty means placeholder.
#[derive(Debug, Clone)]
struct SpriteImages<I> {
    frames: Vec<I>,
    current: usize,
}

impl<I: Clone> SpriteImages<I> {
    fn load<L>(sprite: &Sprite, loader: &mut L, diagnostics: &mut Vec<Error>) -> Self
    where
        L: AssetLoader<Image = I> + ?Sized,
    {
        let paths: Vec<&str> = if sprite.frames.is_empty() {
            vec![sprite.asset_path.as_str()]
        } else {
            sprite.frames.iter().map(String::as_str).collect()
        };

        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            match loader.load_image(path) {
                Some(image) => frames.push(image),
                None => {
                    log::debug!("sprite `{}`: cannot load `{path}`", sprite.name);
                    diagnostics.push(Error::new(ErrorCode::W006, 0, 0, format!(
                        "sprite `{}`: image `{path}` failed to load", sprite.name
                    )));
                }
            }
        }
        Self { frames, current: 0 }
    }

    fn advance(&mut self) {
        if self.frames.len() > 1 {
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    fn image(&self) -> Option<&I> {
        self.frames.get(self.current)
    }
}

// ─── Frame loop ───────────────────────────────────────────────────────────────

/// Per-run state of the 2D loop. Owns sprite images until `release`.
///
/// Sprites are fixed once the setup pass is over, so images are kept in the
/// same order as `RuntimeState::sprites`.
pub struct FrameLoop<I> {
    config: FrameConfig,
    images: Vec<SpriteImages<I>>,
    /// Bound key names that resolved to a known key.
    bindings: Vec<(String, Key)>,
    diagnostics: Vec<Error>,
    ticks: u64,
}

impl<I: Clone> FrameLoop<I> {
    /// The window to open, synthesizing the default one into `state` when the
    /// script declared none.
    pub fn window_spec(state: &mut RuntimeState, config: &FrameConfig) -> WindowSpec {
        if state.main_window().is_none() {
            let (name, window) = config.default_window.clone();
            log::debug!("no window declared, using `{name}` {}x{}", window.width, window.height);
            state.add_window(name, window);
        }
        let (name, window) = state.main_window()
            .map(|(name, w)| (name.to_string(), w))
            .unwrap_or_else(|| config.default_window.clone());
        WindowSpec { name, title: config.title.clone(), width: window.width, height: window.height }
    }

    /// Load sprite images and resolve key bindings.
    pub fn new<L>(state: &mut RuntimeState, config: FrameConfig, loader: &mut L) -> Self
    where
        L: AssetLoader<Image = I> + ?Sized,
    {
        let window = Self::window_spec(state, &config);
        let mut diagnostics = Vec::new();

        let images = state.sprites.iter()
            .map(|sprite| SpriteImages::load(sprite, &mut *loader, &mut diagnostics))
            .collect();

        let mut bindings = Vec::new();
        for name in state.key_bindings.keys() {
            match Key::from_name(name) {
                Some(key) => bindings.push((name.clone(), key)),
                None => {
                    log::debug!("unknown key `{name}` skipped");
                    diagnostics.push(Error::new(ErrorCode::W005, 0, 0,
                        format!("unknown key name `{name}` in binding")));
                }
            }
        }

        log::info!("2D loop: window `{}` {}x{}, {} sprite(s), {} binding(s)",
            window.name, window.width, window.height, state.sprites.len(), bindings.len());

        Self { config, images, bindings, diagnostics, ticks: 0 }
    }

    pub fn config(&self) -> &FrameConfig { &self.config }

    pub fn ticks(&self) -> u64 { self.ticks }

    /// One tick: key bindings, physics, animation, snapshot.
    pub fn tick(&mut self, state: &mut RuntimeState, input: &InputSnapshot) -> FrameSnapshot<I> {
        for (name, key) in &self.bindings {
            let pressed = input.is_pressed(*key);
            if let Some(binding) = state.key_bindings.get_mut(name) {
                binding.last_pressed = pressed;
                state.variables.insert(binding.variable.clone(), Value::Bool(pressed));
            }
        }

        physics::integrate(state, self.config.ticks_per_second);

        for images in &mut self.images {
            images.advance();
        }

        self.ticks += 1;
        self.snapshot(state)
    }

    /// Current frame without advancing anything.
    pub fn snapshot(&self, state: &RuntimeState) -> FrameSnapshot<I> {
        let sprites = state.sprites.iter().enumerate().map(|(i, sprite)| {
            let position = (sprite.position.x as i32, sprite.position.y as i32);
            let name = sprite.name.clone();
            match self.images.get(i).and_then(SpriteImages::image) {
                Some(image) => SpriteDraw::Image { name, image: image.clone(), position },
                None => SpriteDraw::Placeholder {
                    name,
                    position,
                    size: self.config.placeholder_size,
                    color: self.config.placeholder_color,
                },
            }
        }).collect();

        FrameSnapshot {
            background: state.background_color,
            rectangles: state.rectangles.clone(),
            sprites,
        }
    }

    /// Drop sprite images, returning load-time anomalies (`W005`, `W006`).
    pub fn release(mut self) -> Vec<Error> {
        log::debug!("releasing {} sprite image set(s) after {} tick(s)", self.images.len(), self.ticks);
        self.images.clear();
        self.diagnostics
    }
}

// ─── Pull-style driver ────────────────────────────────────────────────────────

/// Open `backend`, then tick until it reports quit. Images are released before
/// the backend.
pub fn run<B: Backend>(
    state: &mut RuntimeState,
    backend: &mut B,
    config: FrameConfig,
) -> Result<FrameStats, FrameError> {
    let window = FrameLoop::<B::Image>::window_spec(state, &config);
    backend.open(&window)?;

    let mut clock = if config.paced {
        FrameClock::new(config.ticks_per_second)
    } else {
        FrameClock::unpaced()
    };
    let mut frame_loop = FrameLoop::new(state, config, &mut *backend);

    loop {
        let input = backend.poll();
        if input.quit {
            break;
        }
        let frame = frame_loop.tick(state, &input);
        backend.present(&frame);
        clock.wait();
    }

    let ticks = frame_loop.ticks();
    let diagnostics = frame_loop.release();
    backend.release();
    log::info!("2D loop finished after {ticks} tick(s)");
    Ok(FrameStats { ticks, diagnostics })
}

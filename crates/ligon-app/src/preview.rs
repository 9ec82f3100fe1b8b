//! Windowed backend on eframe/egui.
//!
//! eframe owns the event loop, so the frame loop is driven from `update`
//! with a fixed-step accumulator instead of `ligon_lang::run`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Pos2, Rect};
use ligon_lang::{Error, FrameConfig, FrameLoop, FrameSnapshot, InputSnapshot, Key, Rgb, RuntimeState, SpriteDraw};

use crate::assets::{AssetDir, TextureLoader};

type Texture = egui::TextureHandle;

/// Ticks allowed per repaint before the backlog is dropped.
const MAX_CATCH_UP: u32 = 5;

// ─── Entry point ──────────────────────────────────────────────────────────────

/// Open the preview window and block until it is closed. Returns the loop's
/// diagnostics.
pub fn run_preview(
    mut state: RuntimeState,
    dir: AssetDir,
    config: FrameConfig,
) -> Result<Vec<Error>, eframe::Error> {
    let window = FrameLoop::<Texture>::window_spec(&mut state, &config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&window.title)
            .with_inner_size([window.width as f32, window.height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    let diagnostics = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&diagnostics);
    let title = window.title.clone();

    eframe::run_native(&title, options, Box::new(move |cc| {
        let mut loader = TextureLoader::new(cc.egui_ctx.clone(), dir);
        let frame_loop = FrameLoop::new(&mut state, config, &mut loader);
        Ok(Box::new(Preview::new(state, frame_loop, sink)))
    }))?;

    Ok(diagnostics.take())
}

// ─── App ──────────────────────────────────────────────────────────────────────

struct Preview {
    state: RuntimeState,
    frame_loop: Option<FrameLoop<Texture>>,
    frame: FrameSnapshot<Texture>,
    period: Duration,
    last: Instant,
    backlog: Duration,
    diagnostics: Rc<RefCell<Vec<Error>>>,
}

impl Preview {
    fn new(state: RuntimeState, frame_loop: FrameLoop<Texture>, diagnostics: Rc<RefCell<Vec<Error>>>) -> Self {
        let frame = frame_loop.snapshot(&state);
        let rate = frame_loop.config().ticks_per_second.max(1);
        Self {
            state,
            frame,
            period: Duration::from_secs_f64(1.0 / f64::from(rate)),
            frame_loop: Some(frame_loop),
            last: Instant::now(),
            backlog: Duration::ZERO,
            diagnostics,
        }
    }

    /// Release images once; later calls do nothing.
    fn shut_down(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            self.frame.sprites.clear();
            self.diagnostics.borrow_mut().extend(frame_loop.release());
        }
    }

    fn paint(&self, ui: &egui::Ui) {
        let canvas = ui.max_rect();
        let painter = ui.painter_at(canvas);
        let at = |x: f32, y: f32| canvas.min + egui::vec2(x, y);

        painter.rect_filled(canvas, 0.0, color(self.frame.background));

        for rect in &self.frame.rectangles {
            let b = rect.bounds;
            let area = Rect::from_min_size(at(b.x as f32, b.y as f32), egui::vec2(b.width as f32, b.height as f32));
            painter.rect_filled(area, 0.0, color(rect.color));
        }

        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        for sprite in &self.frame.sprites {
            match sprite {
                SpriteDraw::Image { image, position, .. } => {
                    let area = Rect::from_min_size(at(position.0 as f32, position.1 as f32), image.size_vec2());
                    painter.image(image.id(), area, uv, Color32::WHITE);
                }
                SpriteDraw::Placeholder { position, size, color: c, .. } => {
                    let side = *size as f32;
                    let area = Rect::from_min_size(at(position.0 as f32, position.1 as f32), egui::vec2(side, side));
                    painter.rect_filled(area, 0.0, color(*c));
                }
            }
        }
    }
}

impl eframe::App for Preview {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let input = ctx.input(|i| InputSnapshot {
            quit: i.viewport().close_requested(),
            pressed: Key::ALL.into_iter().filter(|&k| i.key_down(egui_key(k))).collect(),
        });

        if input.quit {
            self.shut_down();
            return;
        }

        if let Some(frame_loop) = &mut self.frame_loop {
            let now = Instant::now();
            self.backlog += now.saturating_duration_since(self.last);
            self.last = now;

            let mut steps = 0;
            while self.backlog >= self.period && steps < MAX_CATCH_UP {
                self.frame = frame_loop.tick(&mut self.state, &input);
                self.backlog -= self.period;
                steps += 1;
            }
            if steps == MAX_CATCH_UP {
                self.backlog = Duration::ZERO;
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.paint(ui));

        ctx.request_repaint_after(self.period);
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.shut_down();
    }
}

// ─── Conversions ──────────────────────────────────────────────────────────────

fn color(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn egui_key(key: Key) -> egui::Key {
    use egui::Key as E;
    match key {
        Key::Escape    => E::Escape,
        Key::Enter     => E::Enter,
        Key::Tab       => E::Tab,
        Key::Backspace => E::Backspace,
        Key::Space     => E::Space,
        Key::Insert    => E::Insert,
        Key::Delete    => E::Delete,
        Key::Home      => E::Home,
        Key::End       => E::End,
        Key::PageUp    => E::PageUp,
        Key::PageDown  => E::PageDown,
        Key::Up        => E::ArrowUp,
        Key::Down      => E::ArrowDown,
        Key::Left      => E::ArrowLeft,
        Key::Right     => E::ArrowRight,
        Key::A => E::A, Key::B => E::B, Key::C => E::C, Key::D => E::D,
        Key::E => E::E, Key::F => E::F, Key::G => E::G, Key::H => E::H,
        Key::I => E::I, Key::J => E::J, Key::K => E::K, Key::L => E::L,
        Key::M => E::M, Key::N => E::N, Key::O => E::O, Key::P => E::P,
        Key::Q => E::Q, Key::R => E::R, Key::S => E::S, Key::T => E::T,
        Key::U => E::U, Key::V => E::V, Key::W => E::W, Key::X => E::X,
        Key::Y => E::Y, Key::Z => E::Z,
        Key::Digit0 => E::Num0, Key::Digit1 => E::Num1, Key::Digit2 => E::Num2,
        Key::Digit3 => E::Num3, Key::Digit4 => E::Num4, Key::Digit5 => E::Num5,
        Key::Digit6 => E::Num6, Key::Digit7 => E::Num7, Key::Digit8 => E::Num8,
        Key::Digit9 => E::Num9,
        Key::F1  => E::F1,  Key::F2  => E::F2,  Key::F3  => E::F3,
        Key::F4  => E::F4,  Key::F5  => E::F5,  Key::F6  => E::F6,
        Key::F7  => E::F7,  Key::F8  => E::F8,  Key::F9  => E::F9,
        Key::F10 => E::F10, Key::F11 => E::F11, Key::F12 => E::F12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_maps_to_a_distinct_egui_key() {
        let mapped: std::collections::HashSet<_> = Key::ALL.into_iter().map(egui_key).collect();
        assert_eq!(mapped.len(), Key::ALL.len());
    }
}

use std::collections::{BTreeMap, HashMap};

use crate::Value;

// ─── Geometry & color ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Pixel rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

// ─── Scene records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectCommand {
    pub bounds: Bounds,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub asset_path: String,
    /// Animation frame paths; when non-empty they replace `asset_path`.
    pub frames: Vec<String>,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Physics {
    pub gravity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub variable: String,
    pub last_pressed: bool,
}

// ─── Runtime state ───────────────────────────────────────────────────────────

/// Everything a program can observe or change. Created empty, mutated by the
/// setup pass and every frame tick, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeState {
    pub variables: HashMap<String, Value>,
    pub mode: String,
    pub windows: BTreeMap<String, Window>,
    pub main_window: Option<String>,
    pub background_color: Rgb,
    pub draw_color: Rgb,
    pub rectangles: Vec<RectCommand>,
    /// Creation order is draw order.
    pub sprites: Vec<Sprite>,
    pub physics: Physics,
    /// Keyed by upper-cased key name.
    pub key_bindings: BTreeMap<String, KeyBinding>,
    pub services: Vec<String>,
    pub models: Vec<String>,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            variables: HashMap::new(),
            mode: "unknown".to_string(),
            windows: BTreeMap::new(),
            main_window: None,
            background_color: Rgb::BLACK,
            draw_color: Rgb::WHITE,
            rectangles: Vec::new(),
            sprites: Vec::new(),
            physics: Physics::default(),
            key_bindings: BTreeMap::new(),
            services: Vec::new(),
            models: Vec::new(),
        }
    }
}

impl RuntimeState {
    pub fn new() -> Self { Self::default() }

    /// `"2d"`, `"2D"` and `"2"` all select the real-time 2D loop.
    pub fn is_2d(&self) -> bool {
        self.mode.trim().starts_with('2')
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.name == name)
    }

    pub fn sprite_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.name == name)
    }

    /// Re-creating a sprite replaces it in place, keeping its draw order.
    pub fn upsert_sprite(&mut self, sprite: Sprite) {
        match self.sprite_mut(&sprite.name) {
            Some(slot) => *slot = sprite,
            None => self.sprites.push(sprite),
        }
    }

    /// First window created, with its name.
    pub fn main_window(&self) -> Option<(&str, Window)> {
        let name = self.main_window.as_deref()?;
        self.windows.get(name).map(|w| (name, *w))
    }

    pub fn add_window(&mut self, name: String, window: Window) {
        if self.main_window.is_none() {
            self.main_window = Some(name.clone());
        }
        self.windows.insert(name, window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_detection() {
        let mut state = RuntimeState::new();
        assert!(!state.is_2d());
        for mode in ["2d", "2D", "2"] {
            state.mode = mode.into();
            assert!(state.is_2d(), "{mode}");
        }
        state.mode = "3d".into();
        assert!(!state.is_2d());
    }

    #[test]
    fn first_window_is_main() {
        let mut state = RuntimeState::new();
        state.add_window("a".into(), Window { width: 1, height: 2 });
        state.add_window("b".into(), Window { width: 3, height: 4 });
        assert_eq!(state.main_window(), Some(("a", Window { width: 1, height: 2 })));
    }

    #[test]
    fn upsert_keeps_order() {
        let mut state = RuntimeState::new();
        for name in ["a", "b"] {
            state.upsert_sprite(Sprite {
                name: name.into(),
                asset_path: String::new(),
                frames: Vec::new(),
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
            });
        }
        let mut replacement = state.sprites[0].clone();
        replacement.position = Vec2::new(5.0, 5.0);
        state.upsert_sprite(replacement);
        assert_eq!(state.sprites.len(), 2);
        assert_eq!(state.sprites[0].name, "a");
        assert_eq!(state.sprites[0].position, Vec2::new(5.0, 5.0));
    }
}

//! Sprite image loading. Script paths are relative to the script's directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui;
use ligon_lang::AssetLoader;

#[derive(Debug, Clone)]
pub struct AssetDir {
    base: PathBuf,
}

impl AssetDir {
    pub fn for_script(script: &Path) -> Self {
        let base = script.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { base }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() { path.to_path_buf() } else { self.base.join(path) }
    }
}

pub fn decode(path: &Path) -> Result<egui::ColorImage> {
    let rgba = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

// ─── egui textures ────────────────────────────────────────────────────────────

/// Uploads decoded images as egui textures. A path shared by several sprites
/// or frames is uploaded once.
pub struct TextureLoader {
    ctx: egui::Context,
    dir: AssetDir,
    cache: HashMap<PathBuf, egui::TextureHandle>,
}

impl TextureLoader {
    pub fn new(ctx: egui::Context, dir: AssetDir) -> Self {
        Self { ctx, dir, cache: HashMap::new() }
    }
}

impl AssetLoader for TextureLoader {
    type Image = egui::TextureHandle;

    fn load_image(&mut self, path: &str) -> Option<egui::TextureHandle> {
        let full = self.dir.resolve(path);
        if let Some(texture) = self.cache.get(&full) {
            return Some(texture.clone());
        }
        match decode(&full) {
            Ok(image) => {
                let texture = self.ctx.load_texture(path, image, egui::TextureOptions::NEAREST);
                self.cache.insert(full, texture.clone());
                Some(texture)
            }
            Err(e) => {
                log::warn!("{e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_script() {
        let dir = AssetDir::for_script(Path::new("games/demo/main.ligon"));
        assert_eq!(dir.resolve("hero.png"), PathBuf::from("games/demo/hero.png"));
        assert_eq!(dir.resolve("art/a.png"), PathBuf::from("games/demo/art/a.png"));
    }

    #[test]
    fn bare_script_name_uses_cwd() {
        let dir = AssetDir::for_script(Path::new("main.ligon"));
        assert_eq!(dir.resolve("hero.png"), PathBuf::from("hero.png"));
    }

    #[test]
    fn missing_file_fails_to_decode() {
        assert!(decode(Path::new("definitely/not/here.png")).is_err());
    }
}

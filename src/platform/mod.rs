//! Platform abstraction layer
//!
//! The simulation never talks to the browser directly. Everything the game
//! needs from the host sits behind two traits:
//! - [`Surface`]: 2D drawing primitives (canvas on web)
//! - [`KeyValueStore`]: persistent storage (LocalStorage on web)
//!
//! Frame scheduling stays in the front end; the core only assumes it is
//! called once per displayed frame and never reentrantly.

use std::collections::HashMap;

use glam::Vec2;

/// Opaque 8-bit RGB color handed to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 0xff, g: 0xff, b: 0xff };
    pub const BLACK: Color = Color { r: 0x00, g: 0x00, b: 0x00 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string for canvas backends
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What to stamp at a position; the surface owns the actual bitmaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Alien,
    /// One frame of the horizontal explosion strip
    ExplosionFrame { frame: u32, of: u32 },
}

/// Text placement relative to the given position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// 2D drawing primitives in drawing-surface pixel coordinates
pub trait Surface {
    /// Surface size in pixels
    fn size(&self) -> Vec2;
    /// Erase the rectangle from `origin` spanning `extent`
    fn clear_region(&mut self, origin: Vec2, extent: Vec2);
    /// Filled circle
    fn draw_disc(&mut self, center: Vec2, radius: f32, color: Color);
    /// Sprite scaled to cover the disc at `center` with `radius`
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, radius: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: TextAnchor);
}

/// Persistent string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store used by native builds and tests
#[derive(Debug, Default)]
pub struct MemStore {
    entries: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_roundtrip() {
        let mut store = MemStore::new();
        assert_eq!(store.get("record"), None);
        store.set("record", "7");
        store.set("record", "9");
        assert_eq!(store.get("record").as_deref(), Some("9"));
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::WHITE.css(), "#ffffff");
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).css(), "#123456");
    }
}

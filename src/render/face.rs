//! Text faces: the one place that measures and draws glyphs.
//!
//! Every wrap and centering decision goes through [`TextFace::text_size`],
//! and every glyph goes through [`TextFace::draw_text`] on the *same* value,
//! so measurement and drawing cannot drift apart.
//!
//! The production implementation is [`Typeface`]: an `ab_glyph` font plus a
//! pixel scale, measured with `imageproc::drawing::text_size` and drawn with
//! `imageproc::drawing::draw_text_mut`. Tests use a block-glyph face with
//! fixed metrics (see `test_helpers`).

use super::error::RenderError;
use crate::config::{FontSpec, FontsConfig};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Bounding size of a rendered string, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// A font at a fixed size that can both measure and draw text.
pub trait TextFace {
    /// Size of the glyph boxes of `text`. The width is the pen advance
    /// [`draw_text`](Self::draw_text) uses; the height is the tallest glyph.
    fn text_size(&self, text: &str) -> TextSize;

    /// Height of the line box: every glyph drawn at `y` lies on rows
    /// `y..y + line_box_height()`, descenders included.
    fn line_box_height(&self) -> u32;

    /// Paint `text` in the line box whose top-left corner is `(x, y)`.
    fn draw_text(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str);
}

/// A TrueType/OpenType font loaded from disk at one pixel size.
pub struct Typeface {
    font: FontVec,
    scale: PxScale,
}

impl Typeface {
    /// Parse font bytes. Fails on anything `ab_glyph` cannot read.
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, ab_glyph::InvalidFont> {
        Ok(Self {
            font: FontVec::try_from_vec(data)?,
            scale: PxScale::from(size),
        })
    }

    /// Load the font named by `spec`, relative to `root`.
    ///
    /// A missing file is fatal: there is no fallback font.
    pub fn load(spec: &FontSpec, root: &Path) -> Result<Self, RenderError> {
        let path = root.join(&spec.path);
        let data = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RenderError::FontNotFound(path.clone()),
            _ => RenderError::Io(e),
        })?;
        Self::from_bytes(data, spec.size).map_err(|e| RenderError::InvalidFont {
            path,
            reason: e.to_string(),
        })
    }
}

impl TextFace for Typeface {
    fn text_size(&self, text: &str) -> TextSize {
        let (width, height) = imageproc::drawing::text_size(self.scale, &self.font, text);
        TextSize { width, height }
    }

    /// Ascent to descent. `draw_text_mut` puts the baseline at `y + ascent`.
    fn line_box_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent()).ceil() as u32
    }

    fn draw_text(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        imageproc::drawing::draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

/// The three faces of a post, loaded once per render.
pub struct FontSet<F> {
    pub title: F,
    pub description: F,
    pub code: F,
}

impl FontSet<Typeface> {
    /// Load all three fonts. The first missing or unreadable file aborts.
    pub fn load(fonts: &FontsConfig, root: &Path) -> Result<Self, RenderError> {
        Ok(Self {
            title: Typeface::load(&fonts.title, root)?,
            description: Typeface::load(&fonts.description, root)?,
            code: Typeface::load(&fonts.code, root)?,
        })
    }
}

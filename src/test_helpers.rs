//! Shared test utilities for the daily-post test suite.
//!
//! Real fonts are not checked into the repository, so layout and rendering
//! tests use [`BlockFace`]: every character is `advance` pixels wide and every
//! non-empty string is `height` pixels tall, and glyphs are painted as solid
//! blocks. Numbers in assertions can then be worked out by hand.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let fonts = block_fonts();
//! let plan = plan_page(&hello_world_post(), &fonts, &RenderStyle::default(), None);
//! assert_eq!(plan.description.lines.len(), 3);
//! ```

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::config::FontSpec;
use crate::post::Post;
use crate::render::layout::Bounds;
use crate::render::paint::fill_rect;
use crate::render::{FontSet, TextFace, TextSize, Typeface};

// =========================================================================
// Block-glyph face
// =========================================================================

/// Fixed-metric face that paints each non-whitespace character as a block.
#[derive(Debug, Clone, Copy)]
pub struct BlockFace {
    pub advance: u32,
    pub height: u32,
}

impl TextFace for BlockFace {
    fn text_size(&self, text: &str) -> TextSize {
        if text.is_empty() {
            return TextSize::default();
        }
        TextSize {
            width: text.chars().count() as u32 * self.advance,
            height: self.height,
        }
    }

    fn line_box_height(&self) -> u32 {
        self.height
    }

    fn draw_text(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let glyph = Bounds {
                x: x + (i as u32 * self.advance) as i32,
                y,
                width: self.advance.saturating_sub(1).max(1),
                height: self.height,
            };
            fill_rect(canvas, glyph, color);
        }
    }
}

/// Title 12×20, description and code 8×14.
pub fn block_fonts() -> FontSet<BlockFace> {
    FontSet {
        title: BlockFace {
            advance: 12,
            height: 20,
        },
        description: BlockFace {
            advance: 8,
            height: 14,
        },
        code: BlockFace {
            advance: 8,
            height: 14,
        },
    }
}

// =========================================================================
// TrueType fixtures
// =========================================================================

/// Load a font from `tests/fixtures/fonts/` (DejaVu, see `LICENSE-DejaVu`).
pub fn fixture_typeface(file: &str, size: f32) -> Typeface {
    let spec = FontSpec {
        path: format!("tests/fixtures/fonts/{file}"),
        size,
    };
    Typeface::load(&spec, Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap()
}

/// Topmost and bottommost rows holding any pixel other than `background`.
pub fn painted_rows(canvas: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32)> {
    let rows: Vec<u32> = canvas
        .enumerate_rows()
        .filter_map(|(y, mut row)| row.any(|(_, _, p)| *p != background).then_some(y))
        .collect();
    Some((*rows.first()?, *rows.last()?))
}

// =========================================================================
// Fixtures
// =========================================================================

/// The canonical small post: a paragraph, two bullets, one line of code.
pub fn hello_world_post() -> Post {
    Post {
        title: "Hello World".to_string(),
        description: "A short intro.\n*  point one\n*  point two".to_string(),
        code: "print('hi')\n".to_string(),
    }
}

/// Write a semi-transparent PNG logo of the given size.
pub fn write_logo(path: &Path, width: u32, height: u32) {
    let logo = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 160])
    });
    logo.save(path).unwrap();
}

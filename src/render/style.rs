//! Immutable style record for one render.
//!
//! [`RenderStyle`] is the resolved form of [`PostConfig`]: colors are parsed
//! into pixels and every spacing constant the layouts use is listed here, so
//! the renderer has no hidden module-level literals.

use crate::config::{CanvasMode, ConfigError, LayoutConfig, PostConfig, parse_hex_color};
use image::Rgba;

/// Parsed colors for every painted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    pub code_text: Rgba<u8>,
    pub border: Rgba<u8>,
    pub title_shadow: Rgba<u8>,
    pub description_shadow: Rgba<u8>,
    pub code_background: Rgba<u8>,
    pub code_frame: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub mode: CanvasMode,
    pub content_width: u32,
    pub fixed_width: u32,
    pub fixed_height: u32,
    pub margin: u32,
    pub padding: u32,
    pub border_width: u32,
    pub palette: Palette,
    pub layout: LayoutConfig,
}

impl RenderStyle {
    pub fn from_config(config: &PostConfig) -> Result<Self, ConfigError> {
        let colors = &config.colors;
        Ok(Self {
            mode: config.canvas.mode,
            content_width: config.canvas.content_width,
            fixed_width: config.canvas.fixed_width,
            fixed_height: config.canvas.fixed_height,
            margin: config.canvas.margin,
            padding: config.canvas.padding,
            border_width: config.canvas.border_width,
            palette: Palette {
                background: parse_hex_color(&colors.background)?,
                text: parse_hex_color(&colors.text)?,
                code_text: parse_hex_color(&colors.code_text)?,
                border: parse_hex_color(&colors.border)?,
                title_shadow: parse_hex_color(&colors.title_shadow)?,
                description_shadow: parse_hex_color(&colors.description_shadow)?,
                code_background: parse_hex_color(&colors.code_background)?,
                code_frame: parse_hex_color(&colors.code_frame)?,
            },
            layout: config.layout.clone(),
        })
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&PostConfig::default()).expect("stock colors must parse")
    }
}

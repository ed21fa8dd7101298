//! Render configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! reproduce the house style of the daily post (teal background, white text,
//! black code block); a user `config.toml` only needs the keys it changes.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the working directory by default, or in the
//! directory passed with `--config`. Relative font, logo and output paths are
//! resolved against that same directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "post.png"        # Rendered image path
//!
//! [canvas]
//! mode = "dynamic"           # "dynamic" (height from content) or "fixed"
//! content_width = 800        # Dynamic mode: width between the margins
//! fixed_width = 1060         # Fixed mode: canvas size before the border frame
//! fixed_height = 1060
//! margin = 40
//! padding = 20               # Inner padding of the code block
//! border_width = 10          # Solid frame added around the finished image
//!
//! [colors]
//! background = "#00A79D"
//! text = "#FFFFFF"
//! code_text = "#FFFFFF"
//! border = "#FFFFFF"
//! title_shadow = "#117C71"
//! description_shadow = "#109B8E"
//! code_background = "#000000"
//! code_frame = "#FFFFFF"
//!
//! [fonts.title]
//! path = "fonts/Montserrat/static/Montserrat-Bold.ttf"
//! size = 22.0
//!
//! [logo]
//! path = "logo.png"          # Missing logo is not an error
//! size = 80
//!
//! [publish]
//! pause_secs = 5             # Pause between pipeline stages
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostConfig {
    /// Path of the rendered image, relative to the config directory.
    pub output: String,
    /// Canvas sizing and frame settings.
    pub canvas: CanvasConfig,
    /// Colors for every painted element.
    pub colors: ColorConfig,
    /// The three typefaces.
    pub fonts: FontsConfig,
    /// Optional logo overlay.
    pub logo: LogoConfig,
    /// Spacing constants used by the band layouts.
    pub layout: LayoutConfig,
    /// Orchestration settings for the `publish` command.
    pub publish: PublishConfig,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            output: "post.png".to_string(),
            canvas: CanvasConfig::default(),
            colors: ColorConfig::default(),
            fonts: FontsConfig::default(),
            logo: LogoConfig::default(),
            layout: LayoutConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl PostConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        for (name, value) in self.colors.entries() {
            parse_hex_color(value).map_err(|_| {
                ConfigError::Validation(format!("colors.{name}: invalid color '{value}'"))
            })?;
        }
        for (name, spec) in [
            ("title", &self.fonts.title),
            ("description", &self.fonts.description),
            ("code", &self.fonts.code),
        ] {
            if !(spec.size > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "fonts.{name}.size must be positive"
                )));
            }
        }
        if self.canvas.content_width == 0 {
            return Err(ConfigError::Validation(
                "canvas.content_width must be non-zero".into(),
            ));
        }
        if self.canvas.margin < self.layout.code_frame_width {
            return Err(ConfigError::Validation(
                "canvas.margin must be at least layout.code_frame_width".into(),
            ));
        }
        if self.canvas.mode == CanvasMode::Fixed {
            let min_height = 2 * self.canvas.margin
                + self.layout.min_code_height
                + self.layout.band_gap;
            if self.canvas.fixed_height <= min_height {
                return Err(ConfigError::Validation(format!(
                    "canvas.fixed_height must exceed {min_height} (margins + code block + gap)"
                )));
            }
            if self.canvas.fixed_width <= 2 * self.canvas.margin {
                return Err(ConfigError::Validation(
                    "canvas.fixed_width must exceed twice the margin".into(),
                ));
            }
        }
        if self.layout.bullet_marker.is_empty() {
            return Err(ConfigError::Validation(
                "layout.bullet_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// How the canvas height is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasMode {
    /// Height follows the content; nothing is ever truncated.
    #[default]
    Dynamic,
    /// Constant canvas size; overflowing description and code are dropped.
    Fixed,
}

/// Canvas sizing and frame settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub mode: CanvasMode,
    /// Width between the left and right margins in dynamic mode.
    pub content_width: u32,
    /// Canvas width in fixed mode, before the border frame is added.
    pub fixed_width: u32,
    /// Canvas height in fixed mode, before the border frame is added.
    pub fixed_height: u32,
    pub margin: u32,
    /// Inner padding of the code block.
    pub padding: u32,
    /// Width of the solid frame added around the finished image.
    pub border_width: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            mode: CanvasMode::Dynamic,
            content_width: 800,
            fixed_width: 1060,
            fixed_height: 1060,
            margin: 40,
            padding: 20,
            border_width: 10,
        }
    }
}

/// Colors as `#RRGGBB` or `#RGB` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    pub code_text: String,
    /// Color of the frame around the finished image.
    pub border: String,
    pub title_shadow: String,
    pub description_shadow: String,
    pub code_background: String,
    /// Thin frame drawn around the code block.
    pub code_frame: String,
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("code_text", &self.code_text),
            ("border", &self.border),
            ("title_shadow", &self.title_shadow),
            ("description_shadow", &self.description_shadow),
            ("code_background", &self.code_background),
            ("code_frame", &self.code_frame),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#00A79D".to_string(),
            text: "#FFFFFF".to_string(),
            code_text: "#FFFFFF".to_string(),
            border: "#FFFFFF".to_string(),
            title_shadow: "#117C71".to_string(),
            description_shadow: "#109B8E".to_string(),
            code_background: "#000000".to_string(),
            code_frame: "#FFFFFF".to_string(),
        }
    }
}

/// A font file and its pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSpec {
    pub path: String,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    pub title: FontSpec,
    pub description: FontSpec,
    pub code: FontSpec,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            title: FontSpec {
                path: "fonts/Montserrat/static/Montserrat-Bold.ttf".to_string(),
                size: 22.0,
            },
            description: FontSpec {
                path: "fonts/Montserrat/static/Montserrat-SemiBold.ttf".to_string(),
                size: 16.0,
            },
            code: FontSpec {
                path: "fonts/Fira_Code/FiraCode-VariableFont_wght.ttf".to_string(),
                size: 16.0,
            },
        }
    }
}

/// Logo overlay placed in the bottom-right corner of the code block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub path: String,
    /// Edge length the logo is resized to (it is always square).
    pub size: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            path: "logo.png".to_string(),
            size: 80,
        }
    }
}

/// Spacing constants for the band layouts, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Drop-shadow offset for title and description text.
    pub shadow_offset: u32,
    /// Distance from the title's top edge to the underline, below the title height.
    pub underline_gap: u32,
    pub underline_thickness: u32,
    /// Space between the underline and the description band.
    pub title_gap: u32,
    /// Extra space between description lines.
    pub line_spacing: u32,
    /// Indent of bulleted description lines.
    pub bullet_indent: u32,
    /// Prefix that marks a description line as a bullet.
    pub bullet_marker: String,
    /// Space between the description band and the code block.
    pub band_gap: u32,
    /// Extra space between code lines.
    pub code_line_spacing: u32,
    /// Width of the frame drawn around the code block.
    pub code_frame_width: u32,
    /// Distance between the logo and the code block's bottom-right corner.
    pub logo_inset: u32,
    /// Smallest code block height; fixed mode reserves it below the description.
    pub min_code_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shadow_offset: 2,
            underline_gap: 10,
            underline_thickness: 2,
            title_gap: 20,
            line_spacing: 10,
            bullet_indent: 20,
            bullet_marker: "*  ".to_string(),
            band_gap: 20,
            code_line_spacing: 5,
            code_frame_width: 2,
            logo_inset: 5,
            min_code_height: 300,
        }
    }
}

/// Settings for the `publish` pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Fixed pause between pipeline stages, in seconds.
    pub pause_secs: u64,
    /// Chat model used for post and caption generation.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Base URL of the chat-completions API.
    pub api_base: String,
    /// HTTP timeout for one model call, in seconds.
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            pause_secs: 5,
            model: "gpt-4.1-mini".to_string(),
            temperature: 1.0,
            max_tokens: 1024,
            api_base: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Parse `#RRGGBB` or `#RGB` into an opaque RGBA pixel.
pub fn parse_hex_color(value: &str) -> Result<image::Rgba<u8>, ConfigError> {
    let hex = value.trim().trim_start_matches('#');
    let invalid = || ConfigError::Validation(format!("invalid color: {value}"));
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(image::Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(image::Rgba([short(0)?, short(1)?, short(2)?, 255]))
        }
        _ => Err(invalid()),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock [`PostConfig`] as a TOML table, the base every user file is merged
/// onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PostConfig::default()).expect("default config must serialize")
}

/// Overlay `user` onto `base`. Tables merge per key at every depth; any
/// other user value replaces the base value, arrays included.
pub fn merge_toml(base: toml::Value, user: toml::Value) -> toml::Value {
    match (base, user) {
        (toml::Value::Table(mut table), toml::Value::Table(user_table)) => {
            for (key, value) in user_table {
                let merged = match table.remove(&key) {
                    Some(stock) => merge_toml(stock, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, user) => user,
    }
}

/// Parse `<dir>/config.toml`, or `None` when the directory has none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let content = match fs::read_to_string(dir.join("config.toml")) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Build a validated [`PostConfig`] from the stock table and an optional
/// user table.
pub fn resolve_config(
    base: toml::Value,
    user: Option<toml::Value>,
) -> Result<PostConfig, ConfigError> {
    let merged = match user {
        Some(user) => merge_toml(base, user),
        None => base,
    };
    let config: PostConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The config for assets rooted at `dir`: stock values with `config.toml`
/// on top.
pub fn load_config(dir: &Path) -> Result<PostConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# daily-post configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Relative paths are resolved against the directory holding this file.
# Unknown keys will cause an error.

# Where the rendered image is written.
output = "post.png"

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# "dynamic": canvas height follows the content, nothing is truncated.
# "fixed":   constant canvas size; description and code lines that do not
#            fit are dropped.
mode = "dynamic"

# Width between the margins (dynamic mode).
content_width = 800

# Canvas size before the border frame is added (fixed mode).
fixed_width = 1060
fixed_height = 1060

margin = 40
# Inner padding of the code block.
padding = 20
# Solid frame added around the finished image.
border_width = 10

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#00A79D"
text = "#FFFFFF"
code_text = "#FFFFFF"
border = "#FFFFFF"
title_shadow = "#117C71"
description_shadow = "#109B8E"
code_background = "#000000"
code_frame = "#FFFFFF"

# ---------------------------------------------------------------------------
# Fonts (missing font files abort the render)
# ---------------------------------------------------------------------------
[fonts.title]
path = "fonts/Montserrat/static/Montserrat-Bold.ttf"
size = 22.0

[fonts.description]
path = "fonts/Montserrat/static/Montserrat-SemiBold.ttf"
size = 16.0

[fonts.code]
path = "fonts/Fira_Code/FiraCode-VariableFont_wght.ttf"
size = 16.0

# ---------------------------------------------------------------------------
# Logo (optional; rendering continues without it)
# ---------------------------------------------------------------------------
[logo]
path = "logo.png"
size = 80

# ---------------------------------------------------------------------------
# Layout spacing, in pixels
# ---------------------------------------------------------------------------
[layout]
shadow_offset = 2
underline_gap = 10
underline_thickness = 2
title_gap = 20
line_spacing = 10
bullet_indent = 20
bullet_marker = "*  "
band_gap = 20
code_line_spacing = 5
code_frame_width = 2
logo_inset = 5
min_code_height = 300

# ---------------------------------------------------------------------------
# Publishing pipeline
# ---------------------------------------------------------------------------
[publish]
pause_secs = 5
model = "gpt-4.1-mini"
temperature = 1.0
max_tokens = 1024
api_base = "https://api.openai.com/v1"
timeout_secs = 60
"##
}

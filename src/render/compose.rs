//! Canvas composition and persistence.
//!
//! Ties the render together: plan the page, paint it, paste the logo with its
//! own alpha, flatten to RGB, add the border frame, and write a PNG.
//!
//! ```text
//! load fonts ─┐
//! load logo ──┼─→ plan_page → paint_page → overlay logo → RGB8 → border → PNG
//! style ──────┘
//! ```
//!
//! The logo is the only optional asset. Fonts are required; a missing font
//! aborts before anything is written.

use super::error::RenderError;
use super::face::{FontSet, TextFace, Typeface};
use super::layout::{PagePlan, plan_page};
use super::paint::paint_page;
use super::style::RenderStyle;
use crate::config::PostConfig;
use crate::post::Post;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// What a render produced and what it had to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub output: PathBuf,
    /// Final dimensions, border included.
    pub width: u32,
    pub height: u32,
    pub description_lines: usize,
    pub description_dropped: usize,
    pub code_lines: usize,
    pub code_dropped: usize,
    pub logo_placed: bool,
}

impl RenderReport {
    /// True if any description or code line did not fit.
    pub fn truncated(&self) -> bool {
        self.description_dropped > 0 || self.code_dropped > 0
    }
}

/// Load the logo and resize it to a `size`×`size` square.
///
/// A missing file is expected: it is reported once and the render goes on
/// without a logo. Any other failure (unreadable file, bad image data) is an
/// error.
pub fn load_logo(path: &Path, size: u32) -> Result<Option<RgbaImage>, RenderError> {
    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!(
                "Logo image not found at {}. Proceeding without it.",
                path.display()
            );
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let logo = reader.with_guessed_format()?.decode()?.into_rgba8();
    Ok(Some(imageops::resize(
        &logo,
        size,
        size,
        FilterType::CatmullRom,
    )))
}

/// Surround `image` with a solid frame `width` pixels wide.
pub fn add_border(image: &RgbImage, width: u32, color: Rgba<u8>) -> RgbImage {
    let Rgba([r, g, b, _]) = color;
    let mut framed = RgbImage::from_pixel(
        image.width() + 2 * width,
        image.height() + 2 * width,
        Rgb([r, g, b]),
    );
    imageops::replace(&mut framed, image, width as i64, width as i64);
    framed
}

/// Render a post to an in-memory RGB image.
///
/// Returns the plan alongside the image so callers can inspect where every
/// band ended up.
pub fn render_image<F: TextFace>(
    post: &Post,
    fonts: &FontSet<F>,
    logo: Option<&RgbaImage>,
    style: &RenderStyle,
) -> (RgbImage, PagePlan) {
    let plan = plan_page(post, fonts, style, logo.map(|l| l.dimensions()));
    let mut canvas = paint_page(&plan, fonts, &style.palette);

    if let (Some(logo), Some((x, y))) = (logo, plan.code.logo_anchor) {
        imageops::overlay(&mut canvas, logo, x as i64, y as i64);
    }

    let flattened = DynamicImage::ImageRgba8(canvas).into_rgb8();
    let framed = add_border(&flattened, style.border_width, style.palette.border);
    (framed, plan)
}

/// Render a post and write it as PNG to `output`.
pub fn render_to_file<F: TextFace>(
    post: &Post,
    fonts: &FontSet<F>,
    logo: Option<&RgbaImage>,
    style: &RenderStyle,
    output: &Path,
) -> Result<RenderReport, RenderError> {
    let (image, plan) = render_image(post, fonts, logo, style);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image.save_with_format(output, ImageFormat::Png)?;

    Ok(RenderReport {
        output: output.to_path_buf(),
        width: image.width(),
        height: image.height(),
        description_lines: plan.description.lines.len(),
        description_dropped: plan.description.dropped,
        code_lines: plan.code.lines.len(),
        code_dropped: plan.code.dropped,
        logo_placed: logo.is_some() && plan.code.logo_anchor.is_some(),
    })
}

/// Render a post with fonts, logo and output path taken from `config`.
///
/// Relative paths in `config` are resolved against `root`.
pub fn render_post(
    post: &Post,
    config: &PostConfig,
    root: &Path,
) -> Result<RenderReport, RenderError> {
    let style = RenderStyle::from_config(config)?;
    let fonts = FontSet::<Typeface>::load(&config.fonts, root)?;
    let logo = load_logo(&root.join(&config.logo.path), config.logo.size)?;
    render_to_file(post, &fonts, logo.as_ref(), &style, &root.join(&config.output))
}

/// Open the rendered image in the platform's default viewer.
#[cfg(target_os = "macos")]
pub fn show_image(path: &Path) -> Result<(), RenderError> {
    std::process::Command::new("open")
        .arg(path)
        .spawn()
        .map_err(|e| RenderError::Viewer(e.to_string()))?;
    Ok(())
}

/// Open the rendered image in the platform's default viewer.
#[cfg(target_os = "windows")]
pub fn show_image(path: &Path) -> Result<(), RenderError> {
    std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map_err(|e| RenderError::Viewer(e.to_string()))?;
    Ok(())
}

/// Open the rendered image in the platform's default viewer.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn show_image(path: &Path) -> Result<(), RenderError> {
    std::process::Command::new("xdg-open")
        .arg(path)
        .spawn()
        .map_err(|e| RenderError::Viewer(e.to_string()))?;
    Ok(())
}

//! Painting a [`PagePlan`] onto an RGBA canvas.
//!
//! All positions come from [`super::layout`]; this module only turns them
//! into pixels, shadow first and foreground second.

use super::face::{FontSet, TextFace};
use super::layout::{Bounds, CodeLayout, DescriptionLayout, PagePlan, TitleLayout};
use super::style::Palette;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Fill `bounds`, clipped to the canvas. Empty bounds paint nothing.
pub fn fill_rect(canvas: &mut RgbaImage, bounds: Bounds, color: Rgba<u8>) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let rect = Rect::at(bounds.x, bounds.y).of_size(bounds.width, bounds.height);
    draw_filled_rect_mut(canvas, rect, color);
}

pub fn paint_title(
    canvas: &mut RgbaImage,
    face: &impl TextFace,
    title: &TitleLayout,
    palette: &Palette,
) {
    let offset = title.shadow_offset;
    face.draw_text(
        canvas,
        palette.title_shadow,
        title.x + offset,
        title.y + offset,
        &title.text,
    );
    face.draw_text(canvas, palette.text, title.x, title.y, &title.text);
    fill_rect(canvas, title.underline, palette.text);
}

pub fn paint_description(
    canvas: &mut RgbaImage,
    face: &impl TextFace,
    description: &DescriptionLayout,
    palette: &Palette,
) {
    let offset = description.shadow_offset;
    for line in &description.lines {
        face.draw_text(
            canvas,
            palette.description_shadow,
            line.x + offset,
            line.y + offset,
            &line.text,
        );
        face.draw_text(canvas, palette.text, line.x, line.y, &line.text);
    }
}

pub fn paint_code(
    canvas: &mut RgbaImage,
    face: &impl TextFace,
    code: &CodeLayout,
    palette: &Palette,
) {
    fill_rect(canvas, code.outer, palette.code_frame);
    fill_rect(canvas, code.inner, palette.code_background);
    for line in &code.lines {
        face.draw_text(canvas, palette.code_text, line.x, line.y, &line.text);
    }
}

/// Paint every band of `plan` onto a fresh background-filled canvas.
pub fn paint_page<F: TextFace>(plan: &PagePlan, fonts: &FontSet<F>, palette: &Palette) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(plan.canvas.width, plan.canvas.height, palette.background);
    paint_title(&mut canvas, &fonts.title, &plan.title, palette);
    paint_description(&mut canvas, &fonts.description, &plan.description, palette);
    paint_code(&mut canvas, &fonts.code, &plan.code, palette);
    canvas
}

//! Post rendering: text layout and raster composition.
//!
//! | Stage | Module | Crate / function |
//! |---|---|---|
//! | Measure / draw text | [`face`] | `imageproc::drawing::{text_size, draw_text_mut}` over `ab_glyph` |
//! | Band layout | [`layout`] | pure functions, no pixels |
//! | Paint | [`paint`] | `imageproc::drawing::draw_filled_rect_mut` |
//! | Logo, border, PNG | [`compose`] | `image::imageops::{overlay, replace}` |
//!
//! The module is split into:
//! - **Style**: [`RenderStyle`], the immutable record every stage reads
//! - **Face**: [`TextFace`] trait + [`Typeface`]
//! - **Layout**: pure band calculations (unit testable with any face)
//! - **Paint / Compose**: turning a plan into a file

pub mod compose;
mod error;
pub mod face;
pub mod layout;
pub mod paint;
mod style;

pub use compose::{RenderReport, load_logo, render_image, render_post, render_to_file, show_image};
pub use error::RenderError;
pub use face::{FontSet, TextFace, TextSize, Typeface};
pub use layout::{PagePlan, plan_page};
pub use style::{Palette, RenderStyle};

//! # Daily Post
//!
//! Renders a short programming post (title, description, code snippet) into a
//! square-ish social-media image, and runs the daily pipeline that generates,
//! captions, renders and publishes one such post.
//!
//! # Architecture: Layout, Paint, Compose
//!
//! The renderer works in three strictly separated steps:
//!
//! ```text
//! 1. Layout   Post + fonts + style  →  PagePlan   (pure geometry, no pixels)
//! 2. Paint    PagePlan              →  RGBA canvas
//! 3. Compose  canvas + logo         →  bordered RGB PNG
//! ```
//!
//! Every band (title, description, code) is laid out by a pure function that
//! takes the current cursor and returns its geometry plus an explicit
//! `next_y`. Nothing reads state left behind by a previous band, so each one
//! is unit testable with a deterministic fake font.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`render`] | Text measurement, band layout, painting, logo and border composition, PNG output |
//! | [`config`] | `config.toml` loading over stock defaults, validation, stock file generation |
//! | [`post`] | The `Post` record; JSON extraction from model output and from files |
//! | [`category`] | Weekday → content category rotation |
//! | [`prompt`] | Prompt templates for post and caption generation |
//! | [`publish`] | Sequential generate → caption → render → upload pipeline |
//! | [`openai`] | Chat-completions client used by the pipeline |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fonts Behind a Trait
//!
//! Layout never touches `ab_glyph` directly: it measures through
//! [`render::TextFace`]. Production uses [`render::Typeface`] (TrueType via
//! `imageproc`), tests use a fixed-metric block face. Wrapping, truncation and
//! centering can then be asserted to the pixel without shipping font files.
//!
//! ## Dynamic Height by Default
//!
//! The canvas height is computed from the laid-out content, so nothing is
//! ever cut off. A fixed canvas is available through `canvas.mode = "fixed"`;
//! in that mode the description stops where the code block's minimum height
//! begins and the dropped counts are reported in
//! [`render::RenderReport`].
//!
//! ## Missing Logo Is Not an Error
//!
//! Fonts are required and a missing one aborts before any file is written.
//! The logo is decoration: when absent a warning is logged and the image is
//! rendered without it.
//!
//! ## Deterministic Output
//!
//! Rendering involves no randomness, time or hash ordering. The same post,
//! config and assets always produce byte-identical PNGs.

pub mod category;
pub mod config;
pub mod openai;
pub mod output;
pub mod post;
pub mod prompt;
pub mod publish;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;

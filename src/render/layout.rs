//! Pure layout calculations for the three bands.
//!
//! Nothing here touches pixels. Each band function measures text through a
//! [`TextFace`], decides where every line goes, and returns an explicit
//! `next_y` for the band below it. [`plan_page`] chains the bands and sizes
//! the canvas; painting a [`PagePlan`] is the job of [`super::paint`].
//!
//! ## Bands
//!
//! ```text
//! ┌──────────────────────────────┐  ← margin
//! │          Title text          │
//! │          ──────────          │  ← underline, title_height + 10 below top
//! │ Paragraph text wrapped to    │
//! │ the margins.                 │
//! │   *  bullet, indented        │
//! │      continuation, no marker │
//! │ ┌──────────────────────────┐ │  ← band gap
//! │ │ code lines               │ │
//! │ │                    [logo]│ │  ← 5px from the block's corner
//! │ └──────────────────────────┘ │  ← canvas height − margin
//! └──────────────────────────────┘
//! ```
//!
//! ## Wrapping
//!
//! Description lines are word-accumulated until the next word would overflow.
//! A line starting with the bullet marker keeps the marker on its first
//! sub-line only; all its sub-lines are indented, and the indent is subtracted
//! from the available width so no line passes `canvas_width − x`. A single
//! word wider than the available width is broken between characters.
//!
//! ## Truncation
//!
//! A description with a bound and a code block with a fixed bottom both drop
//! whatever does not fit, without error. The number of dropped lines is
//! recorded (`dropped`) so callers can tell that content was cut.

use super::face::{FontSet, TextFace, TextSize};
use super::style::RenderStyle;
use crate::config::{CanvasMode, LayoutConfig};
use crate::post::Post;

/// Axis-aligned rectangle; `x`/`y` inclusive, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Grow by `by` pixels on every side.
    pub fn outset(&self, by: u32) -> Self {
        Self {
            x: self.x - by as i32,
            y: self.y - by as i32,
            width: self.width + 2 * by,
            height: self.height + 2 * by,
        }
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// State shared by the band layouts of one render.
///
/// The vertical cursor is not part of it: each band takes a starting `y`
/// and hands back `next_y`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub canvas: CanvasSize,
    /// Left margin; the right margin mirrors it.
    pub x: i32,
    pub style: &'a RenderStyle,
}

impl LayoutContext<'_> {
    fn spacing(&self) -> &LayoutConfig {
        &self.style.layout
    }

    /// Horizontal room between the margins.
    pub fn content_width(&self) -> u32 {
        (self.canvas.width as i32 - 2 * self.x).max(0) as u32
    }
}

// ============================================================================
// Title
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLayout {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: TextSize,
    pub shadow_offset: i32,
    pub underline: Bounds,
    pub next_y: i32,
}

/// Center the title and place its underline.
///
/// A title wider than the canvas gets a negative `x` and is clipped on both
/// sides when painted.
pub fn layout_title(
    face: &impl TextFace,
    title: &str,
    y: i32,
    ctx: &LayoutContext,
) -> TitleLayout {
    let spacing = ctx.spacing();
    let size = face.text_size(title);
    let x = (ctx.canvas.width as i32 - size.width as i32).div_euclid(2);
    let underline_y = y + size.height as i32 + spacing.underline_gap as i32;

    TitleLayout {
        text: title.to_string(),
        x,
        y,
        size,
        shadow_offset: spacing.shadow_offset as i32,
        underline: Bounds {
            x,
            y: underline_y,
            width: size.width,
            height: spacing.underline_thickness,
        },
        next_y: underline_y + spacing.title_gap as i32,
    }
}

// ============================================================================
// Description
// ============================================================================

/// One wrapped description line, not yet placed vertically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    /// Horizontal offset from the left margin (bullet indent or zero).
    pub indent: u32,
    pub width: u32,
}

/// Word-wrap a description to `max_width`.
///
/// Blank source lines produce nothing.
pub fn wrap_description(
    face: &impl TextFace,
    description: &str,
    max_width: u32,
    spacing: &LayoutConfig,
) -> Vec<WrappedLine> {
    let marker = spacing.bullet_marker.as_str();
    let mut wrapped = Vec::new();

    for source in description.lines() {
        let (body, prefix, indent) = match source.strip_prefix(marker) {
            Some(rest) => (rest, marker, spacing.bullet_indent),
            None => (source, "", 0),
        };
        let available = max_width.saturating_sub(indent);
        let fits = |candidate: &str| face.text_size(candidate).width <= available;

        let mut sub_lines: Vec<String> = Vec::new();
        let mut prefix = prefix;
        let mut current = String::new();

        for word in body.split_whitespace() {
            if !current.is_empty() {
                let candidate = format!("{current} {word}");
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }
                sub_lines.push(std::mem::take(&mut current));
                prefix = "";
            }

            let candidate = format!("{prefix}{word}");
            if fits(&candidate) {
                current = candidate;
            } else {
                current = break_word(&mut sub_lines, prefix, word, &fits);
            }
            prefix = "";
        }
        if !current.is_empty() {
            sub_lines.push(current);
        }

        wrapped.extend(sub_lines.into_iter().map(|text| WrappedLine {
            width: face.text_size(&text).width,
            text,
            indent,
        }));
    }

    wrapped
}

/// Split a word that does not fit on a line of its own between characters.
///
/// Full chunks go to `lines`; the unfinished tail is returned so following
/// words can still join it. A chunk always holds at least one character of
/// the word, even if that character alone overflows.
fn break_word(
    lines: &mut Vec<String>,
    prefix: &str,
    word: &str,
    fits: &impl Fn(&str) -> bool,
) -> String {
    let mut chunk = prefix.to_string();
    let mut has_glyph = false;
    for ch in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(ch);
        if has_glyph && !fits(&candidate) {
            lines.push(std::mem::replace(&mut chunk, ch.to_string()));
        } else {
            chunk = candidate;
        }
        has_glyph = true;
    }
    chunk
}

/// A line with its final position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionLayout {
    pub lines: Vec<PlacedLine>,
    /// Height of "A"; the advance is this plus `line_spacing`.
    pub line_height: u32,
    /// Rows a drawn line can cover below its `y`, shadow excluded.
    pub line_box: u32,
    pub shadow_offset: i32,
    /// Wrapped lines that did not fit above the bound.
    pub dropped: usize,
    pub next_y: i32,
}

/// Wrap and place the description starting at `y`.
///
/// Lines advance by the height of "A" plus `line_spacing`. With a `bound`, a
/// line is kept only if its line box, shadow included, ends at or above the
/// bound. The first line that does not fit ends the band and everything
/// after it is dropped, and `next_y` never passes the bound.
pub fn layout_description(
    face: &impl TextFace,
    description: &str,
    y: i32,
    bound: Option<i32>,
    ctx: &LayoutContext,
) -> DescriptionLayout {
    let spacing = ctx.spacing();
    let wrapped = wrap_description(face, description, ctx.content_width(), spacing);
    let line_height = face.text_size("A").height;
    let line_box = face.line_box_height().max(line_height);
    let shadow_offset = spacing.shadow_offset as i32;
    let advance = (line_height + spacing.line_spacing) as i32;
    let extent = line_box as i32 + shadow_offset;

    let mut lines = Vec::with_capacity(wrapped.len());
    let mut cursor = y;
    for line in &wrapped {
        if bound.is_some_and(|max_y| cursor + extent > max_y) {
            break;
        }
        lines.push(PlacedLine {
            text: line.text.clone(),
            x: ctx.x + line.indent as i32,
            y: cursor,
            width: line.width,
        });
        cursor += advance;
    }

    let drawn_bottom = lines.last().map_or(y, |last| last.y + extent);
    let mut next_y = cursor.max(drawn_bottom);
    if let Some(max_y) = bound {
        next_y = next_y.min(max_y.max(y));
    }

    DescriptionLayout {
        dropped: wrapped.len() - lines.len(),
        lines,
        line_height,
        line_box,
        shadow_offset,
        next_y,
    }
}

// ============================================================================
// Code block
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLayout {
    /// Frame rectangle, painted first.
    pub outer: Bounds,
    /// Background fill, inset from `outer` by the frame width.
    pub inner: Bounds,
    pub lines: Vec<PlacedLine>,
    pub line_height: u32,
    /// Code lines below the text area that were not placed.
    pub dropped: usize,
    /// Top-left corner for the logo, when there is one.
    pub logo_anchor: Option<(i32, i32)>,
    pub next_y: i32,
}

/// Tallest line of the snippet; zero for an empty snippet.
fn code_line_height(face: &impl TextFace, code: &str) -> u32 {
    code.lines()
        .map(|line| face.text_size(line).height)
        .max()
        .unwrap_or(0)
}

/// Rows one drawn code line can cover; zero for an empty snippet.
fn code_line_box(face: &impl TextFace, code: &str) -> u32 {
    match code_line_height(face, code) {
        0 => 0,
        height => face.line_box_height().max(height),
    }
}

/// Lay out the code block from `y` down to `canvas_height − margin`.
///
/// `logo` is the logo's `(width, height)`. The bottom strip of the block
/// (`logo_height + padding`) is kept free of text. An empty snippet still
/// gets its block and logo.
pub fn layout_code(
    face: &impl TextFace,
    code: &str,
    y: i32,
    logo: Option<(u32, u32)>,
    ctx: &LayoutContext,
) -> CodeLayout {
    let style = ctx.style;
    let spacing = ctx.spacing();
    let padding = style.padding as i32;
    let bottom_y = ctx.canvas.height as i32 - style.margin as i32;

    let inner = Bounds {
        x: ctx.x,
        y,
        width: ctx.content_width(),
        height: (bottom_y - y).max(0) as u32,
    };
    let outer = inner.outset(spacing.code_frame_width);

    let line_height = code_line_height(face, code);
    let line_box = code_line_box(face, code);
    let logo_height = logo.map(|(_, h)| h as i32).unwrap_or(0);
    let text_bottom = inner.bottom() - logo_height - padding;

    let source: Vec<&str> = code.lines().collect();
    let mut lines = Vec::with_capacity(source.len());
    let mut y_text = y + padding;
    for line in &source {
        if y_text + line_box as i32 > text_bottom {
            break;
        }
        lines.push(PlacedLine {
            text: line.to_string(),
            x: ctx.x + padding,
            y: y_text,
            width: face.text_size(line).width,
        });
        y_text += (line_height + spacing.code_line_spacing) as i32;
    }

    let inset = spacing.logo_inset as i32;
    let logo_anchor = logo.map(|(w, h)| {
        (
            inner.right() - w as i32 - inset,
            inner.bottom() - h as i32 - inset,
        )
    });

    CodeLayout {
        outer,
        inner,
        dropped: source.len() - lines.len(),
        lines,
        line_height,
        logo_anchor,
        next_y: outer.bottom(),
    }
}

/// Block height that fits every code line plus the logo strip, never below
/// `min_code_height`.
pub fn code_block_height(
    face: &impl TextFace,
    code: &str,
    logo_height: u32,
    style: &RenderStyle,
) -> u32 {
    let spacing = &style.layout;
    let count = code.lines().count() as u32;
    let line_height = code_line_height(face, code);
    let text = match count {
        0 => 0,
        n => (n - 1) * (line_height + spacing.code_line_spacing) + code_line_box(face, code),
    };
    let needed = 2 * style.padding + logo_height + text;
    needed.max(spacing.min_code_height)
}

// ============================================================================
// Page
// ============================================================================

/// Every band of one post, positioned on a canvas of known size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub canvas: CanvasSize,
    pub title: TitleLayout,
    pub description: DescriptionLayout,
    pub code: CodeLayout,
}

/// Lowest y the description may reach on a fixed canvas, leaving room for
/// the band gap and a minimum-height code block.
pub fn description_bound(style: &RenderStyle) -> i32 {
    style.fixed_height as i32
        - style.margin as i32
        - style.layout.min_code_height as i32
        - style.layout.band_gap as i32
}

/// Lay out a whole post.
///
/// In dynamic mode the canvas height comes from this same pass, so nothing
/// is ever dropped. In fixed mode the canvas size is constant and the
/// description and code are truncated to fit.
pub fn plan_page<F: TextFace>(
    post: &Post,
    fonts: &FontSet<F>,
    style: &RenderStyle,
    logo: Option<(u32, u32)>,
) -> PagePlan {
    let (canvas, bound) = match style.mode {
        CanvasMode::Dynamic => (
            CanvasSize {
                width: style.content_width + 2 * style.margin,
                height: 0,
            },
            None,
        ),
        CanvasMode::Fixed => (
            CanvasSize {
                width: style.fixed_width,
                height: style.fixed_height,
            },
            Some(description_bound(style)),
        ),
    };
    let mut ctx = LayoutContext {
        canvas,
        x: style.margin as i32,
        style,
    };

    let title = layout_title(&fonts.title, &post.title, style.margin as i32, &ctx);
    let description =
        layout_description(&fonts.description, &post.description, title.next_y, bound, &ctx);
    let code_top = description.next_y + style.layout.band_gap as i32;

    if style.mode == CanvasMode::Dynamic {
        let logo_height = logo.map(|(_, h)| h).unwrap_or(0);
        let block = code_block_height(&fonts.code, &post.code, logo_height, style);
        ctx.canvas.height = code_top.max(0) as u32 + block + style.margin;
    }

    let code = layout_code(&fonts.code, &post.code, code_top, logo, &ctx);

    PagePlan {
        canvas: ctx.canvas,
        title,
        description,
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{BlockFace, block_fonts, hello_world_post};

    const DESC: BlockFace = BlockFace {
        advance: 8,
        height: 14,
    };

    fn dynamic_style() -> RenderStyle {
        RenderStyle::default()
    }

    fn fixed_style(height: u32) -> RenderStyle {
        RenderStyle {
            mode: CanvasMode::Fixed,
            fixed_width: 880,
            fixed_height: height,
            ..RenderStyle::default()
        }
    }

    fn ctx(style: &RenderStyle, width: u32, height: u32) -> LayoutContext<'_> {
        LayoutContext {
            canvas: CanvasSize { width, height },
            x: style.margin as i32,
            style,
        }
    }

    fn long_paragraph(words: usize) -> String {
        (0..words)
            .map(|i| ["alpha", "beta", "gamma", "delta", "epsilon"][i % 5])
            .collect::<Vec<_>>()
            .join(" ")
    }

    // =========================================================================
    // Title
    // =========================================================================

    #[test]
    fn title_is_centered() {
        let style = dynamic_style();
        let face = BlockFace {
            advance: 12,
            height: 20,
        };
        let title = layout_title(&face, "Hello World", 40, &ctx(&style, 880, 0));
        // 11 chars * 12px = 132px wide
        assert_eq!(title.size.width, 132);
        assert_eq!(title.x, (880 - 132) / 2);
        assert_eq!(title.shadow_offset, 2);
    }

    #[test]
    fn underline_matches_title_width_and_offset() {
        let style = dynamic_style();
        let face = BlockFace {
            advance: 12,
            height: 20,
        };
        let title = layout_title(&face, "Generators", 40, &ctx(&style, 880, 0));
        assert_eq!(title.underline.width, title.size.width);
        assert_eq!(title.underline.x, title.x);
        assert_eq!(title.underline.y - title.y, title.size.height as i32 + 10);
        assert_eq!(title.underline.height, 2);
        assert_eq!(title.next_y, title.underline.y + 20);
    }

    #[test]
    fn over_wide_title_floors_to_negative_x() {
        let style = dynamic_style();
        let face = BlockFace {
            advance: 12,
            height: 20,
        };
        // 9 chars * 12 = 108px on a 101px canvas: (101 - 108) / 2 floors to -4
        let title = layout_title(&face, "123456789", 0, &ctx(&style, 101, 0));
        assert_eq!(title.x, -4);
    }

    // =========================================================================
    // Wrapping
    // =========================================================================

    #[test]
    fn plain_lines_never_exceed_available_width() {
        let spacing = LayoutConfig::default();
        let text = format!("{}\n{}", long_paragraph(120), long_paragraph(37));
        let wrapped = wrap_description(&DESC, &text, 800, &spacing);
        assert!(wrapped.len() > 2);
        for line in &wrapped {
            assert!(line.width <= 800, "{:?} is {}px", line.text, line.width);
            assert_eq!(line.indent, 0);
        }
    }

    #[test]
    fn wrapping_keeps_every_word_in_order() {
        let spacing = LayoutConfig::default();
        let text = long_paragraph(90);
        let wrapped = wrap_description(&DESC, &text, 300, &spacing);
        let rejoined: Vec<&str> = wrapped
            .iter()
            .flat_map(|l| l.text.split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn lines_are_filled_greedily() {
        let spacing = LayoutConfig::default();
        // 10 chars per line at 8px each: "aaa bbb" (7) + " ccc" would be 11
        let wrapped = wrap_description(&DESC, "aaa bbb ccc ddd", 80, &spacing);
        let texts: Vec<&str> = wrapped.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn bullet_marker_only_on_first_sub_line() {
        let spacing = LayoutConfig::default();
        let text = format!("*  {}\nplain after", long_paragraph(60));
        let wrapped = wrap_description(&DESC, &text, 400, &spacing);
        let bullet_lines: Vec<_> = wrapped.iter().filter(|l| l.indent == 20).collect();
        assert!(bullet_lines.len() > 1);
        assert!(bullet_lines[0].text.starts_with("*  "));
        for line in &bullet_lines[1..] {
            assert!(!line.text.starts_with('*'), "repeated marker: {:?}", line.text);
        }
        // bullet indent is taken out of the available width
        for line in &bullet_lines {
            assert!(line.width + line.indent <= 400);
        }
        assert_eq!(wrapped.last().unwrap().text, "plain after");
        assert_eq!(wrapped.last().unwrap().indent, 0);
    }

    #[test]
    fn short_bullets_keep_marker() {
        let spacing = LayoutConfig::default();
        let wrapped = wrap_description(&DESC, "*  point one\n*  point two", 800, &spacing);
        let texts: Vec<&str> = wrapped.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["*  point one", "*  point two"]);
    }

    #[test]
    fn over_long_word_is_broken_between_characters() {
        let spacing = LayoutConfig::default();
        let word = "x".repeat(25);
        let wrapped = wrap_description(&DESC, &format!("see {word} end"), 80, &spacing);
        for line in &wrapped {
            assert!(line.width <= 80, "{:?}", line.text);
        }
        let joined: String = wrapped.iter().map(|l| l.text.replace(' ', "")).collect();
        assert_eq!(joined, format!("see{word}end"));
        assert_eq!(wrapped[0].text, "see");
    }

    #[test]
    fn blank_lines_emit_nothing() {
        let spacing = LayoutConfig::default();
        let wrapped = wrap_description(&DESC, "first\n\n   \nsecond", 800, &spacing);
        assert_eq!(wrapped.len(), 2);
    }

    // =========================================================================
    // Description placement
    // =========================================================================

    #[test]
    fn lines_advance_by_height_plus_spacing() {
        let style = dynamic_style();
        let layout = layout_description(
            &DESC,
            "one\n*  two\nthree",
            100,
            None,
            &ctx(&style, 880, 0),
        );
        let ys: Vec<i32> = layout.lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![100, 124, 148]);
        assert_eq!(layout.lines[1].x, 40 + 20);
        assert_eq!(layout.next_y, 172);
        assert_eq!(layout.dropped, 0);
    }

    #[test]
    fn no_line_passes_right_margin() {
        let style = dynamic_style();
        let text = format!("{}\n*  {}", long_paragraph(80), long_paragraph(80));
        let layout = layout_description(&DESC, &text, 0, None, &ctx(&style, 880, 0));
        for line in &layout.lines {
            assert!(line.x + line.width as i32 <= 880 - 40);
        }
    }

    #[test]
    fn bound_truncates_silently() {
        let style = dynamic_style();
        let text = long_paragraph(400);
        let bound = 200;
        let layout = layout_description(&DESC, &text, 100, Some(bound), &ctx(&style, 880, 0));
        assert!(layout.dropped > 0);
        assert!(!layout.lines.is_empty());
        for line in &layout.lines {
            let bottom = line.y + layout.line_box as i32 + layout.shadow_offset;
            assert!(bottom <= bound, "line at {} ends at {bottom}", line.y);
        }
        assert!(layout.next_y <= bound);
    }

    #[test]
    fn bound_uses_line_box_not_capital_height() {
        // capitals 10px tall in a 16px line box
        struct TallBox;
        impl TextFace for TallBox {
            fn text_size(&self, text: &str) -> TextSize {
                TextSize {
                    width: text.chars().count() as u32 * 8,
                    height: if text.is_empty() { 0 } else { 10 },
                }
            }
            fn line_box_height(&self) -> u32 {
                16
            }
            fn draw_text(&self, _: &mut image::RgbaImage, _: image::Rgba<u8>, _: i32, _: i32, _: &str) {}
        }

        let style = dynamic_style();
        // lines at 100 and 120; the second ends at 120 + 16 + 2 = 138
        let layout =
            layout_description(&TallBox, "one\ntwo\nthree", 100, Some(137), &ctx(&style, 880, 0));
        assert_eq!(layout.line_height, 10);
        assert_eq!(layout.line_box, 16);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.dropped, 2);
        assert_eq!(layout.next_y, 120);
    }

    #[test]
    fn bound_above_start_drops_everything() {
        let style = dynamic_style();
        let layout = layout_description(&DESC, "a\nb", 100, Some(90), &ctx(&style, 880, 0));
        assert!(layout.lines.is_empty());
        assert_eq!(layout.dropped, 2);
        assert_eq!(layout.next_y, 100);
    }

    // =========================================================================
    // Code block
    // =========================================================================

    #[test]
    fn outer_rect_is_inner_inset_by_frame() {
        let style = dynamic_style();
        let code = layout_code(&DESC, "x = 1", 300, None, &ctx(&style, 880, 900));
        assert_eq!(code.outer, code.inner.outset(2));
        assert_eq!(code.outer.x, code.inner.x - 2);
        assert_eq!(code.outer.right(), code.inner.right() + 2);
        assert_eq!(code.outer.bottom(), code.inner.bottom() + 2);
        assert_eq!(code.inner.bottom(), 900 - 40);
        assert_eq!(code.next_y, code.outer.bottom());
    }

    #[test]
    fn logo_sits_five_pixels_inside_bottom_right() {
        let style = dynamic_style();
        let code = layout_code(&DESC, "x = 1", 300, Some((80, 80)), &ctx(&style, 880, 900));
        let (lx, ly) = code.logo_anchor.unwrap();
        let logo = Bounds {
            x: lx,
            y: ly,
            width: 80,
            height: 80,
        };
        assert!(code.inner.contains(&logo));
        assert_eq!(code.inner.right() - logo.right(), 5);
        assert_eq!(code.inner.bottom() - logo.bottom(), 5);
    }

    #[test]
    fn no_logo_no_anchor() {
        let style = dynamic_style();
        let code = layout_code(&DESC, "x = 1", 300, None, &ctx(&style, 880, 900));
        assert!(code.logo_anchor.is_none());
    }

    #[test]
    fn code_lines_start_inside_padding() {
        let style = dynamic_style();
        let code = layout_code(&DESC, "a\nb", 300, None, &ctx(&style, 880, 900));
        assert_eq!(code.lines[0].x, 40 + 20);
        assert_eq!(code.lines[0].y, 320);
        // line height 14 + spacing 5
        assert_eq!(code.lines[1].y, 339);
    }

    #[test]
    fn code_truncates_at_text_area() {
        let style = dynamic_style();
        let snippet = (0..40).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        // block 300..860 = 560px; text area ends at 860 - 80 - 20 = 760
        let code = layout_code(&DESC, &snippet, 300, Some((80, 80)), &ctx(&style, 880, 900));
        assert!(code.dropped > 0);
        assert_eq!(code.lines.len() + code.dropped, 40);
        let last = code.lines.last().unwrap();
        assert!(last.y + code.line_height as i32 <= 760);
        // first dropped line would have crossed the text area
        assert!(last.y + 19 + 14 > 760);
    }

    #[test]
    fn empty_code_keeps_block_without_lines() {
        let style = dynamic_style();
        let code = layout_code(&DESC, "", 300, Some((80, 80)), &ctx(&style, 880, 900));
        assert!(code.lines.is_empty());
        assert_eq!(code.line_height, 0);
        assert_eq!(code.dropped, 0);
        assert!(code.logo_anchor.is_some());
        assert_eq!(code.inner.height, 560);
    }

    #[test]
    fn block_height_fits_lines_and_logo() {
        let style = dynamic_style();
        let snippet = (0..30).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        // 2*20 padding + 80 logo + 29*19 + 14
        assert_eq!(code_block_height(&DESC, &snippet, 80, &style), 40 + 80 + 551 + 14);
        assert_eq!(code_block_height(&DESC, "x", 80, &style), 300);
        assert_eq!(code_block_height(&DESC, "", 0, &style), 300);
    }

    // =========================================================================
    // Page
    // =========================================================================

    fn assert_bands_stacked(plan: &PagePlan) {
        let title_bottom = plan.title.underline.bottom();
        if let Some(first) = plan.description.lines.first() {
            assert!(title_bottom <= first.y, "title overlaps description");
        }
        if let Some(last) = plan.description.lines.last() {
            let bottom = last.y + plan.description.line_height as i32;
            assert!(bottom <= plan.code.outer.y, "description overlaps code");
        }
        assert_eq!(
            plan.code.inner.bottom(),
            plan.canvas.height as i32 - 40,
            "code block not pinned to the bottom margin"
        );
    }

    #[test]
    fn dynamic_plan_fits_everything() {
        let style = dynamic_style();
        let post = Post {
            title: "Iterators".into(),
            description: format!("{}\n*  {}", long_paragraph(200), long_paragraph(50)),
            code: (0..50).map(|i| format!("step({i})")).collect::<Vec<_>>().join("\n"),
        };
        let plan = plan_page(&post, &block_fonts(), &style, Some((80, 80)));
        assert_eq!(plan.canvas.width, 880);
        assert_eq!(plan.description.dropped, 0);
        assert_eq!(plan.code.dropped, 0);
        assert_eq!(plan.code.lines.len(), 50);
        assert_bands_stacked(&plan);
    }

    #[test]
    fn dynamic_plan_for_hello_world() {
        let style = dynamic_style();
        let plan = plan_page(&hello_world_post(), &block_fonts(), &style, None);
        assert_eq!(plan.description.lines.len(), 3);
        assert_eq!(plan.description.lines[1].text, "*  point one");
        assert_eq!(plan.code.lines.len(), 1);
        assert_eq!(plan.code.inner.height, 300);
        assert_bands_stacked(&plan);
    }

    #[test]
    fn fixed_plan_keeps_canvas_and_truncates() {
        let style = fixed_style(700);
        let post = Post {
            title: "Overflow".into(),
            description: long_paragraph(600),
            code: "print('hi')".into(),
        };
        let plan = plan_page(&post, &block_fonts(), &style, None);
        assert_eq!(
            plan.canvas,
            CanvasSize {
                width: 880,
                height: 700
            }
        );
        assert!(plan.description.dropped > 0);
        let bound = description_bound(&style);
        assert_eq!(bound, 700 - 40 - 300 - 20);
        for line in &plan.description.lines {
            assert!(line.y + 14 + 2 <= bound);
        }
        assert_bands_stacked(&plan);
    }

    #[test]
    fn fixed_description_leaves_full_code_height() {
        // bound 326: ten lines fit (last at 306, ends at 322) and the cursor
        // stops at 330, past the bound
        let style = fixed_style(686);
        let post = Post {
            title: "Overflow".into(),
            description: long_paragraph(600),
            code: "print('hi')".into(),
        };
        let plan = plan_page(&post, &block_fonts(), &style, None);
        let bound = description_bound(&style);
        assert_eq!(bound, 326);
        assert_eq!(plan.description.lines.len(), 10);
        assert_eq!(plan.description.next_y, bound);
        assert_eq!(plan.code.inner.height, style.layout.min_code_height);
        assert_bands_stacked(&plan);
    }

    #[test]
    fn plan_is_deterministic() {
        let style = fixed_style(900);
        let post = hello_world_post();
        let fonts = block_fonts();
        assert_eq!(
            plan_page(&post, &fonts, &style, Some((80, 80))),
            plan_page(&post, &fonts, &style, Some((80, 80)))
        );
    }
}

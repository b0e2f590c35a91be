//! Caption text layout for QR bitmaps.
//!
//! Provides text measurement, word-wrapping, and centered drawing used to
//! attach a caption block below a rendered symbol.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::compose;
use crate::qr::QrStyle;

/// Caption font size in pixels.
pub const CAPTION_FONT_SIZE: f32 = 16.0;

/// Vertical gap between caption lines.
const LINE_GAP: u32 = 2;

/// Padding below the last caption line.
const BOTTOM_PADDING: u32 = 6;

/// Minimum wrap width so captions under tiny symbols stay readable.
const MIN_WRAP_WIDTH: u32 = 120;

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Compute the line height for the given font and scale.
pub fn line_height(font: &FontRef<'_>, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Draw horizontally centered text on an existing RGBA image.
pub fn draw_centered_text(
    img: &mut RgbaImage,
    font: &FontRef<'_>,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Wrap text to fit within `max_width` pixels.
///
/// Returns a list of lines, each fitting within the width constraint.
/// A single word wider than `max_width` is force-broken by character.
pub fn wrap_text(font: &FontRef<'_>, scale: PxScale, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width: u32 = 0;

    for word in text.split_inclusive(|c: char| c.is_whitespace()) {
        let word_width = measure_text_width(font, scale, word);

        if current_width + word_width > max_width && !current_line.is_empty() {
            lines.push(current_line.trim_end().to_string());
            current_line = String::new();
            current_width = 0;
        }

        if word_width > max_width && current_line.is_empty() {
            let mut char_line = String::new();
            let mut char_width: u32 = 0;
            for ch in word.chars() {
                let ch_w = measure_text_width(font, scale, &ch.to_string());
                if char_width + ch_w > max_width && !char_line.is_empty() {
                    lines.push(char_line);
                    char_line = String::new();
                    char_width = 0;
                }
                char_line.push(ch);
                char_width += ch_w;
            }
            if !char_line.is_empty() {
                current_line = char_line;
                current_width = char_width;
            }
            continue;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim_end().to_string());
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Build a new canvas holding `symbol` with `text` drawn below it.
///
/// The caption wraps to the symbol width (floor [`MIN_WRAP_WIDTH`]) and
/// every line is centered. When the longest line is wider than the
/// symbol, the canvas grows and the symbol is re-centered.
pub(crate) fn attach_caption(
    symbol: &RgbaImage,
    text: &str,
    font: &FontRef<'_>,
    style: &QrStyle,
) -> RgbaImage {
    let scale = PxScale::from(CAPTION_FONT_SIZE);
    let lh = line_height(font, scale);

    let wrap_width = symbol.width().max(MIN_WRAP_WIDTH);
    let lines = wrap_text(font, scale, text, wrap_width);

    let widest = lines
        .iter()
        .map(|l| measure_text_width(font, scale, l))
        .max()
        .unwrap_or(0);

    let width = symbol.width().max(widest);
    let caption_height = lines.len() as u32 * (lh + LINE_GAP) + BOTTOM_PADDING;
    let height = symbol.height() + caption_height;

    let mut img = RgbaImage::from_pixel(width, height, style.background_rgba());
    compose::overlay(&mut img, symbol, ((width - symbol.width()) / 2) as i64, 0);

    let fg = style.foreground_rgba();
    let mut y = symbol.height() as i32;
    for line in &lines {
        draw_centered_text(&mut img, font, scale, y, line, fg);
        y += (lh + LINE_GAP) as i32;
    }

    img
}

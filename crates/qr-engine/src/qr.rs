//! Styled QR bitmap generation.

use ab_glyph::FontRef;
use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::caption;
use crate::{RenderError, Result};

/// Visual options for a rendered QR symbol.
///
/// Error correction is fixed at level L; sizing is controlled by the
/// module size and quiet zone rather than computed from a target width.
#[derive(Debug, Clone)]
pub struct QrStyle {
    /// Color of the dark modules.
    pub foreground: [u8; 3],

    /// Color of the light modules and the quiet zone.
    pub background: [u8; 3],

    /// Edge length of one module in pixels.
    pub module_size: u32,

    /// Width of the quiet zone around the symbol, in modules.
    pub quiet_zone: u32,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            foreground: [0, 0, 0],
            background: [255, 255, 255],
            module_size: 3,
            quiet_zone: 1,
        }
    }
}

impl QrStyle {
    /// Create a style with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the dark-module color.
    pub fn with_foreground(mut self, rgb: [u8; 3]) -> Self {
        self.foreground = rgb;
        self
    }

    /// Builder: set the light-module color.
    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    /// Builder: set the module size in pixels (minimum 1).
    pub fn with_module_size(mut self, px: u32) -> Self {
        self.module_size = px.max(1);
        self
    }

    /// Builder: set the quiet zone width in modules.
    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    pub(crate) fn foreground_rgba(&self) -> Rgba<u8> {
        let [r, g, b] = self.foreground;
        Rgba([r, g, b, 255])
    }

    pub(crate) fn background_rgba(&self) -> Rgba<u8> {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 255])
    }
}

/// Render `payload` as a styled QR bitmap.
///
/// The symbol is painted module by module at `module_size` pixels per
/// module, surrounded by a quiet zone in the background color. All
/// pixels are fully opaque.
pub fn render(payload: &str, style: &QrStyle) -> Result<RgbaImage> {
    if payload.is_empty() {
        return Err(RenderError::EmptyPayload);
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = style.module_size.max(1);
    let border = style.quiet_zone * scale;
    let size = module_count * scale + 2 * border;

    debug!(modules = module_count, size, "Rendering QR symbol");

    let fg = style.foreground_rgba();
    let mut img = RgbaImage::from_pixel(size, size, style.background_rgba());

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;

        if *color == qrcode::Color::Dark {
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(border + x * scale + dx, border + y * scale + dy, fg);
                }
            }
        }
    }

    Ok(img)
}

/// Render `payload` as a styled QR bitmap with `text` drawn below it.
///
/// The caption is wrapped to the symbol width, each line centered, in the
/// style's foreground color. The canvas widens to the longest caption
/// line when that exceeds the symbol; the symbol stays centered.
pub fn render_with_caption(
    payload: &str,
    style: &QrStyle,
    text: &str,
    font: &FontRef<'_>,
) -> Result<RgbaImage> {
    let symbol = render(payload, style)?;
    if text.trim().is_empty() {
        return Ok(symbol);
    }
    Ok(caption::attach_caption(&symbol, text.trim(), font, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = QrStyle::default();
        assert_eq!(style.foreground, [0, 0, 0]);
        assert_eq!(style.background, [255, 255, 255]);
        assert_eq!(style.module_size, 3);
        assert_eq!(style.quiet_zone, 1);
    }

    #[test]
    fn test_builder_chain() {
        let style = QrStyle::new()
            .with_foreground([255, 255, 255])
            .with_background([0, 0, 0])
            .with_module_size(5)
            .with_quiet_zone(2);
        assert_eq!(style.foreground, [255, 255, 255]);
        assert_eq!(style.background, [0, 0, 0]);
        assert_eq!(style.module_size, 5);
        assert_eq!(style.quiet_zone, 2);
    }

    #[test]
    fn test_module_size_floor() {
        let style = QrStyle::new().with_module_size(0);
        assert_eq!(style.module_size, 1);
    }

    #[test]
    fn render_produces_square_image() {
        let img = render("https://example.com", &QrStyle::default()).unwrap();
        assert!(img.width() > 0);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn render_size_matches_modules_and_quiet_zone() {
        let payload = "https://example.com";
        let style = QrStyle::new().with_module_size(4).with_quiet_zone(2);
        let img = render(payload, &style).unwrap();
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L).unwrap();
        let expected = (code.width() as u32 + 2 * 2) * 4;
        assert_eq!(img.width(), expected);
    }

    #[test]
    fn render_uses_style_colors() {
        let style = QrStyle::new()
            .with_foreground([10, 20, 30])
            .with_background([200, 210, 220]);
        let img = render("hello", &style).unwrap();
        let mut has_fg = false;
        let mut has_bg = false;
        for p in img.pixels() {
            if p.0 == [10, 20, 30, 255] {
                has_fg = true;
            } else if p.0 == [200, 210, 220, 255] {
                has_bg = true;
            } else {
                panic!("unexpected pixel color {:?}", p.0);
            }
        }
        assert!(has_fg && has_bg);
    }

    #[test]
    fn render_rejects_empty_payload() {
        let err = render("", &QrStyle::default()).unwrap_err();
        assert!(matches!(err, RenderError::EmptyPayload));
    }

    #[test]
    fn render_is_deterministic() {
        let style = QrStyle::default();
        let a = render("https://example.com/a", &style).unwrap();
        let b = render("https://example.com/a", &style).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn rendered_symbol_decodes_back_to_payload() {
        let payload = "https://photos.example.com/share/ABC/IMG_001.jpg";
        // Generous sizing so the decoder has clean module boundaries.
        let style = QrStyle::new().with_module_size(6).with_quiet_zone(4);
        let img = render(payload, &style).unwrap();

        let gray = image::DynamicImage::ImageRgba8(img).to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
        let (_meta, content) = grids[0].decode().expect("decode rendered symbol");
        assert_eq!(content, payload);
    }
}

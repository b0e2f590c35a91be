//! Lifecycle hook adapter: the host-facing plugin surface.

use std::path::PathBuf;

use ab_glyph::FontRef;
use image::RgbaImage;
use qr_engine::{Anchor, RenderError, compose, qr};

use crate::config::{ConfigError, QrConfig};
use crate::context::CaptureContext;
use crate::storage::{self, StorageError};
use crate::url::{self, UrlError};

/// Callbacks invoked synchronously by the host's state machine.
///
/// Each callback runs to completion on the host's thread before control
/// returns; implementations must never panic or propagate errors into
/// the host — a failed event simply produces no QR code.
pub trait BoothHooks {
    /// Photo processing phase: the capture file exists and the share
    /// URL variables are known. Persists the QR bitmap when saving is
    /// enabled; performs no filesystem writes otherwise.
    fn photo_processed(&self, ctx: &CaptureContext);

    /// Wait-screen display: composite the QR onto the live preview
    /// frame at the configured wait anchor.
    fn wait_screen(&self, ctx: &CaptureContext, frame: &mut RgbaImage);

    /// Print-screen display: same as the wait screen, at the print
    /// anchor.
    fn print_screen(&self, ctx: &CaptureContext, frame: &mut RgbaImage);
}

/// Anything that can go wrong inside one lifecycle event.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The QR overlay plugin.
///
/// Owns the validated configuration and, optionally, host-supplied font
/// bytes for the caption. No other state survives between events; every
/// callback renders its bitmap fresh.
pub struct QrPlugin {
    config: QrConfig,
    caption_font: Option<Vec<u8>>,
}

impl QrPlugin {
    /// Build a plugin from a configuration, validating it first.
    pub fn new(config: QrConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            caption_font: None,
        })
    }

    /// Builder: supply TTF/OTF bytes used to draw the `side_text`
    /// caption. Without a font the caption is skipped with a warning.
    pub fn with_caption_font(mut self, data: Vec<u8>) -> Self {
        self.caption_font = Some(data);
        self
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// Format the share URL and render the styled QR bitmap for one
    /// event, including the caption when configured and a font is
    /// available.
    fn render_event_qr(&self, ctx: &CaptureContext) -> Result<RgbaImage, EventError> {
        let link = url::format_url(&self.config.prefix_url, &ctx.template_vars())?;
        let style = self.config.style();

        let caption = self.config.side_text.trim();
        if caption.is_empty() {
            return Ok(qr::render(&link, &style)?);
        }

        match self.caption_font.as_deref() {
            Some(data) => {
                let font =
                    FontRef::try_from_slice(data).map_err(|e| RenderError::Font(e.to_string()))?;
                Ok(qr::render_with_caption(&link, &style, caption, &font)?)
            }
            None => {
                tracing::warn!("side_text is configured but no caption font was supplied");
                Ok(qr::render(&link, &style)?)
            }
        }
    }

    /// Where this event's QR file goes. Falls back to a count-based
    /// stem when the event carries no photo path.
    fn save_path_for(&self, ctx: &CaptureContext) -> PathBuf {
        let cfg = &self.config;
        let fallback;
        let photo = match &ctx.picture_path {
            Some(photo) => photo.as_path(),
            None => {
                let count = ctx.counters.get("count").copied().unwrap_or(0);
                fallback = PathBuf::from(format!("picture_{count}"));
                fallback.as_path()
            }
        };
        storage::qr_image_path(photo, &cfg.suffix, &cfg.ext, cfg.save_path.as_deref())
    }

    /// Render and composite at `anchor`; shared by the two screen
    /// callbacks. Errors degrade to a log line and an untouched frame.
    fn composite_onto(&self, ctx: &CaptureContext, frame: &mut RgbaImage, anchor: Anchor) {
        let bitmap = match self.render_event_qr(ctx) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping QR overlay for this event");
                return;
            }
        };

        let frame_dims = (frame.width(), frame.height());
        let bitmap_dims = (bitmap.width(), bitmap.height());
        let placement = anchor.resolve(frame_dims, bitmap_dims, self.config.offset);
        if placement.clips(frame_dims, bitmap_dims) {
            tracing::warn!(
                anchor = %anchor,
                x = placement.x,
                y = placement.y,
                "QR overlay exceeds frame bounds; clipping"
            );
        }
        compose::overlay(frame, &bitmap, placement.x, placement.y);
    }
}

impl BoothHooks for QrPlugin {
    fn photo_processed(&self, ctx: &CaptureContext) {
        if !self.config.save {
            // Screens render on demand; with saving off there is
            // nothing to do during processing.
            return;
        }

        let result = self
            .render_event_qr(ctx)
            .and_then(|bitmap| Ok(storage::save_qr_image(&bitmap, &self.save_path_for(ctx))?));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Could not save the QR image for this capture");
        }
    }

    fn wait_screen(&self, ctx: &CaptureContext, frame: &mut RgbaImage) {
        self.composite_onto(ctx, frame, self.config.wait_location);
    }

    fn print_screen(&self, ctx: &CaptureContext, frame: &mut RgbaImage) {
        self.composite_onto(ctx, frame, self.config.print_location);
    }
}

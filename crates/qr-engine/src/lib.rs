//! QR overlay rendering for photobooth screens.
//!
//! Provides styled QR bitmap generation, caption text layout, anchor
//! placement math, and alpha compositing onto preview frames.

pub mod anchor;
pub mod caption;
pub mod compose;
pub mod qr;

// Re-exports for convenience
pub use anchor::{Anchor, Placement};
pub use compose::overlay;
pub use qr::{QrStyle, render, render_with_caption};

/// Errors that can occur while rendering a QR overlay.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Refusing to encode an empty payload")]
    EmptyPayload,

    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Caption font error: {0}")]
    Font(String),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

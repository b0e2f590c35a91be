//! Photobooth QR overlay plugin.
//!
//! Renders a QR code linking to the online copy of the captured photo,
//! composites it onto the host's preview frames at a configurable screen
//! anchor, and optionally saves the bitmap next to the photo file. The
//! host photobooth application drives everything through the synchronous
//! lifecycle callbacks in [`hooks::BoothHooks`].

pub mod config;
pub mod context;
pub mod hooks;
pub mod storage;
pub mod url;

// Re-exports for convenience
pub use config::{Color, ConfigError, QrConfig};
pub use context::CaptureContext;
pub use hooks::{BoothHooks, QrPlugin};

//! Typed plugin configuration: defaults, parsing, validation.

pub mod color;
pub mod options;
pub mod validation;

pub use color::Color;
pub use options::QrConfig;

/// Errors detected while parsing or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("URL template is empty")]
    EmptyTemplate,

    #[error("Bad URL template: {0}")]
    BadTemplate(String),

    #[error("Unsupported QR file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("Offset components must not be negative, got ({x}, {y})")]
    NegativeOffset { x: i32, y: i32 },
}

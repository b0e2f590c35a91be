//! Configuration coherence checks, run once at plugin construction.

use super::{ConfigError, QrConfig};
use crate::url;

/// Validate a configuration. Returns the first problem found.
///
/// Anchor and color fields are already typed, so only the stringly
/// options need checking here: the URL template must be non-empty and
/// syntactically sound, the extension must name a format the image
/// encoder knows, and the offset must point inward.
pub fn validate(cfg: &QrConfig) -> Result<(), ConfigError> {
    if cfg.prefix_url.trim().is_empty() {
        return Err(ConfigError::EmptyTemplate);
    }
    url::check_template(&cfg.prefix_url).map_err(|e| ConfigError::BadTemplate(e.to_string()))?;

    let ext = cfg.ext.trim().trim_start_matches('.');
    if ext.is_empty() || image::ImageFormat::from_extension(ext).is_none() {
        return Err(ConfigError::UnsupportedExtension(cfg.ext.clone()));
    }

    let (x, y) = cfg.offset;
    if x < 0 || y < 0 {
        return Err(ConfigError::NegativeOffset { x, y });
    }

    Ok(())
}

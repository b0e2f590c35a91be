//! The `[qrcode]` configuration section as a typed record.

use qr_engine::{Anchor, QrStyle};
use serde::{Deserialize, Serialize};

use super::{Color, ConfigError, validation};

/// Plugin configuration. Immutable once the plugin is constructed.
///
/// Field spellings match the host's `[qrcode]` section keys, so the
/// whole section can be handed over as one JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// URL template; placeholders: `{picture}`, `{url}`, and any counter
    /// name (e.g. `{count}`).
    pub prefix_url: String,

    /// Color of the dark QR modules.
    pub foreground: Color,

    /// Color of the light QR modules and quiet zone.
    pub background: Color,

    /// Optional caption drawn under the QR symbol.
    pub side_text: String,

    /// Pixel distance (x, y) kept between the QR and the anchored edges.
    pub offset: (i32, i32),

    /// Anchor used on the wait screen.
    pub wait_location: Anchor,

    /// Anchor used on the print screen.
    pub print_location: Anchor,

    /// Save the rendered QR bitmap next to the picture file.
    pub save: bool,

    /// Suffix appended to the picture basename for the saved QR file.
    pub suffix: String,

    /// Extension (and format) of the saved QR file.
    pub ext: String,

    /// Optional directory override for saved QR files; a leading `~`
    /// expands to the user's home directory.
    pub save_path: Option<String>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            prefix_url: "{url}".into(),
            foreground: Color::WHITE,
            background: Color::BLACK,
            side_text: String::new(),
            offset: (20, 40),
            wait_location: Anchor::BottomLeft,
            print_location: Anchor::BottomRight,
            save: false,
            suffix: "_qrcode".into(),
            ext: "png".into(),
            save_path: None,
        }
    }
}

impl QrConfig {
    /// Check the coherence of the options. Runs once at plugin
    /// construction; events never see an invalid configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)
    }

    /// The QR rendering style derived from the color options.
    pub fn style(&self) -> QrStyle {
        QrStyle::new()
            .with_foreground(self.foreground.rgb())
            .with_background(self.background.rgb())
    }
}

//! RGB color values as they appear in host configuration files.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ConfigError;

/// An opaque RGB triple.
///
/// Accepts the forms hosts actually write: an `[r, g, b]` array, a hex
/// string (`"#rrggbb"`), or a decimal triple (`"255, 255, 255"`, with or
/// without surrounding parentheses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);

    /// The raw RGB channels.
    pub fn rgb(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::InvalidColor(s.to_string()));
            }
            let channel = |i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
            return Ok(Color([channel(0), channel(2), channel(4)]));
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(trimmed);
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        }
        Ok(Color(rgb))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        for channel in self.0 {
            tuple.serialize_element(&channel)?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an [r, g, b] array or a color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                v.parse().map_err(|e: ConfigError| E::custom(e))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Color, A::Error> {
                let mut rgb = [0u8; 3];
                for (i, slot) in rgb.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }
                Ok(Color(rgb))
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#0a141e".parse::<Color>().unwrap(), Color([10, 20, 30]));
    }

    #[test]
    fn parses_decimal_triple() {
        assert_eq!("255, 255, 255".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("(0, 0, 0)".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["#fff", "#gggggg", "1,2", "1,2,3,4", "256,0,0", "blue"] {
            assert!(bad.parse::<Color>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn deserializes_array_and_string_forms() {
        let from_array: Color = serde_json::from_str("[255, 0, 128]").unwrap();
        assert_eq!(from_array, Color([255, 0, 128]));
        let from_string: Color = serde_json::from_str("\"#ff0080\"").unwrap();
        assert_eq!(from_string, Color([255, 0, 128]));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
        assert!(serde_json::from_str::<Color>("[1, 2]").is_err());
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Color([1, 2, 3])).unwrap();
        assert_eq!(json, "[1,2,3]");
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color([255, 0, 128]).to_string(), "#ff0080");
    }
}

//! Screen anchor resolution for overlay placement.
//!
//! An anchor names one of eight screen positions: the four frame corners
//! plus four positions flanking the midpoints of the top and bottom
//! edges. Resolution turns an anchor, a frame size, a bitmap size, and a
//! pixel offset into a concrete top-left placement coordinate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of eight named screen positions for the QR overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    #[serde(rename = "topleft")]
    TopLeft,
    #[serde(rename = "topright")]
    TopRight,
    #[serde(rename = "bottomleft")]
    BottomLeft,
    #[serde(rename = "bottomright")]
    BottomRight,
    #[serde(rename = "midtop-left")]
    MidTopLeft,
    #[serde(rename = "midtop-right")]
    MidTopRight,
    #[serde(rename = "midbottom-left")]
    MidBottomLeft,
    #[serde(rename = "midbottom-right")]
    MidBottomRight,
}

/// Resolved top-left coordinate for an overlay bitmap.
///
/// Coordinates are signed: an anchor can place part of the bitmap
/// outside the frame when the bitmap is larger than the available space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

impl Placement {
    /// Whether any part of a `bitmap`-sized overlay at this placement
    /// falls outside a `frame`-sized target.
    pub fn clips(&self, frame: (u32, u32), bitmap: (u32, u32)) -> bool {
        self.x < 0
            || self.y < 0
            || self.x + bitmap.0 as i64 > frame.0 as i64
            || self.y + bitmap.1 as i64 > frame.1 as i64
    }
}

impl Anchor {
    /// All anchors, in config-spelling order.
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::MidTopLeft,
        Anchor::MidTopRight,
        Anchor::MidBottomLeft,
        Anchor::MidBottomRight,
    ];

    /// The config-file spelling of this anchor.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
            Anchor::MidTopLeft => "midtop-left",
            Anchor::MidTopRight => "midtop-right",
            Anchor::MidBottomLeft => "midbottom-left",
            Anchor::MidBottomRight => "midbottom-right",
        }
    }

    /// Resolve this anchor to the top-left coordinate of a `bitmap`-sized
    /// overlay on a `frame`-sized target.
    ///
    /// The offset is applied inward from the anchored edges: a corner
    /// anchor keeps the bitmap `offset` pixels away from its two edges;
    /// a mid-edge anchor keeps it `offset.1` pixels from the top or
    /// bottom edge and `offset.0` pixels left or right of the frame's
    /// horizontal center. Resolution is pure arithmetic, so identical
    /// inputs always produce the identical placement.
    pub fn resolve(self, frame: (u32, u32), bitmap: (u32, u32), offset: (i32, i32)) -> Placement {
        let (fw, fh) = (frame.0 as i64, frame.1 as i64);
        let (bw, bh) = (bitmap.0 as i64, bitmap.1 as i64);
        let (ox, oy) = (offset.0 as i64, offset.1 as i64);

        let x = match self {
            Anchor::TopLeft | Anchor::BottomLeft => ox,
            Anchor::TopRight | Anchor::BottomRight => fw - ox - bw,
            Anchor::MidTopLeft | Anchor::MidBottomLeft => fw / 2 - ox - bw,
            Anchor::MidTopRight | Anchor::MidBottomRight => fw / 2 + ox,
        };
        let y = match self {
            Anchor::TopLeft | Anchor::TopRight | Anchor::MidTopLeft | Anchor::MidTopRight => oy,
            Anchor::BottomLeft
            | Anchor::BottomRight
            | Anchor::MidBottomLeft
            | Anchor::MidBottomRight => fh - oy - bh,
        };

        Placement { x, y }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized anchor spelling.
#[derive(Debug, thiserror::Error)]
#[error("Unknown anchor location: {0}")]
pub struct UnknownAnchor(String);

impl FromStr for Anchor {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAnchor(s.to_string()))
    }
}

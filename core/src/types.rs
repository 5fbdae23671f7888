use core::fmt;
use serde::{Deserialize, Serialize};

/// Key of one scratch card, also used as its persistence key (usually a day number).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u8> for CardId {
    fn from(day: u8) -> Self {
        Self(day.to_string())
    }
}

/// Position in logical (CSS) pixels, relative to the top-left of a card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at `t` along the segment from `self` to `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Size of the display element in whole logical pixels, never smaller than 1x1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: round_clamped(width),
            height: round_clamped(height),
        }
    }

    pub const fn longest_side(self) -> u32 {
        if self.width > self.height {
            self.width
        } else {
            self.height
        }
    }
}

/// Raster dimensions in device pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn from_logical(logical: LogicalSize, ratio: f64) -> Self {
        Self {
            width: floor_clamped(f64::from(logical.width) * ratio),
            height: floor_clamped(f64::from(logical.height) * ratio),
        }
    }
}

/// Logical and physical size of a cover surface plus the ratio between them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub logical: LogicalSize,
    pub physical: PhysicalSize,
    pub ratio: f64,
}

impl SurfaceLayout {
    pub fn new(logical: LogicalSize, ratio: f64) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        };
        Self {
            logical,
            physical: PhysicalSize::from_logical(logical, ratio),
            ratio,
        }
    }
}

fn round_clamped(value: f64) -> u32 {
    if value.is_finite() {
        value.round().clamp(1.0, u32::MAX as f64) as u32
    } else {
        1
    }
}

fn floor_clamped(value: f64) -> u32 {
    if value.is_finite() {
        value.floor().clamp(1.0, u32::MAX as f64) as u32
    } else {
        1
    }
}

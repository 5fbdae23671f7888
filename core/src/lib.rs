use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use catalog::*;
pub use detector::*;
pub use error::*;
pub use matching::*;
pub use progress::*;
pub use spoiler::*;
pub use store::*;
pub use surface::*;
pub use tracker::*;
pub use types::*;

mod board;
mod card;
mod catalog;
mod detector;
mod error;
mod matching;
mod progress;
mod spoiler;
mod store;
mod surface;
mod tracker;
mod types;

#[cfg(test)]
pub(crate) mod testing;

/// Tuning knobs for the scratch cards.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// Cleared fraction that has to be exceeded before a card reveals.
    pub reveal_threshold: f64,
    /// Only every `sample_stride`-th pixel is inspected by the reveal check.
    pub sample_stride: usize,
    /// In-stroke reveal check cadence, in move events.
    pub check_every_moves: u32,
    pub brush: BrushConfig,
    pub cover: CoverStyle,
    pub resize_debounce_ms: u32,
    pub spoiler_policy: SpoilerPolicy,
    pub guess_range: GuessRange,
}

impl ScratchConfig {
    pub const DEFAULT_THRESHOLD: f64 = 0.40;

    /// Copy with every field pulled back into a usable range.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let reveal_threshold = if self.reveal_threshold.is_finite() {
            self.reveal_threshold.clamp(0.01, 0.99)
        } else {
            defaults.reveal_threshold
        };
        Self {
            reveal_threshold,
            sample_stride: self.sample_stride.max(1),
            check_every_moves: self.check_every_moves.max(1),
            brush: self.brush.sanitized(),
            cover: self.cover,
            resize_debounce_ms: self.resize_debounce_ms,
            spoiler_policy: self.spoiler_policy,
            guess_range: GuessRange::new(self.guess_range.min, self.guess_range.max),
        }
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: Self::DEFAULT_THRESHOLD,
            sample_stride: 40,
            check_every_moves: 20,
            brush: BrushConfig::default(),
            cover: CoverStyle::default(),
            resize_debounce_ms: 120,
            spoiler_policy: SpoilerPolicy::default(),
            guess_range: GuessRange::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Smallest brush radius in logical pixels.
    pub min_radius: f64,
    /// Brush radius as a share of the card's longest side.
    pub scale: f64,
    /// Distance between interpolated stamps as a share of the radius.
    pub spacing: f64,
}

impl BrushConfig {
    pub fn radius_for(&self, logical: LogicalSize) -> f64 {
        let scaled = (f64::from(logical.longest_side()) * self.scale).round();
        self.min_radius.max(scaled)
    }

    pub fn spacing_for(&self, radius: f64) -> f64 {
        radius * self.spacing
    }

    /// Smallest radius a configured brush may have, in logical pixels.
    pub const MIN_RADIUS_FLOOR: f64 = 1.0;

    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive_or = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            min_radius: positive_or(self.min_radius, defaults.min_radius)
                .max(Self::MIN_RADIUS_FLOOR),
            scale: if self.scale.is_finite() {
                self.scale.max(0.0)
            } else {
                defaults.scale
            },
            spacing: positive_or(self.spacing, defaults.spacing).clamp(0.05, 1.0),
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            min_radius: 25.0,
            scale: 0.10,
            spacing: 0.25,
        }
    }
}

/// Inclusive range of answers the matching game accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRange {
    pub min: u8,
    pub max: u8,
}

impl GuessRange {
    pub const fn new(a: u8, b: u8) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub const fn contains(self, value: i64) -> bool {
        value >= self.min as i64 && value <= self.max as i64
    }
}

impl Default for GuessRange {
    fn default() -> Self {
        Self::new(1, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_scales_with_card_but_never_below_minimum() {
        let brush = BrushConfig::default();

        assert_eq!(brush.radius_for(LogicalSize::new(120.0, 80.0)), 25.0);
        assert_eq!(brush.radius_for(LogicalSize::new(300.0, 420.0)), 42.0);
        assert_eq!(brush.spacing_for(40.0), 10.0);
    }

    #[test]
    fn sanitize_pulls_values_into_range() {
        let config = ScratchConfig {
            reveal_threshold: 3.0,
            sample_stride: 0,
            check_every_moves: 0,
            brush: BrushConfig {
                min_radius: -1.0,
                scale: f64::NAN,
                spacing: 5.0,
            },
            guess_range: GuessRange { min: 12, max: 1 },
            ..ScratchConfig::default()
        }
        .sanitized();

        assert_eq!(config.reveal_threshold, 0.99);
        assert_eq!(config.sample_stride, 1);
        assert_eq!(config.check_every_moves, 1);
        assert_eq!(config.brush, BrushConfig {
            min_radius: 25.0,
            scale: 0.10,
            spacing: 1.0,
        });
        assert_eq!(config.guess_range, GuessRange::new(1, 12));
    }

    #[test]
    fn tiny_brush_is_raised_to_floor() {
        let config = ScratchConfig {
            brush: BrushConfig {
                min_radius: 1e-300,
                scale: 0.0,
                ..BrushConfig::default()
            },
            ..ScratchConfig::default()
        }
        .sanitized();

        assert_eq!(config.brush.min_radius, BrushConfig::MIN_RADIUS_FLOOR);
        let radius = config.brush.radius_for(LogicalSize::new(100.0, 100.0));
        let stamps = interpolate(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            config.brush.spacing_for(radius),
        );
        assert!(stamps.len() <= 400);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: ScratchConfig =
            serde_json::from_str(r#"{"reveal_threshold": 0.6, "brush": {"min_radius": 30}}"#)
                .unwrap();

        assert_eq!(config.reveal_threshold, 0.6);
        assert_eq!(config.brush.min_radius, 30.0);
        assert_eq!(config.brush.scale, 0.10);
        assert_eq!(config.sample_stride, 40);
    }

    #[test]
    fn guess_range_contains_bounds() {
        let range = GuessRange::default();

        assert!(range.contains(1));
        assert!(range.contains(12));
        assert!(!range.contains(0));
        assert!(!range.contains(13));
    }
}

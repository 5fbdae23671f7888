use serde::{Deserialize, Serialize};

use crate::*;

/// Sampled estimate of how much of a cover has been scratched away.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub cleared: usize,
    pub sampled: usize,
}

impl Coverage {
    pub fn fraction(self) -> f64 {
        if self.sampled == 0 {
            0.0
        } else {
            self.cleared as f64 / self.sampled as f64
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealCheck {
    /// Not enough of the cover is gone yet.
    Covered(Coverage),
    /// The threshold was exceeded.
    Reached(Coverage),
    /// Pixels could not be read back; treated as still covered.
    Unavailable(ScratchError),
}

impl RevealCheck {
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::Reached(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealDetector {
    threshold: f64,
    stride: usize,
}

impl RevealDetector {
    pub fn new(threshold: f64, stride: usize) -> Self {
        Self {
            threshold,
            stride: stride.max(1),
        }
    }

    pub fn from_config(config: &ScratchConfig) -> Self {
        Self::new(config.reveal_threshold, config.sample_stride)
    }

    /// Counts fully transparent pixels among every `stride`-th pixel of an RGBA buffer.
    pub fn sample_rgba(&self, rgba: &[u8]) -> Coverage {
        let mut coverage = Coverage::default();
        for pixel in rgba.chunks_exact(4).step_by(self.stride) {
            coverage.sampled += 1;
            if pixel[3] == 0 {
                coverage.cleared += 1;
            }
        }
        coverage
    }

    pub fn exceeds(&self, coverage: Coverage) -> bool {
        coverage.sampled > 0 && coverage.fraction() > self.threshold
    }

    pub fn check<S: CoverSurface>(&self, surface: &S) -> RevealCheck {
        match surface.read_pixels() {
            Ok(rgba) => {
                let coverage = self.sample_rgba(&rgba);
                log::trace!(
                    "coverage {}/{} ({:.3})",
                    coverage.cleared,
                    coverage.sampled,
                    coverage.fraction()
                );
                if self.exceeds(coverage) {
                    RevealCheck::Reached(coverage)
                } else {
                    RevealCheck::Covered(coverage)
                }
            }
            Err(err) => {
                log::warn!("reveal check skipped: {}", err);
                RevealCheck::Unavailable(err)
            }
        }
    }
}

impl Default for RevealDetector {
    fn default() -> Self {
        Self::from_config(&ScratchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RGBA buffer of `total` pixels where the first `cleared` are transparent.
    fn buffer(total: usize, cleared: usize) -> Vec<u8> {
        (0..total)
            .flat_map(|i| {
                let alpha = if i < cleared { 0 } else { 0xff };
                [0xd8, 0xd8, 0xd8, alpha]
            })
            .collect()
    }

    #[test]
    fn reveal_fires_only_above_threshold() {
        let detector = RevealDetector::new(0.40, 1);

        assert!(!detector.exceeds(detector.sample_rgba(&buffer(100, 39))));
        assert!(!detector.exceeds(detector.sample_rgba(&buffer(100, 40))));
        assert!(detector.exceeds(detector.sample_rgba(&buffer(100, 41))));
    }

    #[test]
    fn stride_only_inspects_every_nth_pixel() {
        let detector = RevealDetector::new(0.40, 40);
        let mut rgba = buffer(400, 0);
        // pixels 0, 40, 80, ... are sampled; clearing one in between changes nothing
        rgba[4 * 41 + 3] = 0;
        assert_eq!(
            detector.sample_rgba(&rgba),
            Coverage {
                cleared: 0,
                sampled: 10
            }
        );

        rgba[4 * 40 + 3] = 0;
        assert_eq!(detector.sample_rgba(&rgba).cleared, 1);
    }

    #[test]
    fn empty_buffer_never_reveals() {
        let detector = RevealDetector::new(0.0, 1);

        assert_eq!(detector.sample_rgba(&[]).fraction(), 0.0);
        assert!(!detector.exceeds(detector.sample_rgba(&[])));
    }

    #[test]
    fn zero_stride_is_treated_as_one() {
        let detector = RevealDetector::new(0.5, 0);

        assert_eq!(detector.sample_rgba(&buffer(8, 8)).sampled, 8);
    }

    #[test]
    fn failed_readback_reports_unavailable() {
        let detector = RevealDetector::default();

        let check = detector.check(&SoftwareSurface::new());

        assert_eq!(check, RevealCheck::Unavailable(ScratchError::NotAllocated));
        assert!(!check.is_reached());
    }
}

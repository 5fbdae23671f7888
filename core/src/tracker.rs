use smallvec::{SmallVec, smallvec};

use crate::*;

/// Erase stamp centres produced by one input event.
pub type Stamps = SmallVec<[Point; 8]>;

#[derive(Clone, Debug, PartialEq)]
pub struct StrokeMove {
    pub stamps: Stamps,
    /// Whether the throttled in-stroke reveal check is due after these stamps.
    pub check_due: bool,
}

/// Turns a stroke's pointer samples into evenly spaced erase stamps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EraseTracker {
    last: Option<Point>,
    moves: u32,
}

impl EraseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn start(&mut self, point: Point) -> Stamps {
        self.last = Some(point);
        self.moves = 0;
        smallvec![point]
    }

    /// Returns `None` when no stroke is active.
    pub fn advance(&mut self, point: Point, spacing: f64, check_every: u32) -> Option<StrokeMove> {
        let last = self.last.replace(point)?;
        self.moves = self.moves.wrapping_add(1);
        Some(StrokeMove {
            stamps: interpolate(last, point, spacing),
            check_due: self.moves % check_every.max(1) == 0,
        })
    }

    /// Ends the stroke, returning whether one was active.
    pub fn finish(&mut self) -> bool {
        self.moves = 0;
        self.last.take().is_some()
    }
}

/// Upper bound on stamps produced by a single move, whatever the spacing.
pub const MAX_STAMPS_PER_MOVE: u32 = 1024;

/// Stamp centres strictly after `from` up to and including `to`, at most `spacing` apart.
pub fn interpolate(from: Point, to: Point, spacing: f64) -> Stamps {
    if !(spacing > 0.0) {
        return smallvec![to];
    }

    let steps = (from.distance(to) / spacing).ceil();
    if !steps.is_finite() || steps < 1.0 {
        return Stamps::new();
    }

    // bounded even for sub-pixel spacing
    let steps = steps.min(f64::from(MAX_STAMPS_PER_MOVE)) as u32;
    (1..=steps)
        .map(|i| from.lerp(to, f64::from(i) / f64::from(steps)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_keeps_stamps_within_spacing() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);

        let stamps = interpolate(from, to, 5.0);

        assert_eq!(stamps.len(), 20);
        assert_eq!(stamps.last(), Some(&to));
        let mut prev = from;
        for stamp in stamps {
            assert!(prev.distance(stamp) <= 5.0 + 1e-9);
            prev = stamp;
        }
    }

    #[test]
    fn tiny_spacing_is_capped() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);

        let stamps = interpolate(from, to, 1e-300);

        assert_eq!(stamps.len(), MAX_STAMPS_PER_MOVE as usize);
        assert_eq!(stamps.last(), Some(&to));
    }

    #[test]
    fn zero_length_move_adds_no_stamps() {
        let p = Point::new(3.0, 4.0);

        assert!(interpolate(p, p, 5.0).is_empty());
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let stamps = interpolate(Point::new(0.0, 0.0), Point::new(f64::INFINITY, 0.0), 5.0);

        assert!(stamps.is_empty());
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut tracker = EraseTracker::new();

        assert_eq!(tracker.advance(Point::new(1.0, 1.0), 5.0, 20), None);
        assert!(!tracker.is_active());
    }

    #[test]
    fn check_is_due_every_nth_move() {
        let mut tracker = EraseTracker::new();
        tracker.start(Point::new(0.0, 0.0));

        let due: Vec<bool> = (1..=6)
            .map(|i| {
                tracker
                    .advance(Point::new(f64::from(i), 0.0), 5.0, 3)
                    .unwrap()
                    .check_due
            })
            .collect();

        assert_eq!(due, [false, false, true, false, false, true]);
    }

    #[test]
    fn finish_clears_active_stroke() {
        let mut tracker = EraseTracker::new();
        tracker.start(Point::new(0.0, 0.0));

        assert!(tracker.finish());
        assert!(!tracker.finish());
        assert_eq!(tracker.advance(Point::new(1.0, 1.0), 5.0, 20), None);
    }
}

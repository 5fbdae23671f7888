use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Covered,
    /// Terminal; only an external progress reset brings a card back.
    Revealed,
}

impl Default for CardState {
    fn default() -> Self {
        Self::Covered
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StrokeOutcome {
    NoChange,
    Erased,
    Revealed,
}

impl StrokeOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Erased => true,
            Self::Revealed => true,
        }
    }
}

impl BitOr for StrokeOutcome {
    type Output = StrokeOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use StrokeOutcome::*;
        match (self, rhs) {
            (Revealed, _) | (_, Revealed) => Revealed,
            (Erased, _) | (_, Erased) => Erased,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// One scratch card: its cover surface, the stroke in progress and the reveal state.
#[derive(Clone, Debug)]
pub struct Card<S> {
    id: CardId,
    state: CardState,
    surface: Option<S>,
    layout: Option<SurfaceLayout>,
    brush_radius: f64,
    tracker: EraseTracker,
    detector: RevealDetector,
    config: ScratchConfig,
}

impl<S: CoverSurface> Card<S> {
    pub fn covered(id: CardId, config: ScratchConfig) -> Self {
        Self::with_state(id, CardState::Covered, config)
    }

    /// A card that was revealed on an earlier visit; it never gets a cover surface.
    pub fn revealed(id: CardId, config: ScratchConfig) -> Self {
        Self::with_state(id, CardState::Revealed, config)
    }

    fn with_state(id: CardId, state: CardState, config: ScratchConfig) -> Self {
        Self {
            id,
            state,
            surface: None,
            layout: None,
            brush_radius: config.brush.min_radius,
            tracker: EraseTracker::new(),
            detector: RevealDetector::from_config(&config),
            config,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CardState::Revealed)
    }

    /// Covered with a working surface. A covered card without one stays statically covered.
    pub fn is_interactive(&self) -> bool {
        !self.is_revealed() && self.surface.is_some()
    }

    pub fn is_stroking(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.layout
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Paints a fresh cover onto `surface` and takes ownership of it.
    ///
    /// Revealed cards drop the surface untouched. On failure the card is left without one.
    pub fn attach_surface(&mut self, mut surface: S, display: LogicalSize, ratio: f64) -> Result<()> {
        if self.is_revealed() {
            log::debug!("card {} already revealed, surface skipped", self.id);
            return Ok(());
        }

        self.surface = None;
        let layout = SurfaceLayout::new(display, ratio);
        render_cover(&mut surface, layout, &self.config.cover)?;

        self.brush_radius = self.config.brush.radius_for(layout.logical);
        self.layout = Some(layout);
        self.surface = Some(surface);
        self.tracker.finish();
        log::debug!(
            "card {} covered at {}x{} (ratio {}), brush {}",
            self.id,
            layout.logical.width,
            layout.logical.height,
            layout.ratio,
            self.brush_radius
        );
        Ok(())
    }

    /// Rebuilds the cover for a new display size, keeping the pixel ratio chosen at setup.
    ///
    /// Returns whether anything was redrawn; revealed cards are left alone.
    pub fn resize(&mut self, display: LogicalSize) -> Result<bool> {
        if self.is_revealed() {
            return Ok(false);
        }
        let (Some(surface), Some(previous)) = (self.surface.as_mut(), self.layout) else {
            return Ok(false);
        };

        let layout = SurfaceLayout::new(display, previous.ratio);
        self.tracker.finish();
        if let Err(err) = render_cover(surface, layout, &self.config.cover) {
            self.surface = None;
            self.layout = None;
            return Err(err);
        }
        self.layout = Some(layout);
        log::debug!(
            "card {} resized to {}x{}",
            self.id,
            layout.logical.width,
            layout.logical.height
        );
        Ok(true)
    }

    pub fn stroke_start(&mut self, point: Point) -> StrokeOutcome {
        if !self.is_interactive() {
            return StrokeOutcome::NoChange;
        }
        let stamps = self.tracker.start(point);
        self.stamp(&stamps)
    }

    pub fn stroke_move(&mut self, point: Point) -> StrokeOutcome {
        if !self.is_interactive() {
            return StrokeOutcome::NoChange;
        }
        let spacing = self.config.brush.spacing_for(self.brush_radius);
        let Some(step) = self
            .tracker
            .advance(point, spacing, self.config.check_every_moves)
        else {
            return StrokeOutcome::NoChange;
        };

        let outcome = self.stamp(&step.stamps);
        if step.check_due {
            outcome | self.check_reveal()
        } else {
            outcome
        }
    }

    pub fn stroke_end(&mut self) -> StrokeOutcome {
        self.tracker.finish();
        self.check_reveal()
    }

    /// Input source gave up on the stroke (lost capture, cancelled touch); finalized like an end.
    pub fn stroke_cancel(&mut self) -> StrokeOutcome {
        self.stroke_end()
    }

    /// Samples the cover and reveals the card if enough is gone.
    pub fn check_reveal(&mut self) -> StrokeOutcome {
        let Some(surface) = self.surface.as_ref().filter(|_| !self.is_revealed()) else {
            return StrokeOutcome::NoChange;
        };
        match self.detector.check(surface) {
            RevealCheck::Reached(coverage) => {
                log::debug!(
                    "card {} reached {:.3} cleared",
                    self.id,
                    coverage.fraction()
                );
                self.reveal()
            }
            RevealCheck::Covered(_) | RevealCheck::Unavailable(_) => StrokeOutcome::NoChange,
        }
    }

    /// The one-shot `Covered -> Revealed` transition.
    fn reveal(&mut self) -> StrokeOutcome {
        if self.is_revealed() {
            return StrokeOutcome::NoChange;
        }
        self.state = CardState::Revealed;
        self.surface = None;
        self.tracker.finish();
        log::debug!("card {} revealed", self.id);
        StrokeOutcome::Revealed
    }

    fn stamp(&mut self, stamps: &[Point]) -> StrokeOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return StrokeOutcome::NoChange;
        };
        if stamps.is_empty() {
            return StrokeOutcome::NoChange;
        }
        for &center in stamps {
            surface.erase_circle(center, self.brush_radius);
        }
        StrokeOutcome::Erased
    }
}

use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

use crate::*;

/// Software surface whose readback can be made to fail, like a tainted canvas.
#[derive(Clone, Debug, Default)]
pub(crate) struct FlakySurface {
    pub inner: SoftwareSurface,
    pub fail_readback: Rc<Cell<bool>>,
}

impl CoverSurface for FlakySurface {
    fn allocate(&mut self, layout: SurfaceLayout) -> Result<()> {
        self.inner.allocate(layout)
    }

    fn paint_cover(&mut self, style: &CoverStyle) -> Result<()> {
        self.inner.paint_cover(style)
    }

    fn erase_circle(&mut self, center: Point, radius: f64) {
        self.inner.erase_circle(center, radius)
    }

    fn read_pixels(&self) -> Result<Cow<'_, [u8]>> {
        if self.fail_readback.get() {
            Err(ScratchError::Readback("canvas is tainted".into()))
        } else {
            self.inner.read_pixels()
        }
    }
}

/// Horizontal back-and-forth strokes covering the whole card.
pub(crate) fn sweep(width: f64, height: f64, step: f64) -> Vec<(Point, Point)> {
    let mut rows = Vec::new();
    let mut y = 0.0;
    while y <= height {
        rows.push((Point::new(0.0, y), Point::new(width, y)));
        y += step;
    }
    rows
}

use ndarray::{Array3, s};
use std::borrow::Cow;

use super::*;

/// In-memory RGBA raster with the same erase semantics as a Canvas 2D `destination-out` fill.
///
/// A physical pixel is erased when its centre, mapped back to logical space, lies inside the
/// stamp circle.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftwareSurface {
    pixels: Array3<u8>,
    layout: Option<SurfaceLayout>,
}

impl SoftwareSurface {
    pub fn new() -> Self {
        Self {
            pixels: Array3::zeros((0, 0, 4)),
            layout: None,
        }
    }

    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.layout
    }

    /// Alpha of the physical pixel under a logical point, `None` outside the raster.
    pub fn alpha_at(&self, point: Point) -> Option<u8> {
        let layout = self.layout?;
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let px = (point.x * layout.ratio).floor() as usize;
        let py = (point.y * layout.ratio).floor() as usize;
        self.pixels.get((py, px, 3)).copied()
    }

    /// Exact fraction of fully transparent pixels, over the whole raster.
    pub fn cleared_fraction(&self) -> f64 {
        let alphas = self.pixels.slice(s![.., .., 3]);
        if alphas.is_empty() {
            return 0.0;
        }
        let cleared = alphas.iter().filter(|&&alpha| alpha == 0).count();
        cleared as f64 / alphas.len() as f64
    }
}

impl Default for SoftwareSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverSurface for SoftwareSurface {
    fn allocate(&mut self, layout: SurfaceLayout) -> Result<()> {
        let PhysicalSize { width, height } = layout.physical;
        self.pixels = Array3::zeros((height as usize, width as usize, 4));
        self.layout = Some(layout);
        Ok(())
    }

    fn paint_cover(&mut self, style: &CoverStyle) -> Result<()> {
        let layout = self.layout.ok_or(ScratchError::NotAllocated)?;
        let rows = f64::from(layout.physical.height);
        for (y, mut row) in self.pixels.outer_iter_mut().enumerate() {
            let Rgba(color) = style.color_at((y as f64 + 0.5) / rows);
            for mut pixel in row.outer_iter_mut() {
                pixel
                    .iter_mut()
                    .zip(color)
                    .for_each(|(dst, src)| *dst = src);
            }
        }
        Ok(())
    }

    fn erase_circle(&mut self, center: Point, radius: f64) {
        let Some(layout) = self.layout else {
            return;
        };
        if !(radius > 0.0) {
            return;
        }

        let ratio = layout.ratio;
        let PhysicalSize { width, height } = layout.physical;
        let span = |lo: f64, hi: f64, limit: u32| {
            let lo = (lo * ratio).floor().clamp(0.0, f64::from(limit)) as usize;
            let hi = (hi * ratio).ceil().clamp(0.0, f64::from(limit)) as usize;
            lo..hi
        };
        let radius_sq = radius * radius;

        for py in span(center.y - radius, center.y + radius, height) {
            let dy = (py as f64 + 0.5) / ratio - center.y;
            for px in span(center.x - radius, center.x + radius, width) {
                let dx = (px as f64 + 0.5) / ratio - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.pixels.slice_mut(s![py, px, ..]).fill(0);
                }
            }
        }
    }

    fn read_pixels(&self) -> Result<Cow<'_, [u8]>> {
        if self.layout.is_none() {
            return Err(ScratchError::NotAllocated);
        }
        Ok(match self.pixels.as_slice() {
            Some(bytes) => Cow::Borrowed(bytes),
            None => Cow::Owned(self.pixels.iter().copied().collect()),
        })
    }
}

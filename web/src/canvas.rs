use std::borrow::Cow;
use std::f64::consts::TAU;
use twelvedays_core::{CoverStyle, CoverSurface, Point, Result, ScratchError, SurfaceLayout};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A card's `<canvas>` overlay driven through its 2D context.
#[derive(Debug)]
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layout: Option<SurfaceLayout>,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(ScratchError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ScratchError::ContextUnavailable)?;

        let style = canvas.style();
        if let Err(err) = style.set_property("touch-action", "none") {
            log::warn!("could not disable touch panning on canvas: {:?}", err);
        }

        Ok(Self {
            canvas,
            ctx,
            layout: None,
        })
    }

    fn set_composite(&self, operation: &str) -> Result<()> {
        self.ctx
            .set_global_composite_operation(operation)
            .map_err(|err| {
                log::error!("composite operation {} rejected: {:?}", operation, err);
                ScratchError::ContextUnavailable
            })
    }
}

impl CoverSurface for CanvasSurface {
    fn allocate(&mut self, layout: SurfaceLayout) -> Result<()> {
        let style = self.canvas.style();
        for (name, value) in [
            ("width", layout.logical.width),
            ("height", layout.logical.height),
        ] {
            if let Err(err) = style.set_property(name, &format!("{}px", value)) {
                log::warn!("could not set canvas {}: {:?}", name, err);
            }
        }

        // Resizing the backing store also resets the context state.
        self.canvas.set_width(layout.physical.width);
        self.canvas.set_height(layout.physical.height);
        self.ctx
            .set_transform(layout.ratio, 0.0, 0.0, layout.ratio, 0.0, 0.0)
            .map_err(|err| {
                log::error!("set_transform failed: {:?}", err);
                ScratchError::ContextUnavailable
            })?;

        self.layout = Some(layout);
        Ok(())
    }

    fn paint_cover(&mut self, style: &CoverStyle) -> Result<()> {
        let layout = self.layout.ok_or(ScratchError::NotAllocated)?;
        let width = f64::from(layout.logical.width);
        let height = f64::from(layout.logical.height);

        self.set_composite("source-over")?;
        match *style {
            CoverStyle::Flat(color) => self.ctx.set_fill_style_str(&color.to_css()),
            CoverStyle::Gradient { top, bottom } => {
                let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
                for (offset, color) in [(0.0, top), (1.0, bottom)] {
                    gradient
                        .add_color_stop(offset, &color.to_css())
                        .map_err(|_| ScratchError::ContextUnavailable)?;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx.fill_rect(0.0, 0.0, width, height);

        // everything drawn from here on erases
        self.set_composite("destination-out")
    }

    fn erase_circle(&mut self, center: Point, radius: f64) {
        if self.layout.is_none() {
            return;
        }
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::warn!("arc at {:?} failed: {:?}", center, err);
            return;
        }
        self.ctx.fill();
    }

    fn read_pixels(&self) -> Result<Cow<'_, [u8]>> {
        let layout = self.layout.ok_or(ScratchError::NotAllocated)?;
        // image data is addressed in physical pixels, the transform does not apply
        let image = self
            .ctx
            .get_image_data(
                0.0,
                0.0,
                f64::from(layout.physical.width),
                f64::from(layout.physical.height),
            )
            .map_err(|err| ScratchError::Readback(format!("{:?}", err)))?;
        Ok(Cow::Owned(image.data().0))
    }
}

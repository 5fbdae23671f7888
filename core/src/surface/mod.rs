use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::*;
pub use software::*;

mod software;

/// Raster layer that covers a card and gets scratched away.
///
/// All drawing coordinates are logical pixels; implementations scale them by the layout ratio.
pub trait CoverSurface {
    /// (Re)allocates the backing raster for `layout`, discarding previous content.
    fn allocate(&mut self, layout: SurfaceLayout) -> Result<()>;

    /// Fills the whole surface with an opaque cover.
    fn paint_cover(&mut self, style: &CoverStyle) -> Result<()>;

    /// Clears alpha in a filled circle, leaving whatever is below the surface visible.
    fn erase_circle(&mut self, center: Point, radius: f64);

    /// Reads back the RGBA bytes of the full physical raster, row-major.
    fn read_pixels(&self) -> Result<Cow<'_, [u8]>>;
}

/// Allocates `surface` for `layout` and paints a fresh, fully opaque cover onto it.
pub fn render_cover<S: CoverSurface>(
    surface: &mut S,
    layout: SurfaceLayout,
    style: &CoverStyle,
) -> Result<()> {
    surface.allocate(layout)?;
    surface.paint_cover(style)?;
    log::trace!(
        "cover rendered: {}x{} logical, {}x{} physical",
        layout.logical.width,
        layout.logical.height,
        layout.physical.width,
        layout.physical.height
    );
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 0xff])
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0xff; 4];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v << 4 | v;
                }
                Some(Self(out))
            }
            6 => Some(Self([channel(0)?, channel(2)?, channel(4)?, 0xff])),
            8 => Some(Self([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
            _ => None,
        }
    }

    pub fn to_css(self) -> String {
        let [r, g, b, a] = self.0;
        if a == 0xff {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {:.3})", f64::from(a) / 255.0)
        }
    }

    fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0; 4];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = f64::from(self.0[i]);
            let b = f64::from(other.0[i]);
            *channel = (a + (b - a) * t).round() as u8;
        }
        Self(out)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverStyle {
    Flat(Rgba),
    /// Vertical gradient from the top edge to the bottom edge.
    Gradient { top: Rgba, bottom: Rgba },
}

impl CoverStyle {
    /// Color at relative height `t` (0 at the top, 1 at the bottom).
    pub fn color_at(&self, t: f64) -> Rgba {
        match *self {
            Self::Flat(color) => color,
            Self::Gradient { top, bottom } => top.mix(bottom, t),
        }
    }
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self::Flat(Rgba::opaque(0xd8, 0xd8, 0xd8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_in_all_lengths() {
        assert_eq!(Rgba::from_hex("#d8d8d8"), Some(Rgba::opaque(0xd8, 0xd8, 0xd8)));
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::opaque(0xff, 0xff, 0xff)));
        assert_eq!(Rgba::from_hex("#00000080"), Some(Rgba([0, 0, 0, 0x80])));
        assert_eq!(Rgba::from_hex("d8d8d8"), None);
        assert_eq!(Rgba::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn css_output_keeps_opaque_colors_short() {
        assert_eq!(Rgba::opaque(0xd8, 0xd8, 0xd8).to_css(), "#d8d8d8");
        assert_eq!(Rgba([0, 0, 0, 0]).to_css(), "rgba(0, 0, 0, 0.000)");
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let style = CoverStyle::Gradient {
            top: Rgba::opaque(0, 0, 0),
            bottom: Rgba::opaque(200, 100, 50),
        };

        assert_eq!(style.color_at(0.0), Rgba::opaque(0, 0, 0));
        assert_eq!(style.color_at(0.5), Rgba::opaque(100, 50, 25));
        assert_eq!(style.color_at(2.0), Rgba::opaque(200, 100, 50));
    }
}

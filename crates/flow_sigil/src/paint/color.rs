//! Mapping curves and shapes to palette colors.
use glam::Vec2;
use rand::Rng;

use crate::frame::Frame;
use crate::palette::{Hsba, Palette, PALETTE_LEN};
use crate::random::{rand_range, remap};
use crate::style::ColorStyle;

/// Picks colors from one palette according to a [`ColorStyle`].
#[derive(Debug, Clone, Copy)]
pub struct ColorAssigner {
    palette: &'static Palette,
    style: ColorStyle,
    top: f32,
    bottom: f32,
    jitter: f32,
}

impl ColorAssigner {
    pub fn new(style: ColorStyle, palette: &'static Palette, frame: &Frame) -> Self {
        Self {
            palette,
            style,
            top: frame.virtual_bounds.min.y,
            bottom: frame.virtual_bounds.max.y,
            jitter: frame.size * 0.5,
        }
    }

    pub fn style(&self) -> ColorStyle {
        self.style
    }

    /// Color for something placed at `position` as the `index`-th curve.
    ///
    /// Only the gradient style draws from `rng`: one jitter value per call.
    pub fn pick(&self, rng: &mut dyn Rng, position: Vec2, index: usize) -> Hsba {
        match self.style {
            ColorStyle::Monochrome => Hsba::BLACK,
            ColorStyle::Gradient => {
                let y = position.y + rand_range(rng, -self.jitter, self.jitter);
                self.palette[self.gradient_bucket(y)]
            }
            ColorStyle::Ordered => self.palette[index % PALETTE_LEN],
        }
    }

    /// Palette slot for a (jittered) y coordinate, clamped to the palette.
    fn gradient_bucket(&self, y: f32) -> usize {
        let bucket = remap(y, self.top, self.bottom, 0.0, PALETTE_LEN as f32).floor();
        bucket.clamp(0.0, (PALETTE_LEN - 1) as f32) as usize
    }
}

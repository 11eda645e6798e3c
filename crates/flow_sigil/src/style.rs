//! Style selection: the closed set of flags that shape a sigil's look.
//!
//! [`StyleConfiguration::select`] consumes the random stream in this fixed order:
//!
//! 1. stroke width, `uniform(min, max) · scale`
//! 2. gradient vs ordered color style, then the monochrome override
//! 3. shapes on/off, then circle vs square only when shapes are on
//! 4. rotated squares, continuous, filled, curl, shadow, crossed, zig-zag,
//!    per-shape coloring, bordered
//! 5. the monochrome stroke factor `uniform(0.2, 0.3)`, only under monochrome
//! 6. the palette index
//!
//! Mutual-exclusion rules are applied by [`StyleConfiguration::resolve`] between
//! steps 4 and 5.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::StyleProbabilities;
use crate::palette::PALETTES;
use crate::random::{coin, rand_index, rand_range};

/// Shape drawn at every curve vertex, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    None,
    Circle,
    Square,
}

/// Rule mapping a curve or shape to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorStyle {
    /// Black regardless of position.
    Monochrome,
    /// Palette used as a vertical gradient over the virtual canvas.
    Gradient,
    /// Palette cycled in curve-creation order.
    Ordered,
}

/// Immutable style of one sigil.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleConfiguration {
    pub shape: ShapeKind,
    /// Field angles are used as-is instead of being quantized.
    pub continuous: bool,
    /// Curves follow the curl of the field.
    pub curl: bool,
    pub shadow: bool,
    /// Half of the curves are traced with a doubled angle offset.
    pub crossed: bool,
    pub zig_zag: bool,
    /// Shapes are colored individually by position.
    pub color_per_shape: bool,
    /// Curves are filled instead of stroked.
    pub filled: bool,
    pub rotated_squares: bool,
    /// Shapes get a translucent light outline.
    pub bordered: bool,
    /// Stroke width in pixels.
    pub stroke_width: f32,
    pub color_style: ColorStyle,
    /// Index into [`crate::palette::PALETTES`].
    pub palette_index: usize,
}

impl StyleConfiguration {
    /// Draw a style from the random stream. `stroke_range` is in reference units and
    /// `scale` converts them to pixels.
    pub fn select(
        rng: &mut dyn Rng,
        probabilities: &StyleProbabilities,
        stroke_range: (f32, f32),
        scale: f32,
    ) -> Self {
        let p = probabilities;
        let stroke_width = rand_range(rng, stroke_range.0, stroke_range.1) * scale;

        let mut color_style = if coin(rng, p.gradient) {
            ColorStyle::Gradient
        } else {
            ColorStyle::Ordered
        };
        if coin(rng, p.monochrome) {
            color_style = ColorStyle::Monochrome;
        }

        let shape = if coin(rng, p.shapes) {
            if coin(rng, p.circles) {
                ShapeKind::Circle
            } else {
                ShapeKind::Square
            }
        } else {
            ShapeKind::None
        };

        let mut style = Self {
            shape,
            rotated_squares: coin(rng, p.rotated_squares),
            continuous: coin(rng, p.continuous),
            filled: coin(rng, p.filled),
            curl: coin(rng, p.curl),
            shadow: coin(rng, p.shadow),
            crossed: coin(rng, p.crossed),
            zig_zag: coin(rng, p.zig_zag),
            color_per_shape: coin(rng, p.color_per_shape),
            bordered: coin(rng, p.bordered),
            stroke_width,
            color_style,
            palette_index: 0,
        };
        style.resolve();

        if style.color_style == ColorStyle::Monochrome {
            style.stroke_width *= rand_range(rng, 0.2, 0.3);
        }
        style.palette_index = rand_index(rng, PALETTES.len());

        style
    }

    /// Apply the mutual-exclusion rules in order. Idempotent.
    pub fn resolve(&mut self) {
        if self.crossed {
            self.zig_zag = false;
        }
        if self.curl {
            self.continuous = true;
            self.shape = ShapeKind::None;
        }
        if self.filled {
            self.zig_zag = false;
            self.shape = ShapeKind::None;
        }
        if !self.continuous {
            self.filled = false;
        }
        if self.zig_zag {
            self.shadow = false;
        }
        if self.color_style == ColorStyle::Monochrome {
            self.shadow = false;
        }
        if self.shape == ShapeKind::None {
            self.color_per_shape = false;
        }
    }

    /// Whether every exclusion rule holds.
    pub fn is_consistent(&self) -> bool {
        let implies = |a: bool, b: bool| !a || b;
        let no_shapes = self.shape == ShapeKind::None;
        implies(self.crossed, !self.zig_zag)
            && implies(self.curl, self.continuous && no_shapes)
            && implies(self.filled, !self.zig_zag && no_shapes)
            && implies(!self.continuous, !self.filled)
            && implies(self.zig_zag, !self.shadow)
            && implies(self.color_style == ColorStyle::Monochrome, !self.shadow)
            && implies(no_shapes, !self.color_per_shape)
    }

    pub fn has_shapes(&self) -> bool {
        self.shape != ShapeKind::None
    }
}

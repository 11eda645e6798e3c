//! Configuration for sigil generation.
//!
//! All lengths are expressed in reference units: values at a
//! [`SigilConfig::reference_size`] canvas. They are multiplied by
//! `size / reference_size` when a [`crate::frame::Frame`] is built.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::LayoutStrategy;

/// Probabilities of the independent style coin flips.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleProbabilities {
    /// Gradient color style; ordered otherwise.
    pub gradient: f32,
    /// Monochrome override of the color style.
    pub monochrome: f32,
    /// Shapes instead of curves.
    pub shapes: f32,
    /// Circles given shapes; squares otherwise.
    pub circles: f32,
    pub rotated_squares: f32,
    pub continuous: f32,
    pub filled: f32,
    pub curl: f32,
    pub shadow: f32,
    pub crossed: f32,
    pub zig_zag: f32,
    pub color_per_shape: f32,
    pub bordered: f32,
}

impl Default for StyleProbabilities {
    fn default() -> Self {
        Self {
            gradient: 0.5,
            monochrome: 0.05,
            shapes: 0.2,
            circles: 0.5,
            rotated_squares: 0.5,
            continuous: 0.5,
            filled: 0.1,
            curl: 0.25,
            shadow: 0.25,
            crossed: 0.1,
            zig_zag: 0.2,
            color_per_shape: 0.5,
            bordered: 0.5,
        }
    }
}

impl StyleProbabilities {
    fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> {
        [
            ("gradient", self.gradient),
            ("monochrome", self.monochrome),
            ("shapes", self.shapes),
            ("circles", self.circles),
            ("rotated_squares", self.rotated_squares),
            ("continuous", self.continuous),
            ("filled", self.filled),
            ("curl", self.curl),
            ("shadow", self.shadow),
            ("crossed", self.crossed),
            ("zig_zag", self.zig_zag),
            ("color_per_shape", self.color_per_shape),
            ("bordered", self.bordered),
        ]
        .into_iter()
    }
}

/// Tunables of the evenly-spaced streamline layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpacedParams {
    /// Every `seed_every`-th trace step inside the canvas becomes a seed candidate.
    pub seed_every: usize,
    /// Step length in reference units.
    pub step_length: f32,
    /// Curves shorter than this (reference units) are discarded.
    pub min_curve_length: f32,
    /// Hard cap on seed-queue pops.
    pub max_iterations: usize,
    /// Hard cap on steps per half-curve.
    pub max_trace_steps: usize,
}

impl Default for SpacedParams {
    fn default() -> Self {
        Self {
            seed_every: 2,
            step_length: 8.0,
            min_curve_length: 50.0,
            max_iterations: 2000,
            max_trace_steps: 2000,
        }
    }
}

/// Configuration for a sigil.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SigilConfig {
    /// Canvas edge length in pixels.
    pub size: u32,
    /// Canvas edge at which the reference-unit constants apply.
    pub reference_size: f32,
    /// Stroke width range in reference units.
    pub stroke_range: (f32, f32),
    /// Virtual canvas overhang on every side, in reference units.
    pub margin: f32,
    /// Vector-field cell edge in reference units.
    pub field_resolution: f32,
    /// Noise coordinate increment per field cell.
    pub noise_scale: f32,
    pub probabilities: StyleProbabilities,
    pub spaced: SpacedParams,
    /// Candidate attempts per active point in Poisson-disc sampling.
    pub poisson_attempts: usize,
    /// Alpha amount of the texture overlay, forwarded to the surface.
    pub texture_amount: f32,
    /// Forces a layout. The layout is still drawn from the random stream so later
    /// decisions do not shift.
    pub layout: Option<LayoutStrategy>,
}

impl Default for SigilConfig {
    fn default() -> Self {
        Self {
            size: 800,
            reference_size: 800.0,
            stroke_range: (2.0, 50.0),
            margin: 160.0,
            field_resolution: 11.2,
            noise_scale: 0.005,
            probabilities: StyleProbabilities::default(),
            spaced: SpacedParams::default(),
            poisson_attempts: 30,
            texture_amount: 50.0,
            layout: None,
        }
    }
}

impl SigilConfig {
    /// Creates a new [`SigilConfig`] for a square canvas of `size` pixels.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Sets the stroke width range in reference units.
    pub fn with_stroke_range(mut self, min: f32, max: f32) -> Self {
        self.stroke_range = (min, max);
        self
    }

    /// Sets the virtual canvas margin in reference units.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the vector-field cell edge in reference units.
    pub fn with_field_resolution(mut self, field_resolution: f32) -> Self {
        self.field_resolution = field_resolution;
        self
    }

    /// Sets the style probabilities.
    pub fn with_probabilities(mut self, probabilities: StyleProbabilities) -> Self {
        self.probabilities = probabilities;
        self
    }

    /// Sets the evenly-spaced layout parameters.
    pub fn with_spaced(mut self, spaced: SpacedParams) -> Self {
        self.spaced = spaced;
        self
    }

    /// Sets the texture overlay amount.
    pub fn with_texture_amount(mut self, texture_amount: f32) -> Self {
        self.texture_amount = texture_amount;
        self
    }

    /// Forces the curve layout instead of drawing it.
    pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Scale from reference units to pixels.
    pub fn scale(&self) -> f32 {
        self.size as f32 / self.reference_size
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidConfig("size must be > 0".into()));
        }
        if !(self.reference_size.is_finite() && self.reference_size > 0.0) {
            return Err(Error::InvalidConfig("reference_size must be > 0".into()));
        }
        let (lo, hi) = self.stroke_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(Error::InvalidConfig(
                "stroke_range must satisfy 0 < min < max".into(),
            ));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(Error::InvalidConfig("margin must be >= 0".into()));
        }
        if !(self.field_resolution.is_finite() && self.field_resolution > 0.0) {
            return Err(Error::InvalidConfig("field_resolution must be > 0".into()));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(Error::InvalidConfig("noise_scale must be > 0".into()));
        }
        if let Some((name, p)) = self
            .probabilities
            .iter()
            .find(|(_, p)| !(0.0..=1.0).contains(p))
        {
            return Err(Error::InvalidConfig(format!(
                "probability '{name}' must be in [0, 1], got {p}"
            )));
        }
        let spaced = &self.spaced;
        if spaced.seed_every == 0 {
            return Err(Error::InvalidConfig("spaced.seed_every must be > 0".into()));
        }
        if !(spaced.step_length.is_finite() && spaced.step_length > 0.0) {
            return Err(Error::InvalidConfig("spaced.step_length must be > 0".into()));
        }
        if spaced.max_iterations == 0 || spaced.max_trace_steps == 0 {
            return Err(Error::InvalidConfig(
                "spaced iteration limits must be > 0".into(),
            ));
        }
        if !(self.texture_amount.is_finite() && (0.0..=100.0).contains(&self.texture_amount)) {
            return Err(Error::InvalidConfig(
                "texture_amount must be in [0, 100]".into(),
            ));
        }
        if self.poisson_attempts == 0 {
            return Err(Error::InvalidConfig("poisson_attempts must be > 0".into()));
        }

        Ok(())
    }
}

//! Streamline tracing through the vector field.
use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::field::VectorField;
use crate::frame::Frame;
use crate::noise::CoherentNoise;
use crate::style::StyleConfiguration;

/// An ordered polyline produced by one trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Streamline {
    pub points: Vec<Vec2>,
}

impl Streamline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there are enough points to draw a curve.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Direction of travel into vertex `i`, or `None` for the first vertex.
    pub fn heading_into(&self, i: usize) -> Option<f32> {
        if i == 0 || i >= self.points.len() {
            return None;
        }
        Some((self.points[i] - self.points[i - 1]).to_angle())
    }
}

/// Zig-zag rule: the offset is added again when the scaled noise value at `t` is even.
#[inline]
pub(crate) fn zig_zag_turn(noise: &CoherentNoise, t: f32) -> bool {
    ((noise.sample_1d(t) * 1000.0).floor() as u32) % 2 == 0
}

/// Field-following trace with a fixed step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTrace {
    pub steps: usize,
    pub step_length: f32,
    pub zig_zag: bool,
}

impl CurveTrace {
    /// The default angle offset added at every step.
    pub const ANGLE_OFFSET: f32 = FRAC_PI_2;

    /// `floor(5.8 · stroke + 108)` steps (stroke in reference units) of `size / 1000`,
    /// or of `0.2 · stroke + 3` reference units when shapes are drawn.
    pub fn for_style(style: &StyleConfiguration, frame: &Frame) -> Self {
        let stroke = style.stroke_width;
        let steps = (5.8 * stroke / frame.scale + 108.0).floor().max(0.0) as usize;
        let step_length = if style.has_shapes() {
            0.2 * stroke + 3.0 * frame.scale
        } else {
            frame.size / 1000.0
        };
        Self {
            steps,
            step_length,
            zig_zag: style.zig_zag,
        }
    }

    /// Walk from `start`, adding `offset` to every looked-up angle.
    ///
    /// The current point is recorded before each lookup, so a trace that leaves the
    /// field keeps its last point. `curve_index` decorrelates the zig-zag pattern of
    /// different curves.
    pub fn trace(
        &self,
        field: &VectorField,
        noise: &CoherentNoise,
        start: Vec2,
        curve_index: usize,
        offset: f32,
    ) -> Streamline {
        let mut points = Vec::with_capacity(self.steps);
        let mut p = start;
        let phase = (curve_index + 1) as f32;

        for i in 0..self.steps {
            points.push(p);
            let Some(mut angle) = field.angle_at(p) else {
                break;
            };
            angle += offset;
            if self.zig_zag && zig_zag_turn(noise, (i + 1) as f32 * phase) {
                angle += offset;
            }
            p += Vec2::from_angle(angle) * self.step_length;
        }

        Streamline { points }
    }
}

/// Curl-following trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurlTrace {
    pub steps: usize,
    pub step_length: f32,
}

impl CurlTrace {
    /// `floor(stroke + 10)` steps (stroke in reference units) of 5 reference units.
    pub fn for_style(style: &StyleConfiguration, frame: &Frame) -> Self {
        Self {
            steps: (style.stroke_width / frame.scale + 10.0).floor().max(0.0) as usize,
            step_length: 5.0 * frame.scale,
        }
    }

    /// Step along the curl direction until the step count is reached or a
    /// neighbouring cell is missing.
    pub fn trace(&self, field: &VectorField, start: Vec2) -> Streamline {
        let mut points = Vec::with_capacity(self.steps);
        let mut p = start;
        for _ in 0..self.steps {
            points.push(p);
            let Some(dir) = field.curl_at(p) else {
                break;
            };
            p += dir * self.step_length;
        }
        Streamline { points }
    }
}

/// Angle used when tracing against the field direction.
#[inline]
pub(crate) fn reversed(angle: f32) -> f32 {
    angle + PI
}

//! Turns streamlines into draw commands for one style.
use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;

use super::{ColorAssigner, DrawCommand, Surface};
use crate::layout::Streamline;
use crate::palette::{hsb, Hsba};
use crate::style::{ShapeKind, StyleConfiguration};

const BACKGROUND: Hsba = hsb(0, 0, 97);
const SHADOW: Hsba = Hsba::BLACK.with_alpha(0.3);
const BORDER: Hsba = hsb(0, 0, 100).with_alpha(0.4);

/// Paint state plus the surface it writes to.
///
/// Stroke, fill and weight are cached so that a command is only emitted when the
/// value actually changes.
pub(crate) struct Painter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    style: &'a StyleConfiguration,
    colors: ColorAssigner,
    scale: f32,
    stroke: Option<Option<Hsba>>,
    fill: Option<Option<Hsba>>,
    weight: Option<f32>,
    curves: usize,
    shapes: usize,
}

impl<'a, S: Surface + ?Sized> Painter<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        style: &'a StyleConfiguration,
        colors: ColorAssigner,
        scale: f32,
    ) -> Self {
        Self {
            surface,
            style,
            colors,
            scale,
            stroke: None,
            fill: None,
            weight: None,
            curves: 0,
            shapes: 0,
        }
    }

    pub(crate) fn colors(&self) -> &ColorAssigner {
        &self.colors
    }

    /// Colored streamlines painted so far, shadows excluded.
    pub(crate) fn curves(&self) -> usize {
        self.curves
    }

    /// Shapes painted so far, shadows excluded.
    pub(crate) fn shapes(&self) -> usize {
        self.shapes
    }

    pub(crate) fn background(&mut self) {
        self.surface.draw(DrawCommand::Background(BACKGROUND));
        self.set_weight(self.style.stroke_width);
    }

    pub(crate) fn texture_overlay(&mut self, amount: f32, seed: u64) {
        self.surface
            .draw(DrawCommand::TextureOverlay { amount, seed });
    }

    /// Draw `line` translated by `offset` in translucent black.
    pub(crate) fn shadow(&mut self, line: &Streamline, offset: Vec2) {
        if self.style.filled || self.style.has_shapes() {
            self.set_fill(Some(SHADOW));
            self.set_stroke(None);
        } else {
            self.set_fill(None);
            self.set_stroke(Some(SHADOW));
        }

        if self.style.has_shapes() {
            self.set_weight(self.scale);
            for i in 0..line.len() {
                self.emit_shape(line, i, offset);
            }
        } else if line.is_drawable() {
            self.set_weight(self.style.stroke_width);
            let points = line.points.iter().map(|p| *p + offset).collect();
            self.surface.draw(DrawCommand::Curve { points });
        }
    }

    /// Draw `line` in `base`. With per-shape coloring every shape picks its own color.
    pub(crate) fn streamline(
        &mut self,
        rng: &mut dyn Rng,
        line: &Streamline,
        base: Hsba,
        index: usize,
    ) {
        self.apply_color(base);

        if self.style.has_shapes() {
            let mut drawn = 0;
            for i in 0..line.len() {
                if self.style.color_per_shape {
                    let c = self.colors.pick(rng, line.points[i], index);
                    self.apply_color(c);
                }
                self.set_weight(self.scale);
                if self.emit_shape(line, i, Vec2::ZERO) {
                    drawn += 1;
                }
            }
            if drawn > 0 {
                self.shapes += drawn;
                self.curves += 1;
            }
        } else if line.is_drawable() {
            self.set_weight(self.style.stroke_width);
            self.surface.draw(DrawCommand::Curve {
                points: line.points.clone(),
            });
            self.curves += 1;
        }
    }

    /// Stroke/fill rules for a curve or shape color.
    fn apply_color(&mut self, c: Hsba) {
        if self.style.filled {
            self.set_fill(Some(c));
            self.set_stroke(None);
        } else {
            self.set_fill(None);
            self.set_stroke(Some(c));
        }
        if self.style.has_shapes() {
            self.set_fill(Some(c));
            if self.style.bordered {
                self.set_stroke(Some(BORDER));
            } else {
                self.set_stroke(None);
            }
        }
    }

    /// Circles go on every vertex; squares skip the first one.
    fn emit_shape(&mut self, line: &Streamline, i: usize, offset: Vec2) -> bool {
        let size = self.style.stroke_width;
        let center = line.points[i] + offset;
        match self.style.shape {
            ShapeKind::None => false,
            ShapeKind::Circle => {
                self.surface.draw(DrawCommand::Circle {
                    center,
                    diameter: size,
                });
                true
            }
            ShapeKind::Square => {
                let Some(heading) = line.heading_into(i) else {
                    return false;
                };
                let rotation = if self.style.rotated_squares {
                    heading + FRAC_PI_4
                } else {
                    0.0
                };
                self.surface.draw(DrawCommand::Square {
                    center,
                    size,
                    rotation,
                });
                true
            }
        }
    }

    fn set_stroke(&mut self, c: Option<Hsba>) {
        if self.stroke != Some(c) {
            self.stroke = Some(c);
            self.surface.draw(DrawCommand::Stroke(c));
        }
    }

    fn set_fill(&mut self, c: Option<Hsba>) {
        if self.fill != Some(c) {
            self.fill = Some(c);
            self.surface.draw(DrawCommand::Fill(c));
        }
    }

    fn set_weight(&mut self, w: f32) {
        if self.weight != Some(w) {
            self.weight = Some(w);
            self.surface.draw(DrawCommand::StrokeWeight(w));
        }
    }
}

//! Evenly spaced streamlines.
//!
//! Curves grow from a queue of seed points. Each popped point spawns candidate seeds
//! one separation away on both sides, perpendicular to the field. A candidate that
//! is on screen and clear of earlier curves is traced in both directions until the
//! trace comes too close to an earlier curve or leaves the field. Long enough curves
//! are drawn, their points are recorded, and every other step along them becomes a
//! new queued seed.
use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use super::collision::CollisionGrid;
use super::trace::{reversed, zig_zag_turn, CurveTrace, Streamline};
use crate::config::SigilConfig;
use crate::field::VectorField;
use crate::frame::Frame;
use crate::noise::CoherentNoise;
use crate::paint::painter::Painter;
use crate::paint::Surface;
use crate::random::{rand_index, remap};
use crate::sigil::GeneratorState;
use crate::style::{ColorStyle, StyleConfiguration};

/// Parameters of one spaced layout run, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacedLayout {
    /// Distance between a curve and the seeds it spawns.
    pub separation: f32,
    /// Traces stop before coming closer than this to an earlier curve.
    pub min_distance: f32,
    pub step_length: f32,
    pub min_curve_length: f32,
    pub seed_every: usize,
    /// Cap on queue pops.
    pub max_iterations: usize,
    /// Cap on steps per half-curve.
    pub max_trace_steps: usize,
    pub shadow_offset: Vec2,
    pub zig_zag: bool,
}

/// What a spaced run produced.
#[derive(Debug, Clone)]
pub struct SpacedRun {
    /// Queue pops, including points outside the field.
    pub seeds_considered: usize,
    pub curves: usize,
    /// Every point of every accepted curve.
    pub collisions: CollisionGrid,
}

impl SpacedLayout {
    pub fn new(config: &SigilConfig, frame: &Frame, style: &StyleConfiguration) -> Self {
        let s = frame.scale;
        let stroke = style.stroke_width;
        let mut separation = 2.5 * stroke;
        if style.color_style == ColorStyle::Monochrome {
            separation *= 2.0;
        }
        let (min, max) = config.stroke_range;
        let shadow = 3.0 * s * remap(stroke, min * s, max * s, 0.8, 1.2);

        Self {
            separation,
            min_distance: separation / 2.0,
            step_length: config.spaced.step_length * s,
            min_curve_length: config.spaced.min_curve_length * s,
            seed_every: config.spaced.seed_every.max(1),
            max_iterations: config.spaced.max_iterations,
            max_trace_steps: config.spaced.max_trace_steps,
            shadow_offset: Vec2::splat(shadow),
            zig_zag: style.zig_zag,
        }
    }

    /// Grow the layout and paint every accepted curve. Returns the queue pops.
    pub(crate) fn run<S: Surface + ?Sized>(
        &self,
        state: &GeneratorState,
        rng: &mut dyn Rng,
        painter: &mut Painter<'_, S>,
    ) -> usize {
        let shadow = state.style.shadow;
        let run = self.grow(
            &state.frame,
            &state.field,
            &state.noise,
            rng,
            |rng, line, seed, index| {
                if shadow {
                    painter.shadow(line, self.shadow_offset);
                }
                let color = painter.colors().pick(rng, seed, index);
                painter.streamline(rng, line, color, index);
            },
        );
        debug!(
            pops = run.seeds_considered,
            curves = run.curves,
            points = run.collisions.len(),
            "Spaced layout finished."
        );
        run.seeds_considered
    }

    /// Grow curves over the visible canvas, handing each accepted one to `on_curve`
    /// together with its seed and curve index.
    pub fn grow<F>(
        &self,
        frame: &Frame,
        field: &VectorField,
        noise: &CoherentNoise,
        rng: &mut dyn Rng,
        mut on_curve: F,
    ) -> SpacedRun
    where
        F: FnMut(&mut dyn Rng, &Streamline, Vec2, usize),
    {
        let mut collisions = CollisionGrid::new(frame.size, self.separation, self.min_distance);
        let mut queue = vec![frame.center()];
        let mut pops = 0;
        let mut curves = 0;
        let mut curve_index = 0;

        while !queue.is_empty() && pops < self.max_iterations {
            let p = queue.swap_remove(rand_index(rng, queue.len()));
            pops += 1;

            let Some(angle) = field.angle_at(p) else {
                continue;
            };

            for sign in [1.0, -1.0] {
                let seed = p + Vec2::from_angle(angle + sign * FRAC_PI_2) * self.separation;
                if !(frame.inside_screen(seed) && collisions.is_clear(seed)) {
                    continue;
                }
                let Some((line, spawned)) =
                    self.grow_curve(frame, field, noise, &collisions, seed, curve_index)
                else {
                    continue;
                };

                on_curve(&mut *rng, &line, seed, curve_index);
                curves += 1;

                queue.extend(
                    spawned
                        .into_iter()
                        .filter(|q| frame.inside_screen(*q) && collisions.is_clear(*q)),
                );
                for q in &line.points {
                    collisions.insert(*q);
                }
            }
            curve_index += 1;
        }

        SpacedRun {
            seeds_considered: pops,
            curves,
            collisions,
        }
    }

    /// Both halves from `seed`, merged as reversed backward + seed + forward.
    /// `None` when the merged curve is too short.
    fn grow_curve(
        &self,
        frame: &Frame,
        field: &VectorField,
        noise: &CoherentNoise,
        collisions: &CollisionGrid,
        seed: Vec2,
        curve_index: usize,
    ) -> Option<(Streamline, Vec<Vec2>)> {
        let (mut spawned, forward) =
            self.trace_half(frame, field, noise, collisions, seed, curve_index, false);
        let (backward_spawned, backward) =
            self.trace_half(frame, field, noise, collisions, seed, curve_index, true);

        let mut points = Vec::with_capacity(backward.len() + forward.len() + 1);
        points.extend(backward.iter().rev());
        points.push(seed);
        points.extend(forward);

        let length = (points.len() - 1) as f32 * self.step_length;
        if length < self.min_curve_length {
            return None;
        }

        spawned.extend(backward_spawned);
        Some((Streamline { points }, spawned))
    }

    /// Step from `seed` while the current point is clear. The seed itself is not part
    /// of the returned points but may be among the spawned seeds.
    #[allow(clippy::too_many_arguments)]
    fn trace_half(
        &self,
        frame: &Frame,
        field: &VectorField,
        noise: &CoherentNoise,
        collisions: &CollisionGrid,
        seed: Vec2,
        curve_index: usize,
        backwards: bool,
    ) -> (Vec<Vec2>, Vec<Vec2>) {
        let mut spawned = Vec::new();
        let mut points = Vec::new();
        let mut p = seed;
        let phase = (curve_index + 1) as f32;

        for t in 0..self.max_trace_steps {
            if !collisions.is_clear(p) {
                break;
            }
            if t % self.seed_every == 0 && frame.inside_screen(p) {
                spawned.push(p);
            }
            let Some(mut angle) = field.angle_at(p) else {
                break;
            };
            if t > 0 {
                points.push(p);
            }
            if backwards {
                angle = reversed(angle);
            }
            if self.zig_zag && zig_zag_turn(noise, t as f32 * phase) {
                angle += CurveTrace::ANGLE_OFFSET;
            }
            p += Vec2::from_angle(angle) * self.step_length;
        }

        (spawned, points)
    }
}

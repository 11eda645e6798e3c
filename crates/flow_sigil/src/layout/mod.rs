//! Curve layouts: where curves start and how they are traced.
//!
//! Grid, random and Poisson layouts ask a [`PositionSampling`] strategy for every
//! seed point up front, then trace one curve per seed in the returned order. The
//! spaced layout grows curves one at a time, keeping them apart with a
//! [`CollisionGrid`].
use std::fmt;

use glam::Vec2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::Bounds;
use crate::paint::painter::Painter;
use crate::paint::Surface;
use crate::random::{coin, rand_index, remap};
use crate::sampling::{
    LatticeSampling, PoissonDiskSampling, PositionSampling, UniformRandomSampling,
};
use crate::sigil::GeneratorState;
use crate::style::ColorStyle;

pub mod collision;
pub mod spaced;
pub mod trace;

pub use collision::CollisionGrid;
pub use spaced::SpacedLayout;
pub use trace::{CurlTrace, CurveTrace, Streamline};

/// The four curve layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutStrategy {
    /// One curve per point of a regular lattice over the virtual canvas.
    Grid,
    /// Curves from uniformly random points of the virtual canvas.
    Random,
    /// Curves from a Poisson-disc point set over the visible canvas.
    Poisson,
    /// Evenly spaced, non-overlapping streamlines.
    Spaced,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 4] = [
        LayoutStrategy::Grid,
        LayoutStrategy::Random,
        LayoutStrategy::Poisson,
        LayoutStrategy::Spaced,
    ];

    /// Uniform choice over [`LayoutStrategy::ALL`].
    pub fn select(rng: &mut dyn Rng) -> Self {
        Self::ALL[rand_index(rng, Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::Random => "random",
            LayoutStrategy::Poisson => "poisson",
            LayoutStrategy::Spaced => "spaced",
        }
    }

    /// The seed sampler and its domain, for the sampler-driven layouts.
    pub fn sampler(&self, state: &GeneratorState) -> Option<(Box<dyn PositionSampling>, Bounds)> {
        let cfg = &state.config;
        let frame = &state.frame;
        let s = frame.scale;
        let stroke = state.style.stroke_width;
        let (min, max) = cfg.stroke_range;

        match self {
            LayoutStrategy::Grid => {
                let floor = if state.style.color_style == ColorStyle::Monochrome {
                    15.0
                } else {
                    5.0
                };
                let spacing = remap(stroke, min * s, max * s, 5.0 * s, 50.0 * s).max(floor * s);
                Some((
                    Box::new(LatticeSampling::new(spacing)),
                    frame.virtual_bounds,
                ))
            }
            LayoutStrategy::Random => {
                let count = remap(stroke / s, max, min, 200.0, 2000.0).max(0.0) as usize;
                Some((
                    Box::new(UniformRandomSampling::new(count)),
                    frame.virtual_bounds,
                ))
            }
            LayoutStrategy::Poisson => {
                let radius = remap(stroke, min * s, max * s, 20.0 * s, 100.0 * s);
                Some((
                    Box::new(PoissonDiskSampling::new(radius, cfg.poisson_attempts)),
                    frame.screen(),
                ))
            }
            LayoutStrategy::Spaced => None,
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run the state's layout into `painter`. Returns the number of seed points considered.
pub(crate) fn render<S: Surface + ?Sized>(
    state: &GeneratorState,
    rng: &mut dyn Rng,
    painter: &mut Painter<'_, S>,
) -> usize {
    match state.layout.sampler(state) {
        Some((sampler, domain)) => {
            let seeds = sampler.generate(domain, rng);
            debug!(layout = %state.layout, seeds = seeds.len(), "Seed points sampled.");
            trace_seeds(state, &seeds, rng, painter);
            seeds.len()
        }
        None => SpacedLayout::new(&state.config, &state.frame, &state.style).run(state, rng, painter),
    }
}

/// One curve per seed, in order. The seed's position in `seeds` is its curve index.
fn trace_seeds<S: Surface + ?Sized>(
    state: &GeneratorState,
    seeds: &[Vec2],
    rng: &mut dyn Rng,
    painter: &mut Painter<'_, S>,
) {
    let style = &state.style;

    if style.curl {
        let curl = CurlTrace::for_style(style, &state.frame);
        for (i, &seed) in seeds.iter().enumerate() {
            let color = painter.colors().pick(rng, seed, i);
            let line = curl.trace(&state.field, seed);
            painter.streamline(rng, &line, color, i);
        }
        return;
    }

    let curve = CurveTrace::for_style(style, &state.frame);
    let shadow = style.shadow.then(|| Vec2::splat(3.0 * state.frame.scale));
    for (i, &seed) in seeds.iter().enumerate() {
        // The coin is drawn for every seed so the stream does not depend on `crossed`.
        let doubled = coin(rng, 0.5) && style.crossed;
        let offset = if doubled {
            2.0 * CurveTrace::ANGLE_OFFSET
        } else {
            CurveTrace::ANGLE_OFFSET
        };
        let color = painter.colors().pick(rng, seed, i);
        let line = curve.trace(&state.field, &state.noise, seed, i, offset);
        if let Some(shadow) = shadow {
            painter.shadow(&line, shadow);
        }
        painter.streamline(rng, &line, color, i);
    }
}

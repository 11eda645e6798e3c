//! Regular lattice position sampling strategy.
use glam::Vec2;
use rand::Rng;
use tracing::warn;

use crate::frame::Bounds;
use crate::sampling::PositionSampling;

/// Points on a square lattice anchored at the domain's minimum corner.
///
/// Points are emitted column by column: `x` outer, `y` inner.
#[derive(Debug, Clone)]
pub struct LatticeSampling {
    /// Distance between neighbouring lattice points.
    pub spacing: f32,
}

impl LatticeSampling {
    pub fn new(spacing: f32) -> Self {
        Self { spacing }
    }
}

impl PositionSampling for LatticeSampling {
    fn generate(&self, domain: Bounds, _rng: &mut dyn Rng) -> Vec<Vec2> {
        if domain.is_empty() {
            return Vec::new();
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            warn!("Lattice spacing {} is not positive; no points.", self.spacing);
            return Vec::new();
        }

        let extent = domain.extent();
        let cols = (extent.x / self.spacing).ceil() as usize;
        let rows = (extent.y / self.spacing).ceil() as usize;

        let mut points = Vec::with_capacity(cols * rows);
        for i in 0..cols {
            let x = domain.min.x + i as f32 * self.spacing;
            if x >= domain.max.x {
                break;
            }
            for j in 0..rows {
                let y = domain.min.y + j as f32 * self.spacing;
                if y >= domain.max.y {
                    break;
                }
                points.push(Vec2::new(x, y));
            }
        }

        points
    }
}

//! Poisson disk position sampling strategy.
use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use rand::Rng;
use tracing::warn;

use crate::field::CellGrid;
use crate::frame::Bounds;
use crate::random::{rand01, rand_index};
use crate::sampling::PositionSampling;

/// Poisson disk sampling strategy (Bridson).
///
/// Growth starts from the domain center, which is always part of the output.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub radius: f32,
    /// Candidates tried around an active point before it is retired.
    pub attempts: usize,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain: Bounds, rng: &mut dyn Rng) -> Vec<Vec2> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            warn!("Poisson radius {} is not positive; no points.", self.radius);
            return Vec::new();
        }
        if domain.is_empty() {
            return Vec::new();
        }

        let mut sampler = PoissonDiskSampler::new(self.radius, domain);
        sampler.generate(rng, self.attempts.max(1))
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius and attempt count.
    pub fn new(radius: f32, attempts: usize) -> Self {
        Self { radius, attempts }
    }
}

struct PoissonDiskSampler {
    radius_squared: f32,
    radius: f32,
    domain: Bounds,
    grid: CellGrid,
    cells: Vec<Option<Vec2>>,
    active: Vec<Vec2>,
}

impl PoissonDiskSampler {
    fn new(radius: f32, domain: Bounds) -> Self {
        debug_assert!(radius > 0.0);
        let cell_size = radius / SQRT_2;
        let extent = domain.extent();
        let width = (extent.x / cell_size).ceil() as usize + 1;
        let height = (extent.y / cell_size).ceil() as usize + 1;
        let grid = CellGrid::new(domain.min, cell_size, width, height, 0);

        Self {
            radius_squared: radius * radius,
            radius,
            domain,
            cells: vec![None; grid.len()],
            grid,
            active: Vec::new(),
        }
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if !self.domain.contains(point) {
            return false;
        }
        // One point per cell.
        let Some((px, py)) = self.grid.cell_of(point) else {
            return false;
        };
        if self.cells[self.grid.flat(px, py)].is_some() {
            return false;
        }

        // Cells are r/√2 wide, so a ±2 neighbourhood covers every point closer than r.
        let (gx, gy) = self.grid.world_to_index(point);
        for iy in gy - 2..=gy + 2 {
            for ix in gx - 2..=gx + 2 {
                let Some((cx, cy)) = self.grid.checked(ix, iy) else {
                    continue;
                };
                if let Some(existing) = self.cells[self.grid.flat(cx, cy)] {
                    if existing.distance_squared(point) < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec2) {
        if let Some((cx, cy)) = self.grid.cell_of(point) {
            let idx = self.grid.flat(cx, cy);
            self.cells[idx] = Some(point);
        }
        self.active.push(point);
    }

    fn candidate_around(&self, rng: &mut dyn Rng, point: Vec2) -> Vec2 {
        let angle = rand01(rng) * TAU;
        let distance = self.radius + rand01(rng) * self.radius;
        point + Vec2::from_angle(angle) * distance
    }

    fn generate(&mut self, rng: &mut dyn Rng, attempts: usize) -> Vec<Vec2> {
        let initial = self.domain.center();
        self.add_point(initial);
        let mut points = vec![initial];

        while !self.active.is_empty() {
            let idx = rand_index(rng, self.active.len());
            let origin = self.active[idx];

            let mut found = None;
            for _ in 0..attempts {
                let candidate = self.candidate_around(rng, origin);
                if self.is_valid_point(candidate) {
                    found = Some(candidate);
                    break;
                }
            }

            match found {
                Some(p) => {
                    self.add_point(p);
                    points.push(p);
                }
                None => {
                    self.active.remove(idx);
                }
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::ChaCha8Rng;
    use rand::SeedableRng;

    use super::*;

    fn pairwise_min_distance(points: &[Vec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min(points[i].distance(points[j]));
            }
        }
        min
    }

    fn square(side: f32) -> Bounds {
        Bounds::new(Vec2::ZERO, Vec2::splat(side))
    }

    #[test]
    fn sampler_initializes_grid_dimensions() {
        let sampler = PoissonDiskSampler::new(0.5, Bounds::new(Vec2::ZERO, Vec2::new(2.0, 1.0)));
        let cell = 0.5 / SQRT_2;
        assert_eq!(sampler.grid.width, ((2.0 / cell).ceil() as usize) + 1);
        assert_eq!(sampler.grid.height, ((1.0 / cell).ceil() as usize) + 1);
        assert_eq!(sampler.cells.len(), sampler.grid.len());
    }

    #[test]
    fn is_valid_point_rejects_close_neighbors() {
        let mut sampler = PoissonDiskSampler::new(1.0, square(4.0));
        sampler.add_point(Vec2::splat(2.0));

        assert!(!sampler.is_valid_point(Vec2::new(2.5, 2.0)));
        assert!(sampler.is_valid_point(Vec2::new(3.5, 3.5)));
        assert!(!sampler.is_valid_point(Vec2::new(-0.1, 1.0)));
    }

    #[test]
    fn occupied_cell_rejects_candidate_at_full_radius() {
        let mut sampler = PoissonDiskSampler::new(1.0, square(4.0));
        let candidate = Vec2::new(2.1, 2.1);
        let (cx, cy) = sampler.grid.cell_of(candidate).unwrap();
        let idx = sampler.grid.flat(cx, cy);

        sampler.cells[idx] = Some(candidate - Vec2::new(1.0, 0.0));
        assert!(!sampler.is_valid_point(candidate));

        sampler.cells[idx] = None;
        assert!(sampler.is_valid_point(candidate));
    }

    #[test]
    fn every_point_owns_its_cell() {
        let domain = square(120.0);
        let radius = 6.0;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = PoissonDiskSampling::new(radius, 30).generate(domain, &mut rng);
        let sampler = PoissonDiskSampler::new(radius, domain);
        let mut cells: Vec<_> = points
            .iter()
            .map(|p| sampler.grid.cell_of(*p).unwrap())
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), points.len());
    }

    #[test]
    fn generated_points_respect_radius_constraint() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let domain = square(100.0);
        let points = PoissonDiskSampling::new(8.0, 30).generate(domain, &mut rng);

        assert!(points.len() > 50);
        assert_eq!(points[0], domain.center());
        assert!(points.iter().all(|p| domain.contains(*p)));
        assert!(pairwise_min_distance(&points) >= 8.0 - 1e-4);
    }

    #[test]
    fn same_seed_same_points() {
        let sampling = PoissonDiskSampling::new(10.0, 30);
        let a = sampling.generate(square(200.0), &mut ChaCha8Rng::seed_from_u64(3));
        let b = sampling.generate(square(200.0), &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn non_positive_radius_returns_no_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(PoissonDiskSampling::new(0.0, 30)
            .generate(square(1.0), &mut rng)
            .is_empty());
        assert!(PoissonDiskSampling::new(-3.0, 30)
            .generate(square(1.0), &mut rng)
            .is_empty());
    }
}

//! Seed-point sampling strategies over a rectangular domain.
//!
//! The grid, uniform-random and Poisson-disc layouts decide where curves start by
//! asking one of these samplers for points, then trace a curve from each point in the
//! returned order.
use glam::Vec2;
use rand::Rng;

use crate::frame::Bounds;

pub mod lattice;
pub mod poisson_disk;
pub mod uniform_random;

pub use lattice::LatticeSampling;
pub use poisson_disk::PoissonDiskSampling;
pub use uniform_random::UniformRandomSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain: Bounds, rng: &mut dyn Rng) -> Vec<Vec2>;
}

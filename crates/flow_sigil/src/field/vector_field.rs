//! The angle field that curves are traced through.
use std::f32::consts::TAU;

use glam::Vec2;

use super::grid::CellGrid;
use crate::frame::Frame;
use crate::noise::CoherentNoise;

/// A grid of direction angles in radians, `[0, 2π)`, covering the virtual canvas.
///
/// Built once per sigil and never mutated. Lookups outside the grid return `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    grid: CellGrid,
    angles: Vec<f32>,
}

impl VectorField {
    /// Sample `noise` at `(col, row) · noise_scale` for every cell and map the value to
    /// an angle. With `angle_step`, angles are floored to a multiple of the step.
    pub fn from_noise(
        frame: &Frame,
        noise: &CoherentNoise,
        noise_scale: f32,
        angle_step: Option<f32>,
    ) -> Self {
        let bounds = frame.virtual_bounds;
        let extent = bounds.extent();
        let columns = (extent.x / frame.resolution).round().max(1.0) as usize;
        let rows = (extent.y / frame.resolution).round().max(1.0) as usize;
        let grid = CellGrid::new(bounds.min, frame.resolution, columns, rows, 0);

        let mut angles = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for col in 0..columns {
                let value = noise.sample(col as f32 * noise_scale, row as f32 * noise_scale);
                let mut angle = value * TAU;
                if let Some(step) = angle_step {
                    angle = (angle / step).floor() * step;
                }
                angles.push(angle.rem_euclid(TAU));
            }
        }

        Self { grid, angles }
    }

    /// Build a field from explicit angles in row-major order.
    pub fn from_angles(grid: CellGrid, angles: Vec<f32>) -> Self {
        assert_eq!(grid.halo, 0, "vector fields carry no halo");
        assert_eq!(grid.len(), angles.len(), "angle count must match the grid");
        Self { grid, angles }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn num_columns(&self) -> usize {
        self.grid.width
    }

    pub fn num_rows(&self) -> usize {
        self.grid.height
    }

    pub fn resolution(&self) -> f32 {
        self.grid.cell_size
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Angle of a cell by signed index.
    pub fn angle(&self, col: isize, row: isize) -> Option<f32> {
        let (c, r) = self.grid.checked(col, row)?;
        Some(self.angles[self.grid.flat(c, r)])
    }

    /// The cell enclosing `p`.
    pub fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        self.grid.cell_of(p)
    }

    /// Angle of the cell enclosing `p`, without interpolation.
    pub fn angle_at(&self, p: Vec2) -> Option<f32> {
        let (c, r) = self.grid.cell_of(p)?;
        Some(self.angles[self.grid.flat(c, r)])
    }

    /// Unit direction perpendicular to the local angle gradient at `p`.
    ///
    /// The gradient uses central differences over the four neighbouring cells; `None`
    /// when any neighbour is outside the field or the gradient vanishes.
    pub fn curl_at(&self, p: Vec2) -> Option<Vec2> {
        let (col, row) = self.grid.world_to_index(p);
        let h = 2.0 * self.grid.cell_size;

        let dx = (self.angle(col + 1, row)? - self.angle(col - 1, row)?) / h;
        let dy = (self.angle(col, row + 1)? - self.angle(col, row - 1)?) / h;

        let gradient = Vec2::new(dx, dy).try_normalize()?;
        Some(Vec2::new(gradient.y, -gradient.x))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::ChaCha8Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::SigilConfig;
    use crate::noise::NoiseDetail;

    fn field(step: Option<f32>) -> (Frame, VectorField) {
        let frame = Frame::from_config(&SigilConfig::new(800));
        let noise = CoherentNoise::new(&mut ChaCha8Rng::seed_from_u64(17), NoiseDetail::default());
        let field = VectorField::from_noise(&frame, &noise, 0.005, step);
        (frame, field)
    }

    #[test]
    fn reference_field_has_hundred_cells_per_side() {
        let (_, field) = field(None);
        assert_eq!(field.num_columns(), 100);
        assert_eq!(field.num_rows(), 100);
        assert_eq!(field.angles().len(), 10_000);
    }

    #[test]
    fn angles_are_in_range() {
        let (_, field) = field(None);
        assert!(field.angles().iter().all(|a| (0.0..TAU).contains(a)));
    }

    #[test]
    fn quantized_angles_are_step_multiples() {
        let step = std::f32::consts::PI / 4.0;
        let (_, field) = field(Some(step));
        for a in field.angles() {
            let k = a / step;
            assert!((k - k.round()).abs() < 1e-4, "{a} is not a multiple of {step}");
        }
    }

    #[test]
    fn every_in_range_cell_is_addressable() {
        let (_, field) = field(None);
        for col in 0..field.num_columns() as isize {
            for row in 0..field.num_rows() as isize {
                assert!(field.angle(col, row).is_some());
            }
        }
        assert!(field.angle(-1, 0).is_none());
        assert!(field.angle(0, field.num_rows() as isize).is_none());
    }

    #[test]
    fn lookups_outside_the_virtual_canvas_miss() {
        let (frame, field) = field(None);
        assert!(field.angle_at(frame.virtual_bounds.min - Vec2::ONE).is_none());
        assert!(field.angle_at(frame.virtual_bounds.max).is_none());
        assert!(field.angle_at(frame.center()).is_some());
        assert_eq!(field.angle_at(frame.virtual_bounds.min), field.angle(0, 0));
    }

    #[test]
    fn curl_needs_all_four_neighbours() {
        let (frame, field) = field(None);
        let corner = frame.virtual_bounds.min + Vec2::splat(0.5);
        assert!(field.curl_at(corner).is_none());
    }

    #[test]
    fn curl_of_a_linear_ramp_is_perpendicular() {
        let grid = CellGrid::new(Vec2::ZERO, 1.0, 5, 5, 0);
        let angles = (0..25).map(|i| (i % 5) as f32 * 0.1).collect();
        let field = VectorField::from_angles(grid, angles);
        let dir = field.curl_at(Vec2::new(2.5, 2.5)).unwrap();
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn flat_field_has_no_curl() {
        let grid = CellGrid::new(Vec2::ZERO, 1.0, 3, 3, 0);
        let field = VectorField::from_angles(grid, vec![1.0; 9]);
        assert!(field.curl_at(Vec2::new(1.5, 1.5)).is_none());
    }
}

//! Uniform cell grids over a 2D domain.
//!
//! [`CellGrid`] maps world positions to integer cells, optionally with a halo ring of
//! padding cells on every side. It backs the vector field, the collision grid of the
//! evenly-spaced layout and the Poisson-disc accelerator.
use glam::Vec2;

/// A 2D grid of square cells with an optional halo.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    /// World-space position of the first non-halo cell's corner.
    pub origin: Vec2,
    /// Cell edge length in world units.
    pub cell_size: f32,
    /// Number of cells in X, excluding halo.
    pub width: usize,
    /// Number of cells in Y, excluding halo.
    pub height: usize,
    /// Halo cell count on each side.
    pub halo: usize,
}

impl CellGrid {
    pub fn new(origin: Vec2, cell_size: f32, width: usize, height: usize, halo: usize) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        Self {
            origin,
            cell_size,
            width,
            height,
            halo,
        }
    }

    /// Total width including halo regions.
    pub fn total_width(&self) -> usize {
        self.width + 2 * self.halo
    }

    /// Total height including halo regions.
    pub fn total_height(&self) -> usize {
        self.height + 2 * self.halo
    }

    /// Number of cells including halo.
    pub fn len(&self) -> usize {
        self.total_width() * self.total_height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts a world position to signed cell indices, accounting for halo.
    pub fn world_to_index(&self, p: Vec2) -> (isize, isize) {
        let px = (p.x - self.origin.x) / self.cell_size + self.halo as f32;
        let py = (p.y - self.origin.y) / self.cell_size + self.halo as f32;
        (px.floor() as isize, py.floor() as isize)
    }

    /// Converts cell indices back to the world position of the cell's corner.
    pub fn index_to_world(&self, ix: isize, iy: isize) -> Vec2 {
        Vec2::new(
            self.origin.x + (ix as f32 - self.halo as f32) * self.cell_size,
            self.origin.y + (iy as f32 - self.halo as f32) * self.cell_size,
        )
    }

    /// Returns the cell indices if they lie inside the grid (halo included).
    pub fn checked(&self, ix: isize, iy: isize) -> Option<(usize, usize)> {
        if ix < 0 || iy < 0 || ix >= self.total_width() as isize || iy >= self.total_height() as isize
        {
            return None;
        }
        Some((ix as usize, iy as usize))
    }

    /// The cell containing `p`, or `None` outside the grid.
    pub fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        let (ix, iy) = self.world_to_index(p);
        self.checked(ix, iy)
    }

    /// Row-major flat index of an in-range cell.
    #[inline]
    pub fn flat(&self, ix: usize, iy: usize) -> usize {
        iy * self.total_width() + ix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> CellGrid {
        CellGrid::new(Vec2::new(-5.0, -5.0), 1.0, 4, 3, 1)
    }

    #[test]
    fn total_dimensions_include_halo() {
        let grid = sample_grid();
        assert_eq!(grid.total_width(), 6);
        assert_eq!(grid.total_height(), 5);
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn world_index_roundtrip() {
        let grid = sample_grid();
        let (ix, iy) = grid.world_to_index(Vec2::new(-5.0, -5.0));
        assert_eq!((ix, iy), (1, 1));
        assert_eq!(grid.index_to_world(ix, iy), Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn halo_cells_are_addressable_but_beyond_is_not() {
        let grid = sample_grid();
        assert_eq!(grid.cell_of(Vec2::new(-5.5, -5.5)), Some((0, 0)));
        assert_eq!(grid.cell_of(Vec2::new(-6.5, -5.0)), None);
        assert_eq!(grid.cell_of(Vec2::new(-1.0, -2.0)), Some((5, 4)));
        assert_eq!(grid.cell_of(Vec2::new(0.0, -2.0)), None);
    }

    #[test]
    fn flat_index_is_row_major() {
        let grid = sample_grid();
        assert_eq!(grid.flat(0, 0), 0);
        assert_eq!(grid.flat(5, 0), 5);
        assert_eq!(grid.flat(0, 1), 6);
    }
}

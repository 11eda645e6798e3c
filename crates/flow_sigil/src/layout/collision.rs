//! Spatial buckets of already drawn points, used to keep curves apart.
use glam::Vec2;

use crate::field::CellGrid;

/// A grid of point buckets over `[0, extent)²` with one padding ring of cells.
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    grid: CellGrid,
    buckets: Vec<Vec<Vec2>>,
    min_distance: f32,
    reach: isize,
    len: usize,
}

impl CollisionGrid {
    /// Buckets of edge `cell_size` covering a square canvas of edge `extent`.
    pub fn new(extent: f32, cell_size: f32, min_distance: f32) -> Self {
        let cells = (extent / cell_size).ceil().max(1.0) as usize;
        let grid = CellGrid::new(Vec2::ZERO, cell_size, cells, cells, 1);
        let reach = (min_distance / cell_size).ceil() as isize * 2;
        Self {
            buckets: vec![Vec::new(); grid.len()],
            grid,
            min_distance,
            reach,
            len: 0,
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `p` lies on the grid and no stored point is closer than the minimum
    /// distance.
    pub fn is_clear(&self, p: Vec2) -> bool {
        let (cx, cy) = self.grid.world_to_index(p);
        if self.grid.checked(cx, cy).is_none() {
            return false;
        }

        let min_sq = self.min_distance * self.min_distance;
        for iy in cy - self.reach..=cy + self.reach {
            for ix in cx - self.reach..=cx + self.reach {
                let Some((x, y)) = self.grid.checked(ix, iy) else {
                    continue;
                };
                if self.buckets[self.grid.flat(x, y)]
                    .iter()
                    .any(|q| q.distance_squared(p) < min_sq)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Store `p`. Points off the grid are dropped and `false` is returned.
    pub fn insert(&mut self, p: Vec2) -> bool {
        let Some((x, y)) = self.grid.cell_of(p) else {
            return false;
        };
        let idx = self.grid.flat(x, y);
        self.buckets[idx].push(p);
        self.len += 1;
        true
    }

    /// All stored points, bucket by bucket.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.buckets.iter().flatten().copied()
    }
}

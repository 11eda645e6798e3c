//! Canvas geometry: the visible square and the larger virtual canvas around it.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SigilConfig;

/// Axis-aligned rectangle, inclusive of `min` and exclusive of `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// Pixel-space geometry of one sigil.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Canvas edge length in pixels.
    pub size: f32,
    /// Pixels per reference unit.
    pub scale: f32,
    /// The canvas plus its margin; curves are seeded and traced over this area.
    pub virtual_bounds: Bounds,
    /// Vector-field cell edge in pixels.
    pub resolution: f32,
}

impl Frame {
    pub fn from_config(config: &SigilConfig) -> Self {
        let size = config.size as f32;
        let scale = config.scale();
        let lo = -config.margin * scale;
        let hi = (config.reference_size + config.margin) * scale;
        Self {
            size,
            scale,
            virtual_bounds: Bounds::new(Vec2::splat(lo), Vec2::splat(hi)),
            resolution: config.field_resolution * scale,
        }
    }

    /// The visible canvas `[0, size)²`.
    pub fn screen(&self) -> Bounds {
        Bounds::new(Vec2::ZERO, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size * 0.5)
    }

    /// Strictly inside the visible canvas, with a small scaled tolerance at the edges.
    pub fn inside_screen(&self, p: Vec2) -> bool {
        let eps = 0.001 * self.scale;
        p.x - eps > 0.0 && p.x + eps < self.size && p.y - eps > 0.0 && p.y + eps < self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_frame_matches_constants() {
        let frame = Frame::from_config(&SigilConfig::new(800));
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.virtual_bounds.min, Vec2::splat(-160.0));
        assert_eq!(frame.virtual_bounds.max, Vec2::splat(960.0));
        assert!((frame.resolution - 11.2).abs() < 1e-6);
    }

    #[test]
    fn frame_scales_with_size() {
        let frame = Frame::from_config(&SigilConfig::new(400));
        assert_eq!(frame.scale, 0.5);
        assert_eq!(frame.virtual_bounds.min, Vec2::splat(-80.0));
        assert_eq!(frame.center(), Vec2::splat(200.0));
    }

    #[test]
    fn inside_screen_excludes_edges() {
        let frame = Frame::from_config(&SigilConfig::new(100));
        assert!(frame.inside_screen(Vec2::new(50.0, 50.0)));
        assert!(!frame.inside_screen(Vec2::new(0.0, 50.0)));
        assert!(!frame.inside_screen(Vec2::new(50.0, 100.0)));
        assert!(!frame.inside_screen(Vec2::new(-1.0, 50.0)));
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(Vec2::ZERO, Vec2::splat(2.0));
        assert!(b.contains(Vec2::ZERO));
        assert!(!b.contains(Vec2::new(2.0, 1.0)));
        assert_eq!(b.center(), Vec2::ONE);
        assert!(!b.is_empty());
        assert!(Bounds::new(Vec2::ONE, Vec2::ONE).is_empty());
    }
}

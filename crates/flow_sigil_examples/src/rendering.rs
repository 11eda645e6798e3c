//! A small CPU compositor for flow_sigil draw commands, backed by `image`.
use std::path::Path;

use anyhow::Context;
use flow_sigil::paint::{DrawCommand, Surface};
use flow_sigil::palette::Hsba;
use flow_sigil::prelude::{RenderSummary, SigilConfig};
use flow_sigil::sigil::Sigil;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use rand::rngs::ChaCha8Rng;
use rand::{Rng, SeedableRng};

/// Sub-rows per pixel row for polygon fills, and sub-samples per axis for everything else.
const SUPERSAMPLE: usize = 2;
/// Gray value of the texture layer, on a 0..255 scale.
const TEXTURE_GRAY: f32 = 100.0 / 255.0;
/// Alpha scale of the texture layer: `amount` is out of this.
const TEXTURE_ALPHA_MAX: f32 = 400.0;

/// Install a `tracing` subscriber that honours `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

/// Generate a sigil and write it to `path` as PNG.
pub fn render_sigil_to_png(
    identifier: &str,
    config: SigilConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<RenderSummary> {
    let path = path.as_ref();
    let size = config.size;
    let mut sigil = Sigil::new(identifier, config)?;
    let mut surface = RasterSurface::new(size);
    let summary = sigil.draw(&mut surface)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    surface
        .into_image()
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote sigil.");
    Ok(summary)
}

type Color = [f32; 4];

fn to_color(c: Hsba) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Rasterizes draw commands onto an opaque square canvas.
///
/// Strokes have round joins and caps. Curves are flattened Catmull-Rom splines with
/// duplicated end vertices; filled curves close back to their first point.
pub struct RasterSurface {
    size: usize,
    pixels: Vec<[f32; 3]>,
    stroke: Option<Color>,
    fill: Option<Color>,
    weight: f32,
}

impl RasterSurface {
    pub fn new(size: u32) -> Self {
        let size = size.max(1) as usize;
        Self {
            size,
            pixels: vec![[1.0; 3]; size * size],
            stroke: Some([0.0, 0.0, 0.0, 1.0]),
            fill: Some([1.0, 1.0, 1.0, 1.0]),
            weight: 1.0,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        let size = self.size as u32;
        let mut img = RgbaImage::new(size, size);
        for (i, px) in self.pixels.iter().enumerate() {
            let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            let (x, y) = ((i % self.size) as u32, (i / self.size) as u32);
            img.put_pixel(x, y, Rgba([to_u8(px[0]), to_u8(px[1]), to_u8(px[2]), 255]));
        }
        img
    }

    fn background(&mut self, c: Hsba) {
        let [r, g, b, _] = to_color(c);
        self.pixels.fill([r, g, b]);
    }

    fn curve(&mut self, points: &[Vec2]) {
        if points.len() < 2 {
            return;
        }
        let path = flatten_catmull_rom(points);
        if let Some(fill) = self.fill {
            let mask = Mask::polygon(self.size, &path);
            self.blend(&mask, fill);
        }
        if let Some(stroke) = self.stroke {
            let mask = Mask::polyline(self.size, &path, self.weight * 0.5);
            self.blend(&mask, stroke);
        }
    }

    fn circle(&mut self, center: Vec2, diameter: f32) {
        let r = diameter * 0.5;
        if let Some(fill) = self.fill {
            let mask = Mask::shape(self.size, center, r, |p| p.distance(center) <= r);
            self.blend(&mask, fill);
        }
        if let Some(stroke) = self.stroke {
            let half = self.weight * 0.5;
            let mask = Mask::shape(self.size, center, r + half, |p| {
                (p.distance(center) - r).abs() <= half
            });
            self.blend(&mask, stroke);
        }
    }

    fn square(&mut self, center: Vec2, size: f32, rotation: f32) {
        let half = size * 0.5;
        let inv = Vec2::from_angle(-rotation);
        let local = move |p: Vec2| inv.rotate(p - center).abs();
        let reach = half * std::f32::consts::SQRT_2;

        if let Some(fill) = self.fill {
            let mask = Mask::shape(self.size, center, reach, |p| {
                local(p).max_element() <= half
            });
            self.blend(&mask, fill);
        }
        if let Some(stroke) = self.stroke {
            let w = self.weight * 0.5;
            let mask = Mask::shape(self.size, center, reach + w, |p| {
                (local(p).max_element() - half).abs() <= w
            });
            self.blend(&mask, stroke);
        }
    }

    /// Per-pixel translucent gray layer combined with a color-burn blend.
    fn texture(&mut self, amount: f32, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for px in &mut self.pixels {
            let u = (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32;
            let a = u * amount / TEXTURE_ALPHA_MAX;
            for ch in px.iter_mut() {
                let burned = (1.0 - (1.0 - *ch) / TEXTURE_GRAY).max(0.0);
                *ch = *ch * (1.0 - a) + burned * a;
            }
        }
    }

    fn blend(&mut self, mask: &Mask, color: Color) {
        let alpha = color[3];
        for (row, y) in (mask.y0..mask.y0 + mask.height).enumerate() {
            for (col, x) in (mask.x0..mask.x0 + mask.width).enumerate() {
                let cov = mask.coverage[row * mask.width + col];
                if cov <= 0.0 {
                    continue;
                }
                let a = alpha * cov;
                let px = &mut self.pixels[y * self.size + x];
                for ch in 0..3 {
                    px[ch] = px[ch] * (1.0 - a) + color[ch] * a;
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Background(c) => self.background(c),
            DrawCommand::Stroke(c) => self.stroke = c.map(to_color),
            DrawCommand::Fill(c) => self.fill = c.map(to_color),
            DrawCommand::StrokeWeight(w) => self.weight = w.max(0.0),
            DrawCommand::Curve { points } => self.curve(&points),
            DrawCommand::Circle { center, diameter } => self.circle(center, diameter),
            DrawCommand::Square {
                center,
                size,
                rotation,
            } => self.square(center, size, rotation),
            DrawCommand::TextureOverlay { amount, seed } => self.texture(amount, seed),
            _ => {}
        }
    }
}

/// Sample a Catmull-Rom spline through `points`, ends duplicated.
fn flatten_catmull_rom(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    let at = |i: isize| points[i.clamp(0, n as isize - 1) as usize];
    let mut out = Vec::with_capacity(n * 4);
    out.push(points[0]);

    for i in 0..n - 1 {
        let i = i as isize;
        let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));
        let steps = ((p2 - p1).length() / 2.0).ceil().clamp(1.0, 16.0) as usize;
        for s in 1..=steps {
            let t = s as f32 / steps as f32;
            let (t2, t3) = (t * t, t * t * t);
            let p = 0.5
                * (2.0 * p1
                    + (p2 - p0) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3);
            out.push(p);
        }
    }
    out
}

/// Fractional coverage over a clipped pixel rectangle.
struct Mask {
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl Mask {
    /// Pixel rectangle covering `[min, max]`, clipped to the canvas.
    fn new(canvas: usize, min: Vec2, max: Vec2) -> Self {
        let clip = |v: f32| v.clamp(0.0, canvas as f32) as usize;
        let (x0, y0) = (clip(min.x.floor()), clip(min.y.floor()));
        let (x1, y1) = (clip(max.x.ceil() + 1.0), clip(max.y.ceil() + 1.0));
        let (width, height) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        Self {
            x0,
            y0,
            width,
            height,
            coverage: vec![0.0; width * height],
        }
    }

    /// Supersampled coverage of `inside` around `center`, within `reach`.
    fn shape(canvas: usize, center: Vec2, reach: f32, inside: impl Fn(Vec2) -> bool) -> Self {
        let mut mask = Self::new(canvas, center - Vec2::splat(reach), center + Vec2::splat(reach));
        mask.stamp(0, 0, mask.width, mask.height, &inside);
        mask
    }

    /// Round-capped stroke of `radius` along `path`.
    fn polyline(canvas: usize, path: &[Vec2], radius: f32) -> Self {
        let (lo, hi) = bounds(path);
        let pad = Vec2::splat(radius);
        let mut mask = Self::new(canvas, lo - pad, hi + pad);

        for seg in path.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let min = a.min(b) - pad;
            let max = a.max(b) + pad;
            let to_local = |v: f32, o: usize| (v.floor().max(0.0) as usize).saturating_sub(o);
            let cx0 = to_local(min.x, mask.x0).min(mask.width);
            let cy0 = to_local(min.y, mask.y0).min(mask.height);
            let cx1 = (to_local(max.x, mask.x0) + 2).min(mask.width);
            let cy1 = (to_local(max.y, mask.y0) + 2).min(mask.height);
            mask.stamp(cx0, cy0, cx1, cy1, &|p| distance_to_segment(p, a, b) <= radius);
        }
        mask
    }

    /// Even-odd fill of the closed polygon `path`, with analytic horizontal coverage.
    fn polygon(canvas: usize, path: &[Vec2]) -> Self {
        let (lo, hi) = bounds(path);
        let mut mask = Self::new(canvas, lo, hi);
        let n = path.len();
        let share = 1.0 / SUPERSAMPLE as f32;
        let mut crossings = Vec::new();

        for row in 0..mask.height {
            for sub in 0..SUPERSAMPLE {
                let y = (mask.y0 + row) as f32 + (sub as f32 + 0.5) * share;
                crossings.clear();
                for i in 0..n {
                    let (a, b) = (path[i], path[(i + 1) % n]);
                    if (a.y <= y) != (b.y <= y) {
                        crossings.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
                    }
                }
                crossings.sort_by(f32::total_cmp);

                for span in crossings.chunks_exact(2) {
                    let (sx0, sx1) = (span[0], span[1]);
                    let first = (sx0.floor().max(mask.x0 as f32) as usize).max(mask.x0);
                    let last = (sx1.ceil().max(0.0) as usize).min(mask.x0 + mask.width);
                    for x in first..last {
                        let overlap = (sx1.min(x as f32 + 1.0) - sx0.max(x as f32)).max(0.0);
                        mask.coverage[row * mask.width + (x - mask.x0)] += overlap * share;
                    }
                }
            }
        }
        for c in &mut mask.coverage {
            *c = c.min(1.0);
        }
        mask
    }

    /// Raise coverage inside the local rectangle `[cx0, cx1) × [cy0, cy1)`.
    fn stamp(&mut self, cx0: usize, cy0: usize, cx1: usize, cy1: usize, inside: &dyn Fn(Vec2) -> bool) {
        let share = 1.0 / (SUPERSAMPLE * SUPERSAMPLE) as f32;
        for row in cy0..cy1 {
            for col in cx0..cx1 {
                let base = Vec2::new((self.x0 + col) as f32, (self.y0 + row) as f32);
                let mut hits = 0;
                for sy in 0..SUPERSAMPLE {
                    for sx in 0..SUPERSAMPLE {
                        let offset = Vec2::new(sx as f32 + 0.5, sy as f32 + 0.5) / SUPERSAMPLE as f32;
                        if inside(base + offset) {
                            hits += 1;
                        }
                    }
                }
                let cov = &mut self.coverage[row * self.width + col];
                *cov = cov.max(hits as f32 * share);
            }
        }
    }
}

fn bounds(path: &[Vec2]) -> (Vec2, Vec2) {
    path.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    )
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use flow_sigil::palette::hsb;

    use super::*;

    fn pixel(surface: &RasterSurface, x: usize, y: usize) -> [f32; 3] {
        surface.pixels[y * surface.size + x]
    }

    #[test]
    fn spline_passes_through_every_vertex() {
        let pts = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let path = flatten_catmull_rom(&pts);
        for p in pts {
            assert!(path.iter().any(|q| q.distance(p) < 1e-4));
        }
        assert_eq!(path.first(), Some(&pts[0]));
    }

    #[test]
    fn background_then_filled_circle() {
        let mut s = RasterSurface::new(20);
        s.draw(DrawCommand::Background(hsb(0, 0, 100)));
        s.draw(DrawCommand::Stroke(None));
        s.draw(DrawCommand::Fill(Some(Hsba::BLACK)));
        s.draw(DrawCommand::Circle {
            center: Vec2::splat(10.0),
            diameter: 8.0,
        });
        assert_eq!(pixel(&s, 10, 10), [0.0; 3]);
        assert_eq!(pixel(&s, 1, 1), [1.0; 3]);
    }

    #[test]
    fn stroked_curve_marks_its_path_only() {
        let mut s = RasterSurface::new(32);
        s.draw(DrawCommand::Background(hsb(0, 0, 100)));
        s.draw(DrawCommand::Fill(None));
        s.draw(DrawCommand::Stroke(Some(Hsba::BLACK)));
        s.draw(DrawCommand::StrokeWeight(3.0));
        s.draw(DrawCommand::Curve {
            points: vec![Vec2::new(4.0, 16.0), Vec2::new(28.0, 16.0)],
        });
        assert!(pixel(&s, 16, 15)[0] < 0.1);
        assert_eq!(pixel(&s, 16, 4), [1.0; 3]);
    }

    #[test]
    fn texture_only_darkens() {
        let mut s = RasterSurface::new(8);
        s.draw(DrawCommand::Background(hsb(0, 0, 97)));
        let before = s.pixels.clone();
        s.draw(DrawCommand::TextureOverlay {
            amount: 50.0,
            seed: 3,
        });
        for (a, b) in before.iter().zip(&s.pixels) {
            assert!(b[0] <= a[0]);
        }
    }

    #[test]
    fn same_seed_same_texture() {
        let render = || {
            let mut s = RasterSurface::new(8);
            s.draw(DrawCommand::TextureOverlay {
                amount: 50.0,
                seed: 9,
            });
            s.pixels
        };
        assert_eq!(render(), render());
    }
}

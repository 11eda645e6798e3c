//! Draw commands and the surfaces that receive them.
//!
//! A sigil owns no pixels. Generation emits a stream of [`DrawCommand`]s into a
//! [`Surface`], which may rasterize them, record them, or drop them.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::palette::Hsba;

pub mod color;
pub(crate) mod painter;

pub use color::ColorAssigner;

/// One drawing intent.
///
/// Stroke, fill and weight are sticky: they apply to every following primitive
/// until replaced.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawCommand {
    /// Clear the canvas to a color.
    Background(Hsba),
    /// Outline color, or no outline.
    Stroke(Option<Hsba>),
    /// Interior color, or no fill.
    Fill(Option<Hsba>),
    /// Outline width in pixels.
    StrokeWeight(f32),
    /// A smooth curve through at least two points.
    ///
    /// Compositors interpolate with Catmull-Rom splines, duplicating the first and
    /// last vertex so the curve passes through both ends.
    Curve { points: Vec<Vec2> },
    Circle { center: Vec2, diameter: f32 },
    /// An axis-aligned square of edge `size`, rotated by `rotation` radians around
    /// its center.
    Square { center: Vec2, size: f32, rotation: f32 },
    /// Full-canvas per-pixel translucent texture, darkening the image.
    ///
    /// `amount` is the maximum alpha on a 0..100 scale. `seed` lets a compositor
    /// reproduce the texture exactly; it is free to ignore it.
    TextureOverlay { amount: f32, seed: u64 },
}

/// A receiver of [`DrawCommand`]s.
pub trait Surface {
    fn draw(&mut self, command: DrawCommand);

    fn draw_many<I>(&mut self, commands: I)
    where
        Self: Sized,
        I: IntoIterator<Item = DrawCommand>,
    {
        for c in commands {
            self.draw(c);
        }
    }
}

/// A surface that discards everything.
impl Surface for () {
    #[inline]
    fn draw(&mut self, _command: DrawCommand) {}
}

/// A surface that forwards to a user-provided closure.
pub struct FnSurface<F>
where
    F: FnMut(DrawCommand),
{
    f: F,
}

impl<F> FnSurface<F>
where
    F: FnMut(DrawCommand),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Surface for FnSurface<F>
where
    F: FnMut(DrawCommand),
{
    #[inline]
    fn draw(&mut self, command: DrawCommand) {
        (self.f)(command);
    }
}

/// A surface that records every command in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            commands: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Points of every recorded curve, in drawing order.
    pub fn curves(&self) -> impl Iterator<Item = &[Vec2]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Curve { points } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    #[inline]
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Replay recorded commands into another surface.
pub fn replay<S: Surface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for c in commands {
        surface.draw(c.clone());
    }
}

#![forbid(unsafe_code)]
//! flow_sigil: Deterministic flow-field sigils from UUIDs.
//!
//! The same identifier and canvas size always yield the same drawing, so a user can
//! learn to recognize "their" image and notice a page that cannot reproduce it.
//!
//! Modules:
//! - seed, noise, field: seed derivation, coherent noise and the angle field
//! - style, palette: the per-identifier look
//! - sampling, layout: where curves start and how they are traced
//! - paint: draw commands and surfaces; the crate owns no pixels
//! - sigil: setup and the single draw
//!
//! ```no_run
//! use flow_sigil::prelude::*;
//!
//! let mut commands = CommandBuffer::new();
//! let summary = generate("123e4567-e89b-12d3-a456-426614174000", 800, &mut commands)?;
//! println!("{} curves in the {} layout", summary.curves, summary.layout);
//! # Ok::<(), flow_sigil::error::Error>(())
//! ```
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod layout;
pub mod noise;
pub mod paint;
pub mod palette;
pub(crate) mod random;
pub mod sampling;
pub mod seed;
pub mod sigil;
pub mod style;

/// Convenient re-exports for common types. Import with `use flow_sigil::prelude::*;`.
pub mod prelude {
    pub use crate::config::{SigilConfig, SpacedParams, StyleProbabilities};
    pub use crate::error::{Error, Result};
    pub use crate::field::{CellGrid, VectorField};
    pub use crate::frame::{Bounds, Frame};
    pub use crate::layout::{
        CollisionGrid, CurlTrace, CurveTrace, LayoutStrategy, SpacedLayout, Streamline,
    };
    pub use crate::noise::{CoherentNoise, NoiseDetail};
    pub use crate::paint::{ColorAssigner, CommandBuffer, DrawCommand, FnSurface, Surface};
    pub use crate::palette::{hsb, Hsba, Palette, PALETTES};
    pub use crate::sampling::{
        LatticeSampling, PoissonDiskSampling, PositionSampling, UniformRandomSampling,
    };
    pub use crate::seed::{normalize_identifier, Seeds};
    pub use crate::sigil::{generate, GeneratorState, RenderSummary, Sigil};
    pub use crate::style::{ColorStyle, ShapeKind, StyleConfiguration};
}

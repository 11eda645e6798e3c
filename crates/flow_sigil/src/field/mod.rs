//! Vector field construction and lookup.
//!
//! The field is a grid of angles derived from coherent noise over the virtual canvas.
//! [`CellGrid`] is shared with the spatial accelerators of the layouts.
pub mod grid;
pub mod vector_field;

pub use grid::CellGrid;
pub use vector_field::VectorField;

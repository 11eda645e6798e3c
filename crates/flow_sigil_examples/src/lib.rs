#![forbid(unsafe_code)]

mod identifiers;
mod rendering;

pub use identifiers::random_identifier;
pub use rendering::{init_tracing, render_sigil_to_png, RasterSurface};

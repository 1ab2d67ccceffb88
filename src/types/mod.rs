//! Core value types shared across the pipeline.
//!
//! - `Colour` - straight-alpha RGBA colour values
//! - `Palette` - ordered named colour collections

mod colour;
mod palette;

pub use colour::Colour;
pub use palette::Palette;

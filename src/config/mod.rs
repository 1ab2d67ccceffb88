//! Static configuration: the trait catalogue and the project manifest.

mod catalogue;
mod manifest;

pub use catalogue::{Catalogue, Palettes, TraitTables};
pub use manifest::{Manifest, DEFAULT_CANVAS_SIZE, MANIFEST_FILENAME};

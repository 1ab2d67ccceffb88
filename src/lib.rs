//! valley - Seed-driven creature compositor
//!
//! A library for turning a byte seed into a deterministic set of creature
//! traits, the z-ordered layers that draw them, and the composited image.

pub mod assets;
pub mod config;
pub mod creature;
pub mod error;
pub mod generate;
pub mod render;
pub mod sampler;
pub mod types;

pub use assets::{AssetStore, DirStore, ImageCache, MemoryStore};
pub use config::{Catalogue, Manifest, Palettes, TraitTables, DEFAULT_CANVAS_SIZE, MANIFEST_FILENAME};
pub use creature::{
    build_layers, Accessory, Attribute, Attributes, BodyColour, Head, Metadata, PaletteColour,
    SpecialColour, SpecialFeature, SEED_BYTES_USED,
};
pub use error::{Result, ValleyError};
pub use generate::{generate, Generation, Rendered, Valley};
pub use render::{draw_order, encode_png, render, write_png, DrawOp, Filter, FilterChain, Layer, Surface};
pub use sampler::{sample, Seed, SeedCursor, WeightTable, DEFAULT_SEED_LEN, SAMPLE_RANGE};
pub use types::{Colour, Palette};

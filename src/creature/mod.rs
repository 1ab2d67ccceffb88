//! Creature model for valley.
//!
//! Sampling turns seed bytes into [`Attributes`], the layer rules turn
//! attributes into z-ordered draw operations, and [`Metadata`] reports what
//! was drawn.

mod layers;
mod metadata;
mod traits;

pub use layers::{
    accessory_layers, arm_layers, background_layer, base_layer, build_layers, head_area_layers,
    outline_layer, tail_layers, z,
};
pub use metadata::{Attribute, Metadata};
pub use traits::{
    Accessory, Attributes, BodyColour, Head, PaletteColour, SpecialColour, SpecialFeature,
    ACCESSORY, ACCESSORY_COLOUR, ARM, BACKGROUND_COLOR, BASE_COLOR, FACE, FRILLS, HEAD, MOUTH,
    SEED_BYTES_USED, SPECIAL, SPLIT_COLOR, SPLIT_LABEL, TAIL, UNSPLIT_LABEL,
};

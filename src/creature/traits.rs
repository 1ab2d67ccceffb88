//! Sampled creature attributes.
//!
//! Labels drawn from the catalogue are resolved into closed types here, so
//! the layer rules branch on variants instead of strings.

use crate::config::{Catalogue, Palettes};
use crate::error::{Result, ValleyError};
use crate::sampler::{sample, SeedCursor, SAMPLE_RANGE};
use crate::types::{Colour, Palette};

/// Label of the split table entry that enables a secondary colour.
pub const SPLIT_LABEL: &str = "Split";

/// Label used for an absent optional trait.
pub const UNSPLIT_LABEL: &str = "None";

/// Seed bytes consumed by one creature, whichever branches are taken.
pub const SEED_BYTES_USED: usize = 13;

/// Heads that draw a pre-rendered colour piece under the head art.
const TINTED_HEADS: [&str; 2] = ["Side", "Tuft"];

/// Specials that replace the whole head area instead of sitting on it.
const REPLACING_SPECIALS: [&str; 1] = ["TV Head"];

/// Colours with dedicated pre-rendered art that are never recoloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialColour {
    Gold,
    Diamond,
}

impl SpecialColour {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Gold" => Some(Self::Gold),
            "Diamond" => Some(Self::Diamond),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Diamond => "Diamond",
        }
    }
}

/// A palette colour and the two tones it recolours key art to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteColour {
    pub name: String,
    pub base: Colour,
    pub accent: Colour,
}

impl PaletteColour {
    fn resolve(trait_type: &str, label: &str, base: &Palette, accent: &Palette) -> Result<Self> {
        match (base.get(label), accent.get(label)) {
            (Some(base), Some(accent)) => Ok(Self {
                name: label.to_string(),
                base,
                accent,
            }),
            _ => Err(ValleyError::invalid_trait(trait_type, label)),
        }
    }
}

/// A body colour: either recoloured neutral art or a special asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyColour {
    Palette(PaletteColour),
    Special(SpecialColour),
}

impl BodyColour {
    pub fn resolve(trait_type: &str, label: &str, palettes: &Palettes) -> Result<Self> {
        if let Some(special) = SpecialColour::from_label(label) {
            return Ok(Self::Special(special));
        }
        PaletteColour::resolve(trait_type, label, &palettes.base, &palettes.accent).map(Self::Palette)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Palette(colour) => &colour.name,
            Self::Special(special) => special.label(),
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special(_))
    }
}

/// Worn accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessory {
    None,
    /// Drawn in two pieces, one behind the arms and one in front.
    Flamingo,
    /// Recoloured with the hoodie palettes.
    Hoodie(PaletteColour),
    /// A single asset named after the label.
    Plain(String),
}

impl Accessory {
    pub fn resolve(label: &str, colour: &str, palettes: &Palettes) -> Result<Self> {
        Ok(match label {
            UNSPLIT_LABEL => Self::None,
            "Flamingo" => Self::Flamingo,
            "Hoodie" => Self::Hoodie(PaletteColour::resolve(
                ACCESSORY_COLOUR,
                colour,
                &palettes.hoodie_base,
                &palettes.hoodie_accent,
            )?),
            other => Self::Plain(other.to_string()),
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::None => UNSPLIT_LABEL,
            Self::Flamingo => "Flamingo",
            Self::Hoodie(_) => "Hoodie",
            Self::Plain(label) => label,
        }
    }
}

/// Head piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Art only.
    Plain(String),
    /// Art over a pre-rendered body colour piece.
    Tinted(String),
}

impl Head {
    pub fn resolve(label: &str) -> Self {
        if TINTED_HEADS.contains(&label) {
            Self::Tinted(label.to_string())
        } else {
            Self::Plain(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) | Self::Tinted(label) => label,
        }
    }
}

/// Special override drawn above everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialFeature {
    None,
    /// Replaces ears, eyes, mouth and head entirely.
    Replace(String),
    /// Drawn on top while the ears are still drawn.
    Overlay(String),
}

impl SpecialFeature {
    pub fn resolve(label: &str) -> Self {
        if label == UNSPLIT_LABEL {
            Self::None
        } else if REPLACING_SPECIALS.contains(&label) {
            Self::Replace(label.to_string())
        } else {
            Self::Overlay(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::None => UNSPLIT_LABEL,
            Self::Replace(label) | Self::Overlay(label) => label,
        }
    }
}

/// Metadata trait names, in the order they are reported.
pub const BACKGROUND_COLOR: &str = "Background Color";
pub const BASE_COLOR: &str = "Base Color";
pub const SPLIT_COLOR: &str = "Split Color";
pub const ACCESSORY: &str = "Accessory";
pub const ACCESSORY_COLOUR: &str = "Accessory Color";
pub const TAIL: &str = "Tail";
pub const ARM: &str = "Arm";
pub const FRILLS: &str = "Frills";
pub const FACE: &str = "Face";
pub const MOUTH: &str = "Mouth";
pub const HEAD: &str = "Head";
pub const SPECIAL: &str = "Special";

/// Every trait sampled for one creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    pub background: String,
    pub colour: BodyColour,
    pub split: Option<BodyColour>,
    pub accessory: Accessory,
    /// Sampled for every creature; only meaningful for hoodies.
    pub accessory_colour: String,
    pub tail: String,
    pub arm: String,
    pub frills: String,
    pub face: String,
    pub mouth: String,
    pub head: Head,
    pub special: SpecialFeature,
}

impl Attributes {
    /// Sample every trait from `cursor`, in the fixed schedule order.
    ///
    /// Always consumes exactly [`SEED_BYTES_USED`] bytes: when no split is
    /// drawn, the byte that would have picked the secondary colour is
    /// skipped.
    pub fn sample(catalogue: &Catalogue, cursor: &mut SeedCursor<'_>) -> Result<Self> {
        let tables = &catalogue.tables;
        let palettes = &catalogue.palettes;

        let background = sample(&tables.background, cursor)?.to_string();
        let colour_label = sample(&tables.colour, cursor)?;
        let colour = BodyColour::resolve(BASE_COLOR, colour_label, palettes)?;

        let split = match sample(&tables.split, cursor)? {
            SPLIT_LABEL => {
                let secondary = tables
                    .colour
                    .without(colour_label)?
                    .map_to_range(0, SAMPLE_RANGE)?;
                let label = sample(&secondary, cursor)?;
                Some(BodyColour::resolve(SPLIT_COLOR, label, palettes)?)
            }
            UNSPLIT_LABEL => {
                cursor.skip()?;
                None
            }
            other => return Err(ValleyError::invalid_trait(SPLIT_COLOR, other)),
        };

        let accessory_label = sample(&tables.accessory, cursor)?;
        let accessory_colour = sample(&tables.accessory_colour, cursor)?.to_string();
        let accessory = Accessory::resolve(accessory_label, &accessory_colour, palettes)?;

        let tail = sample(&tables.tail, cursor)?.to_string();
        let arm = sample(&tables.arm, cursor)?.to_string();
        let frills = sample(&tables.frills, cursor)?.to_string();
        let face = sample(&tables.face, cursor)?.to_string();
        let mouth = sample(&tables.mouth, cursor)?.to_string();
        let head = Head::resolve(sample(&tables.head, cursor)?);
        let special = SpecialFeature::resolve(sample(&tables.special, cursor)?);

        tracing::debug!(
            consumed = cursor.consumed(),
            background = %background,
            colour = colour.label(),
            "sampled attributes"
        );

        Ok(Self {
            background,
            colour,
            split,
            accessory,
            accessory_colour,
            tail,
            arm,
            frills,
            face,
            mouth,
            head,
            special,
        })
    }

    /// The colour that wins where only one tone is drawn.
    pub fn dominant_colour(&self) -> &BodyColour {
        self.split.as_ref().unwrap_or(&self.colour)
    }
}

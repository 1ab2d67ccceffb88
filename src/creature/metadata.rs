//! Attribute metadata reported alongside a rendered creature.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValleyError};
use crate::sampler::Seed;

use super::traits::{
    Accessory, Attributes, SpecialFeature, ACCESSORY, ACCESSORY_COLOUR, ARM, BACKGROUND_COLOR,
    BASE_COLOR, FACE, FRILLS, HEAD, MOUTH, SPECIAL, SPLIT_COLOR, TAIL, UNSPLIT_LABEL,
};

/// One `(trait_type, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// Seed and ordered attributes for one creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Canonical `0x` hex encoding of the seed.
    pub seed: String,
    pub attributes: Vec<Attribute>,
}

impl Metadata {
    pub fn from_attributes(seed: &Seed, attrs: &Attributes) -> Self {
        let mut attributes = vec![
            Attribute::new(BACKGROUND_COLOR, &attrs.background),
            Attribute::new(BASE_COLOR, attrs.colour.label()),
            Attribute::new(
                SPLIT_COLOR,
                attrs.split.as_ref().map_or(UNSPLIT_LABEL, |split| split.label()),
            ),
            Attribute::new(ACCESSORY, attrs.accessory.label()),
        ];
        if let Accessory::Hoodie(colour) = &attrs.accessory {
            attributes.push(Attribute::new(ACCESSORY_COLOUR, &colour.name));
        }
        attributes.extend([
            Attribute::new(TAIL, &attrs.tail),
            Attribute::new(ARM, &attrs.arm),
            Attribute::new(FRILLS, &attrs.frills),
            Attribute::new(FACE, &attrs.face),
            Attribute::new(MOUTH, &attrs.mouth),
            Attribute::new(HEAD, attrs.head.label()),
        ]);
        if attrs.special != SpecialFeature::None {
            attributes.push(Attribute::new(SPECIAL, attrs.special.label()));
        }

        Self {
            seed: seed.to_hex(),
            attributes,
        }
    }

    /// Value reported for `trait_type`, if present.
    pub fn get(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.trait_type == trait_type)
            .map(|attr| attr.value.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ValleyError::Render {
            message: format!("Failed to serialize metadata: {}", e),
        })
    }
}

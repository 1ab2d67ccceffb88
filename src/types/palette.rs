//! Palette type for named colour collections.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValleyError};

use super::Colour;

/// An ordered collection of named colours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, Colour)>", into = "Vec<(String, Colour)>")]
pub struct Palette {
    colours: Vec<(String, Colour)>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a colour, rejecting duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, colour: Colour) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ValleyError::Config {
                message: format!("Duplicate palette colour: {}", name),
                help: None,
            });
        }
        self.colours.push((name, colour));
        Ok(())
    }

    /// Get a colour by name.
    pub fn get(&self, name: &str) -> Option<Colour> {
        self.colours
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Colour names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colours.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl TryFrom<Vec<(String, Colour)>> for Palette {
    type Error = ValleyError;

    fn try_from(colours: Vec<(String, Colour)>) -> Result<Self> {
        let mut palette = Self::new();
        for (name, colour) in colours {
            palette.insert(name, colour)?;
        }
        Ok(palette)
    }
}

impl From<Palette> for Vec<(String, Colour)> {
    fn from(palette: Palette) -> Self {
        palette.colours
    }
}

//! Trait catalogue: weight tables and recolouring palettes.
//!
//! The catalogue is static configuration. It is loaded once, validated, and
//! then passed by reference into sampling and layer mapping.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::creature::{SpecialColour, SPLIT_LABEL, UNSPLIT_LABEL};
use crate::error::{Result, ValleyError};
use crate::sampler::{WeightTable, SAMPLE_RANGE};
use crate::types::{Colour, Palette};

/// The catalogue shipped with the crate.
const DEFAULT_CATALOGUE: &str = include_str!("../../data/valley.yaml");

/// One weight table per sampled trait slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitTables {
    pub background: WeightTable,
    pub colour: WeightTable,
    pub split: WeightTable,
    pub accessory: WeightTable,
    pub accessory_colour: WeightTable,
    pub tail: WeightTable,
    pub arm: WeightTable,
    pub frills: WeightTable,
    pub face: WeightTable,
    pub mouth: WeightTable,
    pub head: WeightTable,
    pub special: WeightTable,
}

impl TraitTables {
    /// Tables paired with the names used in error messages.
    pub fn named(&self) -> [(&'static str, &WeightTable); 12] {
        [
            ("background", &self.background),
            ("colour", &self.colour),
            ("split", &self.split),
            ("accessory", &self.accessory),
            ("accessory_colour", &self.accessory_colour),
            ("tail", &self.tail),
            ("arm", &self.arm),
            ("frills", &self.frills),
            ("face", &self.face),
            ("mouth", &self.mouth),
            ("head", &self.head),
            ("special", &self.special),
        ]
    }
}

/// Recolouring palettes keyed by colour label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palettes {
    pub base: Palette,
    pub accent: Palette,
    pub hoodie_base: Palette,
    pub hoodie_accent: Palette,
}

/// Complete static configuration for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Flat key colour authored into neutral art.
    #[serde(default = "default_key")]
    pub key: Colour,
    pub tables: TraitTables,
    pub palettes: Palettes,
}

fn default_key() -> Colour {
    Colour::KEY_GREEN
}

impl Catalogue {
    /// Load a catalogue from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ValleyError::Config {
            message: format!("Failed to read catalogue {}: {}", path.display(), e),
            help: None,
        })?;

        Self::parse(&content)
    }

    /// Parse and validate a catalogue from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let catalogue: Self = serde_yaml::from_str(content).map_err(|e| ValleyError::Config {
            message: format!("Invalid catalogue: {}", e),
            help: Some("Tables are lists of [label, weight]; palettes are lists of [label, \"#RRGGBB\"]".to_string()),
        })?;

        catalogue.validate()?;
        Ok(catalogue)
    }

    /// The embedded default catalogue.
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_CATALOGUE)
    }

    /// Check the invariants sampling and layer mapping rely on.
    pub fn validate(&self) -> Result<()> {
        for (name, table) in self.tables.named() {
            if table.total() != SAMPLE_RANGE {
                return Err(ValleyError::Config {
                    message: format!(
                        "Table '{}' totals {} but must total {}",
                        name,
                        table.total(),
                        SAMPLE_RANGE
                    ),
                    help: Some("Adjust the weights so each table sums to 255".to_string()),
                });
            }
        }

        for label in self.tables.split.labels() {
            if label != SPLIT_LABEL && label != UNSPLIT_LABEL {
                return Err(config_label_error("split", label, "Split table labels must be None or Split"));
            }
        }

        for label in self.tables.colour.labels() {
            let known = SpecialColour::from_label(label).is_some()
                || (self.palettes.base.contains(label) && self.palettes.accent.contains(label));
            if !known {
                return Err(config_label_error(
                    "colour",
                    label,
                    "Colours need an entry in both base and accent palettes, or must be Gold or Diamond",
                ));
            }
        }

        // The secondary colour is drawn from the colour table minus the base.
        let weighted = self.tables.colour.ranges().filter(|(_, r)| !r.is_empty()).count();
        if weighted < 2 {
            return Err(ValleyError::Config {
                message: "Table 'colour' needs at least two weighted colours".to_string(),
                help: Some("A split colour is sampled with the base colour removed".to_string()),
            });
        }

        for label in self.tables.accessory_colour.labels() {
            if !(self.palettes.hoodie_base.contains(label) && self.palettes.hoodie_accent.contains(label)) {
                return Err(config_label_error(
                    "accessory_colour",
                    label,
                    "Accessory colours need an entry in both hoodie palettes",
                ));
            }
        }

        Ok(())
    }
}

fn config_label_error(table: &str, label: &str, help: &str) -> ValleyError {
    ValleyError::Config {
        message: format!("Table '{}' lists unknown value '{}'", table, label),
        help: Some(help.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let catalogue = Catalogue::builtin().unwrap();
        assert_eq!(catalogue.key, Colour::KEY_GREEN);
        for (name, table) in catalogue.tables.named() {
            assert_eq!(table.total(), SAMPLE_RANGE, "table {}", name);
        }
        assert_eq!(catalogue.palettes.hoodie_base.len(), 3);
    }

    #[test]
    fn test_table_with_wrong_total_rejected() {
        let yaml = DEFAULT_CATALOGUE.replace("[None, 200]", "[None, 199]");
        let err = Catalogue::parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("'split' totals 254"));
    }

    #[test]
    fn test_overflowing_weights_rejected() {
        let yaml = DEFAULT_CATALOGUE.replace("[None, 200]", "[None, 4294967295]");
        assert!(matches!(
            Catalogue::parse(&yaml),
            Err(ValleyError::Config { .. })
        ));
    }

    #[test]
    fn test_unknown_colour_rejected() {
        let yaml = DEFAULT_CATALOGUE.replace("[Gold, 3]", "[Silver, 3]");
        let err = Catalogue::parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("'Silver'"));
    }

    #[test]
    fn test_single_weighted_colour_rejected() {
        let start = DEFAULT_CATALOGUE.find("  colour:\n").unwrap();
        let end = DEFAULT_CATALOGUE.find("  split:\n").unwrap();
        let yaml = format!(
            "{}  colour:\n    - [Pink, 255]\n    - [Gold, 0]\n{}",
            &DEFAULT_CATALOGUE[..start],
            &DEFAULT_CATALOGUE[end..]
        );

        let err = Catalogue::parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("at least two weighted colours"));
    }

    #[test]
    fn test_unknown_accessory_colour_rejected() {
        let yaml = DEFAULT_CATALOGUE.replace("[Orange, 85]", "[Teal, 85]");
        assert!(Catalogue::parse(&yaml).is_err());
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(matches!(
            Catalogue::parse("tables: [1, 2"),
            Err(ValleyError::Config { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.yaml");
        std::fs::write(&path, DEFAULT_CATALOGUE).unwrap();

        assert_eq!(Catalogue::load(&path).unwrap(), Catalogue::builtin().unwrap());
        assert!(Catalogue::load(&dir.path().join("missing.yaml")).is_err());
    }
}

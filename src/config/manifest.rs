//! Project manifest (valley.yaml) parsing.
//!
//! The manifest tells a host where the art lives, how large the canvas is
//! and which catalogue to sample from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValleyError};
use crate::sampler::DEFAULT_SEED_LEN;

use super::Catalogue;

/// Conventional manifest file name.
pub const MANIFEST_FILENAME: &str = "valley.yaml";

/// Default canvas edge in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 569;

/// Generation settings loaded from valley.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Root directory of the layer art.
    pub assets: PathBuf,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Seed length in bytes.
    pub seed_length: usize,

    /// Maximum number of decoded images kept in memory.
    /// Unbounded when absent.
    pub cache_capacity: Option<usize>,

    /// Catalogue file; the embedded default is used when absent.
    pub catalogue: Option<PathBuf>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            seed_length: DEFAULT_SEED_LEN,
            cache_capacity: None,
            catalogue: None,
        }
    }
}

impl Manifest {
    /// Load a manifest from a valley.yaml file.
    ///
    /// Relative paths inside the manifest are resolved against the
    /// manifest's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ValleyError::Config {
            message: format!("Failed to read manifest {}: {}", path.display(), e),
            help: None,
        })?;

        let mut manifest = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            manifest.assets = base.join(&manifest.assets);
            manifest.catalogue = manifest.catalogue.map(|c| base.join(c));
        }
        Ok(manifest)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| ValleyError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check valley.yaml syntax".to_string()),
        })?;

        if manifest.width == 0 || manifest.height == 0 {
            return Err(ValleyError::Config {
                message: format!("Canvas size {}x{} is empty", manifest.width, manifest.height),
                help: None,
            });
        }
        if manifest.cache_capacity == Some(0) {
            return Err(ValleyError::Config {
                message: "cache_capacity must be at least 1".to_string(),
                help: Some("Remove cache_capacity for an unbounded cache".to_string()),
            });
        }

        Ok(manifest)
    }

    /// Resolve the catalogue this manifest points at.
    pub fn load_catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue {
            Some(path) => Catalogue::load(path),
            None => Catalogue::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_manifest_uses_defaults() {
        let manifest = Manifest::parse("{}").unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.width, 569);
        assert_eq!(manifest.seed_length, 32);
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
assets: art/layers
width: 64
height: 48
seed_length: 16
cache_capacity: 128
catalogue: tables.yaml
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.assets, PathBuf::from("art/layers"));
        assert_eq!((manifest.width, manifest.height), (64, 48));
        assert_eq!(manifest.seed_length, 16);
        assert_eq!(manifest.cache_capacity, Some(128));
        assert_eq!(manifest.catalogue, Some(PathBuf::from("tables.yaml")));
    }

    #[test]
    fn test_rejects_empty_canvas_and_zero_capacity() {
        assert!(Manifest::parse("width: 0").is_err());
        assert!(Manifest::parse("cache_capacity: 0").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(&path, "assets: art\ncatalogue: cat.yaml\n").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.assets, dir.path().join("art"));
        assert_eq!(manifest.catalogue, Some(dir.path().join("cat.yaml")));
    }

    #[test]
    fn test_default_catalogue_when_unset() {
        let catalogue = Manifest::default().load_catalogue().unwrap();
        assert!(catalogue.tables.colour.contains("Diamond"));
    }
}

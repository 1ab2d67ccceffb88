//! Seed-to-creature generation.
//!
//! [`generate`] is the pure half: seed in, attributes, metadata and layers
//! out. [`Valley`] adds the image cache and canvas so a seed can be turned
//! straight into pixels.

use crate::assets::{DirStore, ImageCache};
use crate::config::{Catalogue, Manifest, DEFAULT_CANVAS_SIZE};
use crate::creature::{build_layers, Attributes, Metadata, SEED_BYTES_USED};
use crate::error::{Result, ValleyError};
use crate::render::{render, Layer, Surface};
use crate::sampler::Seed;

/// Everything decided for one seed before any pixel is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub metadata: Metadata,
    pub attributes: Attributes,
    pub layers: Vec<Layer>,
}

/// A finished creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub metadata: Metadata,
    pub surface: Surface,
}

/// Sample `seed` against `catalogue` and build its layers.
pub fn generate(seed: &Seed, catalogue: &Catalogue) -> Result<Generation> {
    let mut cursor = seed.cursor();
    let attributes = Attributes::sample(catalogue, &mut cursor)?;
    let layers = build_layers(&attributes, catalogue.key);
    let metadata = Metadata::from_attributes(seed, &attributes);

    tracing::debug!(
        consumed = cursor.consumed(),
        layers = layers.len(),
        "generated creature"
    );

    Ok(Generation {
        metadata,
        attributes,
        layers,
    })
}

/// Catalogue, image cache and canvas size bundled for rendering.
///
/// Shareable across threads; each render owns its own surface.
#[derive(Debug)]
pub struct Valley {
    catalogue: Catalogue,
    images: ImageCache,
    width: u32,
    height: u32,
    seed_length: Option<usize>,
}

impl Valley {
    pub fn new(catalogue: Catalogue, images: ImageCache) -> Self {
        Self {
            catalogue,
            images,
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            seed_length: None,
        }
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject seeds that are not exactly `len` bytes long.
    pub fn with_seed_length(mut self, len: usize) -> Self {
        self.seed_length = Some(len);
        self
    }

    /// Build from a manifest: directory-backed art, the manifest's canvas,
    /// seed length, cache capacity and catalogue.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        if manifest.seed_length < SEED_BYTES_USED {
            return Err(ValleyError::Config {
                message: format!(
                    "seed_length {} is shorter than the {} bytes a creature needs",
                    manifest.seed_length, SEED_BYTES_USED
                ),
                help: None,
            });
        }

        let catalogue = manifest.load_catalogue()?;
        let store = DirStore::new(&manifest.assets);
        let images = match manifest.cache_capacity {
            Some(capacity) => ImageCache::with_capacity(store, capacity),
            None => ImageCache::new(store),
        };

        Ok(Self::new(catalogue, images)
            .with_canvas_size(manifest.width, manifest.height)
            .with_seed_length(manifest.seed_length))
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample and lay out a creature without drawing it.
    pub fn generate(&self, seed: &Seed) -> Result<Generation> {
        self.check_seed(seed)?;
        generate(seed, &self.catalogue)
    }

    /// Generate and draw a creature onto a fresh canvas.
    #[tracing::instrument(skip_all, fields(seed = %seed))]
    pub fn render(&self, seed: &Seed) -> Result<Rendered> {
        let mut surface = Surface::new(self.width, self.height);
        let metadata = self.render_into(seed, &mut surface)?;
        Ok(Rendered { metadata, surface })
    }

    /// Generate a creature and draw it onto a caller-owned surface.
    ///
    /// The surface is cleared first and never resized. On error its
    /// contents are unspecified.
    pub fn render_into(&self, seed: &Seed, surface: &mut Surface) -> Result<Metadata> {
        let generation = self.generate(seed)?;
        render(surface, &generation.layers, &self.images)?;
        tracing::debug!(
            cached = self.images.len(),
            decodes = self.images.decodes(),
            "rendered creature"
        );
        Ok(generation.metadata)
    }

    fn check_seed(&self, seed: &Seed) -> Result<()> {
        match self.seed_length {
            Some(len) if seed.len() != len => Err(ValleyError::Seed {
                message: format!("Expected a {}-byte seed, got {} bytes", len, seed.len()),
                help: None,
            }),
            _ => Ok(()),
        }
    }
}

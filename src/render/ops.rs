//! Draw operations: descriptions of how to paint onto a surface.
//!
//! Operations are built first and executed later, so a layer can be
//! inspected (which assets it reads, whether it recolours) before any pixel
//! is touched. Execution is strictly sequential.

use crate::assets::ImageCache;
use crate::error::Result;

use super::{FilterChain, Surface};

/// A composable draw operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Blit a cached image at the origin, at its native size.
    Image(String),
    /// Run operations in order on the same surface.
    Sequence(Vec<DrawOp>),
    /// Run operations on a fresh transparent surface of the same size, then
    /// blit the result onto the destination as one unit.
    Isolate(Vec<DrawOp>),
    /// Recolour every pixel currently on the surface.
    Filter(FilterChain),
}

impl DrawOp {
    pub fn image(path: impl Into<String>) -> Self {
        Self::Image(path.into())
    }

    pub fn sequence(ops: impl IntoIterator<Item = DrawOp>) -> Self {
        Self::Sequence(ops.into_iter().collect())
    }

    pub fn isolate(ops: impl IntoIterator<Item = DrawOp>) -> Self {
        Self::Isolate(ops.into_iter().collect())
    }

    pub fn filter(chain: FilterChain) -> Self {
        Self::Filter(chain)
    }

    /// Execute against `surface`, loading images through `images`.
    pub fn draw(&self, surface: &mut Surface, images: &ImageCache) -> Result<()> {
        match self {
            Self::Image(path) => {
                let image = images.get(path)?;
                surface.draw_image(&image, 0, 0);
            }
            Self::Sequence(ops) => {
                for op in ops {
                    op.draw(surface, images)?;
                }
            }
            Self::Isolate(ops) => {
                let mut scratch = Surface::new(surface.width(), surface.height());
                for op in ops {
                    op.draw(&mut scratch, images)?;
                }
                surface.draw_surface(&scratch, 0, 0);
            }
            Self::Filter(chain) => chain.apply(surface),
        }
        Ok(())
    }

    /// Visit this operation and every nested one, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DrawOp)) {
        visit(self);
        if let Self::Sequence(ops) | Self::Isolate(ops) = self {
            for op in ops {
                op.walk(visit);
            }
        }
    }

    /// Every image path read, in draw order.
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.walk(&mut |op| {
            if let Self::Image(path) = op {
                paths.push(path.as_str());
            }
        });
        paths
    }

    /// Whether any filter runs as part of this operation.
    pub fn has_filter(&self) -> bool {
        let mut found = false;
        self.walk(&mut |op| found |= matches!(op, Self::Filter(_)));
        found
    }
}

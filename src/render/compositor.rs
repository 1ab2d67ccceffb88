//! Compositor - stacks layers onto a destination surface by z-order.

use crate::assets::ImageCache;
use crate::error::Result;

use super::{DrawOp, Surface};

/// A draw operation paired with its stacking position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Draw operation to run.
    pub op: DrawOp,
    /// Stacking position; lower values are drawn first.
    pub z: i64,
}

impl Layer {
    pub fn new(z: i64, op: DrawOp) -> Self {
        Self { op, z }
    }
}

/// Layers in the order they will be drawn.
///
/// The sort is stable, so layers sharing a z-order keep the order they were
/// given in.
pub fn draw_order(layers: &[Layer]) -> Vec<&Layer> {
    let mut ordered: Vec<&Layer> = layers.iter().collect();
    ordered.sort_by_key(|layer| layer.z);
    ordered
}

/// Clear `surface` and draw every layer onto it in z-order.
pub fn render(surface: &mut Surface, layers: &[Layer], images: &ImageCache) -> Result<()> {
    surface.clear();
    for layer in draw_order(layers) {
        tracing::trace!(z = layer.z, "drawing layer");
        layer.op.draw(surface, images)?;
    }
    Ok(())
}

//! Rendering module for valley.
//!
//! Surfaces, colour filters, the draw operation algebra and the compositor
//! that stacks layers by z-order.

mod compositor;
mod filter;
mod ops;
mod png;
mod surface;

pub use compositor::{draw_order, render, Layer};
pub use filter::{Filter, FilterChain};
pub use ops::DrawOp;
pub use png::{encode_png, write_png};
pub use surface::{over, Surface};

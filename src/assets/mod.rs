//! Asset access: stores that hold raster bytes and the cache that decodes
//! them once.

mod cache;
mod store;

pub use cache::ImageCache;
pub use store::{AssetStore, DirStore, MemoryStore};

//! Seed consumption and weighted category sampling.

mod seed;
mod weights;

pub use seed::{Seed, SeedCursor, DEFAULT_SEED_LEN, SAMPLE_RANGE};
pub use weights::{sample, WeightTable};

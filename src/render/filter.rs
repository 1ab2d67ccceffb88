//! Pixel colour filters.
//!
//! Filters rewrite every pixel of the surface they are applied to, so they
//! are normally run inside an isolated sub-surface (see
//! [`DrawOp::isolate`](super::DrawOp::isolate)) that holds only the art they
//! are meant to recolour.

use crate::types::Colour;

use super::Surface;

/// A single pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Replace pixels whose RGB exactly equals `key` with `replacement`,
    /// keeping each pixel's own alpha.
    ChromaKey { key: Colour, replacement: Colour },
}

impl Filter {
    pub fn chroma_key(key: Colour, replacement: Colour) -> Self {
        Self::ChromaKey { key, replacement }
    }

    /// Apply this filter to a single pixel.
    pub fn apply_pixel(&self, px: Colour) -> Colour {
        match *self {
            Self::ChromaKey { key, replacement } => {
                if px.same_rgb(key) {
                    replacement.with_alpha(px.a)
                } else {
                    px
                }
            }
        }
    }

    /// Apply this filter to every pixel of `surface`.
    pub fn apply(&self, surface: &mut Surface) {
        surface.map_pixels(|px| self.apply_pixel(px));
    }
}

/// Filters applied in sequence over the same pixel buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chroma-key substitution to the chain.
    pub fn chroma_key(mut self, key: Colour, replacement: Colour) -> Self {
        self.filters.push(Filter::chroma_key(key, replacement));
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter, in order, over `surface`.
    pub fn apply(&self, surface: &mut Surface) {
        if self.filters.is_empty() {
            return;
        }
        surface.map_pixels(|px| {
            self.filters
                .iter()
                .fold(px, |px, filter| filter.apply_pixel(px))
        });
    }
}

impl FromIterator<Filter> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINK: Colour = Colour::rgb(0xF4, 0xA7, 0xC3);

    #[test]
    fn test_chroma_key_only_touches_exact_matches() {
        let mut surface = Surface::new(3, 1);
        surface.put(0, 0, Colour::KEY_GREEN);
        surface.put(1, 0, Colour::rgb(0, 254, 0));
        surface.put(2, 0, Colour::BLACK);
        let before = surface.clone();

        Filter::chroma_key(Colour::KEY_GREEN, PINK).apply(&mut surface);

        assert_eq!(surface.get(0, 0), Some(PINK));
        assert_eq!(surface.get(1, 0), before.get(1, 0));
        assert_eq!(surface.get(2, 0), before.get(2, 0));
    }

    #[test]
    fn test_chroma_key_preserves_alpha() {
        let mut surface = Surface::new(2, 1);
        surface.put(0, 0, Colour::KEY_GREEN.with_alpha(90));
        surface.put(1, 0, Colour::KEY_GREEN.with_alpha(0));

        Filter::chroma_key(Colour::KEY_GREEN, PINK).apply(&mut surface);

        assert_eq!(surface.get(0, 0), Some(PINK.with_alpha(90)));
        assert_eq!(surface.get(1, 0), Some(PINK.with_alpha(0)));
    }

    #[test]
    fn test_chain_runs_in_order() {
        let red = Colour::rgb(255, 0, 0);
        let chain = FilterChain::new()
            .chroma_key(Colour::KEY_GREEN, red)
            .chroma_key(red, Colour::WHITE);

        let mut surface = Surface::new(1, 1);
        surface.put(0, 0, Colour::KEY_GREEN);
        chain.apply(&mut surface);

        assert_eq!(surface.get(0, 0), Some(Colour::WHITE));
    }

    #[test]
    fn test_empty_chain_is_noop() {
        let mut surface = Surface::new(1, 1);
        surface.put(0, 0, Colour::KEY_GREEN);
        FilterChain::new().apply(&mut surface);
        assert_eq!(surface.get(0, 0), Some(Colour::KEY_GREEN));
    }
}

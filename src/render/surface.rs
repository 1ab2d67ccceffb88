//! Mutable pixel surfaces and source-over blitting.

use image::{Rgba, RgbaImage};

use crate::types::Colour;

/// A fixed-size, straight-alpha RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Get a pixel, or `None` outside the surface.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        self.image.get_pixel_checked(x, y).map(|px| Colour::from(*px))
    }

    /// Overwrite a pixel. Writes outside the surface are ignored.
    pub fn put(&mut self, x: u32, y: u32, colour: Colour) {
        if let Some(px) = self.image.get_pixel_mut_checked(x, y) {
            *px = Rgba(colour.to_rgba());
        }
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.fill(Colour::TRANSPARENT);
    }

    /// Overwrite every pixel with `colour`.
    pub fn fill(&mut self, colour: Colour) {
        for px in self.image.pixels_mut() {
            *px = Rgba(colour.to_rgba());
        }
    }

    /// Rewrite every pixel in place.
    pub fn map_pixels(&mut self, mut f: impl FnMut(Colour) -> Colour) {
        for px in self.image.pixels_mut() {
            *px = Rgba(f(Colour::from(*px)).to_rgba());
        }
    }

    /// Composite `source` onto this surface with its top-left corner at
    /// (`x`, `y`), clipping anything that falls outside.
    pub fn draw_image(&mut self, source: &RgbaImage, x: u32, y: u32) {
        let (width, height) = self.size();
        for (sx, sy, px) in source.enumerate_pixels() {
            let (dx, dy) = (x + sx, y + sy);
            if dx >= width || dy >= height {
                continue;
            }
            let dest = self.image.get_pixel_mut(dx, dy);
            *dest = Rgba(over(dest.0, px.0));
        }
    }

    /// Composite another surface onto this one.
    pub fn draw_surface(&mut self, source: &Surface, x: u32, y: u32) {
        self.draw_image(&source.image, x, y);
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Straight-alpha source-over: `src` painted on top of `dst`.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    // Destination alpha that still shows through the source.
    let da = (u32::from(dst[3]) * (255 - sa) + 127) / 255;
    let out_a = sa + da;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(3, 2);
        assert_eq!(surface.size(), (3, 2));
        assert_eq!(surface.get(2, 1), Some(Colour::TRANSPARENT));
        assert_eq!(surface.get(3, 0), None);
    }

    #[test]
    fn test_over_fast_paths() {
        let dst = [10, 20, 30, 40];
        assert_eq!(over(dst, [255, 255, 255, 0]), dst);
        assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
    }

    #[test]
    fn test_over_onto_transparent_keeps_source() {
        assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200]), [100, 110, 120, 200]);
    }

    #[test]
    fn test_over_half_alpha_onto_opaque() {
        let out = over([0, 0, 0, 255], [255, 255, 255, 128]);
        assert_eq!(out[3], 255);
        assert_eq!(out[0], 128);
    }

    #[test]
    fn test_draw_image_clips_to_surface() {
        let mut surface = Surface::new(2, 2);
        let source = RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255]));

        surface.draw_image(&source, 1, 1);

        assert_eq!(surface.get(0, 0), Some(Colour::TRANSPARENT));
        assert_eq!(surface.get(1, 1), Some(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_draw_image_skips_transparent_source_pixels() {
        let mut surface = Surface::new(2, 1);
        surface.fill(Colour::rgb(0, 0, 255));

        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        surface.draw_image(&source, 0, 0);

        assert_eq!(surface.get(0, 0), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(surface.get(1, 0), Some(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_from_image_keeps_pixels() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, Rgba([9, 8, 7, 6]));

        let surface = Surface::from_image(image.clone());
        assert_eq!(surface.size(), (2, 1));
        assert_eq!(surface.get(1, 0), Some(Colour::new(9, 8, 7, 6)));
        assert_eq!(surface.into_image(), image);
    }

    #[test]
    fn test_clear() {
        let mut surface = Surface::new(1, 1);
        surface.put(0, 0, Colour::WHITE);
        surface.clear();
        assert_eq!(surface.get(0, 0), Some(Colour::TRANSPARENT));
    }
}

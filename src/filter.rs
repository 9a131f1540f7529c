const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

/// A trait used to implement filters for the image quantization process.
///
/// Filters remove colors from the histogram before quantization, and drop final swatches whose
/// average color ends up filtered. No filter is installed by default. When the filters reject
/// every color in an image, the most frequent exact pixel color is returned instead.
///
/// See [`crate::PaletteBuilder::add_filter`] and [`crate::PaletteExtractor::add_filter`].
pub trait Filter: Send + Sync {
    /// Return whether a given color should be allowed or not. The same color is given in both sRGB
    /// and HSL for convenience.
    fn is_allowed(&self, rgb: (u8, u8, u8), hsl: (f32, f32, f32)) -> bool;
}

/// Disallows colors very close to black and colors very close to white.
///
/// Logos are often drawn on a white or black canvas; this keeps the canvas out of the palette.
#[derive(Debug, Clone, Copy)]
pub struct LightnessFilter {
    black_max_lightness: f32,
    white_min_lightness: f32,
}

impl LightnessFilter {
    pub fn new(black_max_lightness: f32, white_min_lightness: f32) -> Self {
        Self {
            black_max_lightness,
            white_min_lightness,
        }
    }
}

impl Default for LightnessFilter {
    fn default() -> Self {
        Self::new(BLACK_MAX_LIGHTNESS, WHITE_MIN_LIGHTNESS)
    }
}

impl Filter for LightnessFilter {
    fn is_allowed(&self, _: (u8, u8, u8), (_, _, l): (f32, f32, f32)) -> bool {
        l > self.black_max_lightness && l < self.white_min_lightness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(rgb: (u8, u8, u8)) -> bool {
        LightnessFilter::default().is_allowed(rgb, crate::rgb_to_hsl(rgb))
    }

    #[test]
    fn rejects_extremes() {
        assert!(!allowed((0, 0, 0)));
        assert!(!allowed((255, 255, 255)));
        assert!(!allowed((250, 250, 250)));
    }

    #[test]
    fn keeps_colors() {
        assert!(allowed((255, 0, 0)));
        assert!(allowed((128, 128, 128)));
        assert!(allowed((20, 40, 200)));
    }
}

use image::{Rgb, RgbImage};
use logo_palette::Palette;
use proptest::prelude::*;
use std::collections::HashSet;

fn image_strategy() -> impl Strategy<Value = RgbImage> {
    (1u32..24, 1u32..24).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<[u8; 3]>(), (width * height) as usize).prop_map(move |pixels| {
            RgbImage::from_fn(width, height, |x, y| Rgb(pixels[(y * width + x) as usize]))
        })
    })
}

proptest! {
    #[test]
    fn palette_is_bounded_and_unique(image in image_strategy(), max_colors in 1usize..8, resize_to in 0u32..32) {
        let colors = Palette::from_image(image)
            .maximum_color_count(max_colors)
            .resize_to(resize_to)
            .generate()
            .hex_colors();

        prop_assert!(!colors.is_empty());
        prop_assert!(colors.len() <= max_colors);
        prop_assert_eq!(colors.iter().collect::<HashSet<_>>().len(), colors.len());

        for color in &colors {
            prop_assert_eq!(color.len(), 7);
            prop_assert!(color.starts_with('#'));
            prop_assert!(color[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn palette_is_deterministic(image in image_strategy(), max_colors in 1usize..8) {
        let first = Palette::from_image(image.clone()).maximum_color_count(max_colors).generate();
        let second = Palette::from_image(image).maximum_color_count(max_colors).generate();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn few_distinct_colors_are_returned_exactly(a in any::<[u8; 3]>(), b in any::<[u8; 3]>(), split in 1u32..15) {
        prop_assume!(a != b);

        let image = RgbImage::from_fn(16, 4, |x, _| if x < split { Rgb(a) } else { Rgb(b) });
        let colors: HashSet<(u8, u8, u8)> = Palette::from_image(image)
            .generate()
            .swatches()
            .iter()
            .map(|swatch| swatch.rgb())
            .collect();

        let expected: HashSet<(u8, u8, u8)> = [(a[0], a[1], a[2]), (b[0], b[1], b[2])].into_iter().collect();
        prop_assert_eq!(colors, expected);
    }
}

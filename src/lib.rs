// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract the dominant colors of a logo image.
//!
//! The image is fetched over HTTP, decoded, normalized to RGB, downscaled so its longer edge fits a
//! bound, and reduced to a handful of representative colors with a median-cut quantizer. The result
//! is a list of `#rrggbb` strings.
//!
//! ```no_run
//! let colors = logo_palette::extract("https://example.com/logo.png", 3, 128)?;
//! println!("{colors:?}");
//! # Ok::<(), logo_palette::Error>(())
//! ```
//!
//! For tests or other transports, build a [`PaletteExtractor`] around your own [`Fetch`]
//! implementation. Images already in memory go through [`Palette::from_image`] or
//! [`extract_from_bytes`] without touching the network.

mod color_cut_quantizer;
mod error;
mod extractor;
mod fetch;
mod filter;
mod swatch;

pub const DEFAULT_MAX_COLORS: usize = 3;
pub const DEFAULT_RESIZE_TO: u32 = 128;

pub use crate::{
    error::{Error, Result},
    extractor::PaletteExtractor,
    fetch::{Fetch, HttpFetcher, FETCH_TIMEOUT},
    filter::{Filter, LightnessFilter},
    swatch::Swatch,
};
pub use image;

use color_cut_quantizer::ColorCutQuantizer;
use image::{imageops::FilterType, RgbImage};
use palette::IntoColor;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    swatches: Vec<Swatch>,
}

pub struct PaletteBuilder {
    image: RgbImage,
    maximum_color_count: usize,
    resize_to: u32,
    filters: Vec<Arc<dyn Filter>>,
}

impl Palette {
    pub fn from_image(image: RgbImage) -> PaletteBuilder {
        PaletteBuilder::from_image(image)
    }

    /// The dominant colors, most populous first. Never contains two swatches of the same color.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn hex_colors(&self) -> Vec<String> {
        self.swatches.iter().map(|swatch| swatch.hex()).collect()
    }

    pub fn most_prominent_color(&self) -> Option<(u8, u8, u8)> {
        self.swatches
            .iter()
            .max_by_key(|swatch| swatch.population())
            .map(|swatch| swatch.rgb())
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    fn generate(quantized: Vec<Swatch>, pixels: &[(u8, u8, u8)], max_colors: usize) -> Palette {
        let mut seen = HashSet::new();
        let mut swatches: Vec<Swatch> = quantized
            .into_iter()
            .filter(|swatch| seen.insert(swatch.rgb()))
            .collect();

        if swatches.is_empty() {
            if let Some(dominant) = most_frequent_color(pixels) {
                log::debug!("quantizer produced no colors, falling back to the most frequent pixel");
                swatches.push(dominant);
            }
        }

        swatches.truncate(max_colors);
        Palette { swatches }
    }
}

impl PaletteBuilder {
    pub fn from_image(image: RgbImage) -> Self {
        Self {
            image,
            maximum_color_count: DEFAULT_MAX_COLORS,
            resize_to: DEFAULT_RESIZE_TO,
            filters: Vec::new(),
        }
    }

    /// Upper bound on the number of colors in the palette. Zero is treated as one.
    pub fn maximum_color_count(self, maximum_color_count: usize) -> Self {
        Self {
            maximum_color_count: maximum_color_count.max(1),
            ..self
        }
    }

    /// Bound on the longer edge of the image before quantizing. Zero disables resizing.
    pub fn resize_to(self, resize_to: u32) -> Self {
        Self { resize_to, ..self }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    pub(crate) fn filters(self, filters: Vec<Arc<dyn Filter>>) -> Self {
        Self { filters, ..self }
    }

    pub fn generate(mut self) -> Palette {
        self.scale_image_down();

        let pixels: Vec<(u8, u8, u8)> = self.image.pixels().map(|p| (p[0], p[1], p[2])).collect();
        let quantizer = ColorCutQuantizer::new(&pixels, self.maximum_color_count, &self.filters);
        let swatches = quantizer.get_quantized_colors();

        Palette::generate(swatches, &pixels, self.maximum_color_count)
    }

    fn scale_image_down(&mut self) {
        let (width, height) = self.image.dimensions();

        if let Some((new_width, new_height)) = thumbnail_dimensions(width, height, self.resize_to) {
            log::debug!("resizing {width}x{height} image to {new_width}x{new_height}");
            self.image = image::imageops::resize(&self.image, new_width, new_height, FilterType::Lanczos3);
        }
    }
}

/// Decode an in-memory image and extract up to `max_colors` hex colors from it.
///
/// This is everything [`PaletteExtractor::extract`] does after the fetch.
pub fn extract_from_bytes(bytes: &[u8], max_colors: usize, resize_to: u32) -> Result<Vec<String>> {
    let image = image::load_from_memory(bytes)?.into_rgb8();

    Ok(Palette::from_image(image)
        .maximum_color_count(max_colors)
        .resize_to(resize_to)
        .generate()
        .hex_colors())
}

/// Fetch the logo at `url` over HTTP and return up to `max_colors` of its dominant colors.
///
/// An empty or absent URL returns an empty list without any network traffic.
pub fn extract<'a>(url: impl Into<Option<&'a str>>, max_colors: usize, resize_to: u32) -> Result<Vec<String>> {
    let url = match url.into() {
        Some(url) if !url.is_empty() => url,
        _ => return Ok(Vec::new()),
    };

    PaletteExtractor::new(HttpFetcher::new()?)
        .max_colors(max_colors)
        .resize_to(resize_to)
        .extract(url)
}

/// Dimensions that fit `width`x`height` inside a `bound`x`bound` box, keeping the aspect ratio, or `None` when the
/// image already fits. Never upscales and never produces a zero edge.
fn thumbnail_dimensions(width: u32, height: u32, bound: u32) -> Option<(u32, u32)> {
    if bound == 0 || (width <= bound && height <= bound) {
        return None;
    }

    let scale = bound as f64 / width.max(height) as f64;
    let scaled = |edge: u32| ((edge as f64 * scale).round() as u32).clamp(1, bound);

    Some((scaled(width), scaled(height)))
}

/// The most common exact color. Ties go to the color seen first in row-major order.
fn most_frequent_color(pixels: &[(u8, u8, u8)]) -> Option<Swatch> {
    // color -> (count, index of first occurrence)
    let mut hist: HashMap<(u8, u8, u8), (u32, usize)> = HashMap::new();
    for (i, pixel) in pixels.iter().enumerate() {
        hist.entry(*pixel).or_insert((0, i)).0 += 1;
    }

    hist.into_iter()
        .max_by_key(|(_, (count, first))| (*count, std::cmp::Reverse(*first)))
        .map(|(rgb, (count, _))| Swatch::new(rgb, count))
}

fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsl: palette::Hsl = raw_float.into_color();
    let (h, s, l) = hsl.into_components();

    (h.into_positive_degrees(), s, l)
}

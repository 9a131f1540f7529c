use crate::{
    error::Result,
    fetch::{Fetch, HttpFetcher},
    filter::Filter,
    Palette, DEFAULT_MAX_COLORS, DEFAULT_RESIZE_TO,
};
use std::sync::Arc;

/// Fetches logo images and reduces them to their dominant colors.
///
/// Every call to [`PaletteExtractor::extract`] is independent: one request, one decode buffer owned
/// by that call, nothing kept afterwards. An extractor can be shared between threads as long as its
/// transport can.
pub struct PaletteExtractor<F = HttpFetcher> {
    fetcher: F,
    max_colors: usize,
    resize_to: u32,
    filters: Vec<Arc<dyn Filter>>,
}

impl<F> PaletteExtractor<F>
where
    F: Fetch,
{
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_colors: DEFAULT_MAX_COLORS,
            resize_to: DEFAULT_RESIZE_TO,
            filters: Vec::new(),
        }
    }

    pub fn max_colors(self, max_colors: usize) -> Self {
        Self { max_colors, ..self }
    }

    pub fn resize_to(self, resize_to: u32) -> Self {
        Self { resize_to, ..self }
    }

    pub fn add_filter<T>(mut self, filter: T) -> Self
    where
        T: Filter + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Up to `max_colors` distinct `#rrggbb` strings, most dominant first.
    ///
    /// An empty or absent URL yields an empty list and the transport is never called. Any image
    /// that decodes to at least one pixel yields at least one color.
    pub fn extract<'a>(&self, url: impl Into<Option<&'a str>>) -> Result<Vec<String>> {
        let url = match url.into() {
            Some(url) if !url.is_empty() => url,
            _ => return Ok(Vec::new()),
        };

        let bytes = self.fetcher.fetch(url)?;
        let image = image::load_from_memory(&bytes)?.into_rgb8();
        drop(bytes);

        log::debug!("decoded {}x{} image from {url}", image.width(), image.height());

        let colors = Palette::from_image(image)
            .maximum_color_count(self.max_colors)
            .resize_to(self.resize_to)
            .filters(self.filters.clone())
            .generate()
            .hex_colors();

        log::info!("extracted {} colors from {url}: {colors:?}", colors.len());
        Ok(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::{cell::Cell, io::Cursor};

    struct StaticFetch {
        body: Vec<u8>,
        calls: Cell<usize>,
    }

    impl StaticFetch {
        fn png(image: RgbImage) -> Self {
            let mut body = Vec::new();
            image
                .write_to(&mut Cursor::new(&mut body), ImageFormat::Png)
                .unwrap();

            Self {
                body,
                calls: Cell::new(0),
            }
        }
    }

    impl Fetch for StaticFetch {
        fn fetch(&self, _: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.body.clone())
        }
    }

    struct NotFound;
    impl Fetch for NotFound {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(Error::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: url.to_owned(),
            })
        }
    }

    #[test]
    fn empty_url_skips_the_fetch() {
        let extractor = PaletteExtractor::new(StaticFetch::png(RgbImage::new(1, 1)));

        assert_eq!(extractor.extract("").unwrap(), Vec::<String>::new());
        assert_eq!(extractor.extract(None::<&str>).unwrap(), Vec::<String>::new());
        assert_eq!(extractor.fetcher().calls.get(), 0);
    }

    #[test]
    fn solid_image() {
        let extractor = PaletteExtractor::new(StaticFetch::png(RgbImage::from_pixel(10, 10, Rgb([255, 0, 0]))));

        assert_eq!(extractor.extract("http://logo.test/red.png").unwrap(), vec!["#ff0000"]);
        assert_eq!(extractor.fetcher().calls.get(), 1);
    }

    #[test]
    fn status_errors_propagate() {
        let err = PaletteExtractor::new(NotFound).extract("http://logo.test/missing.png").unwrap_err();

        assert!(matches!(err, Error::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND));
    }

    #[test]
    fn borrowed_fetcher_works() {
        let fetch = StaticFetch::png(RgbImage::from_pixel(3, 3, Rgb([0, 0x80, 0])));
        let extractor = PaletteExtractor::new(&fetch).max_colors(1);

        assert_eq!(extractor.extract("http://logo.test/green.png").unwrap(), vec!["#008000"]);
        assert_eq!(fetch.calls.get(), 1);
    }
}

use crate::error::{Error, Result};
use std::time::Duration;

/// How long a single request may take, connection and body included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw bytes behind a URL.
///
/// [`crate::PaletteExtractor`] receives its transport through this trait so it never reaches for
/// process-wide network state, and so tests can substitute their own.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F> Fetch for &F
where
    F: Fetch + ?Sized,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP GET with a fixed [`FETCH_TIMEOUT`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Use a preconfigured client. Its own timeout settings apply instead of [`FETCH_TIMEOUT`].
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes()?;
        log::debug!("fetched {} bytes from {url}", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// Everything that can go wrong while extracting a palette from a URL.
///
/// None of these are recovered from internally; they are handed back to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response: DNS failure, refused connection, timeout, or a body
    /// that could not be read.
    #[error("failed to fetch image: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },

    /// The payload is not an image format the decoder understands.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for dominant color extraction

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Image bytes could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read image {reference}: {source}")]
    Io {
        reference: String,
        #[source]
        source: io::Error,
    },
    #[error("timed out fetching image {reference} after {after:?}")]
    Timeout { reference: String, after: Duration },
    #[error("unsupported image reference scheme in {0}")]
    UnsupportedScheme(String),
    #[error("image source unavailable: {0}")]
    Unavailable(String),
}

/// A catalog read or write failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no artwork with id {0}")]
    UnknownArtwork(String),
    #[error("catalog I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("catalog backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure of a single artwork. Never aborts a batch run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("artwork has no image")]
    MissingImage,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to save color: {0}")]
    Store(#[from] StoreError),
}

/// Failure of a whole batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to list artworks: {0}")]
    Listing(#[source] StoreError),
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Whether trying the same item again might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch(FetchError::UnsupportedScheme(_)) => false,
            Self::Store(StoreError::UnknownArtwork(_)) => false,
            Self::Fetch(_) | Self::Store(_) => true,
            Self::MissingImage | Self::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::{Error, FetchError, StoreError};

    #[test]
    fn test_transient() {
        assert!(Error::Fetch(FetchError::Unavailable("down".into())).is_transient());
        assert!(Error::Store(StoreError::Io(io::Error::other("disk full"))).is_transient());
        assert!(!Error::Fetch(FetchError::UnsupportedScheme("ftp://x".into())).is_transient());
        assert!(!Error::Store(StoreError::UnknownArtwork("a-404".into())).is_transient());
        assert!(!Error::MissingImage.is_transient());
    }
}

//! Collaborators the engine talks to: where image bytes come from and where colors go.

use serde::{Deserialize, Serialize};

use crate::descriptor::DominantColor;
use crate::error::{FetchError, StoreError};

/// An artwork that still needs a dominant color.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    /// Reference handed to [`ImageSource::fetch`]. `None` when the artwork has no image.
    pub image: Option<String>,
}

/// Provides raw image bytes for a reference.
pub trait ImageSource: Sync {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError>;
}

/// The catalog of artworks.
///
/// No transactionality across items is assumed; each [`CatalogStore::save_descriptor`] stands on
/// its own.
pub trait CatalogStore: Sync {
    /// Artworks that have no dominant color yet.
    fn list_missing_descriptor(&self) -> Result<Vec<WorkItem>, StoreError>;

    /// Persist the dominant color of an artwork, replacing any previous one.
    fn save_descriptor(&self, id: &str, color: &DominantColor) -> Result<(), StoreError>;
}

impl WorkItem {
    pub fn new<I, T>(id: I, title: T, image: Option<&str>) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            image: image.map(str::to_owned),
        }
    }

    /// The image reference, treating a blank one as absent.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

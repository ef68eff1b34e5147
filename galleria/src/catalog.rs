//! File-backed artwork catalog.
//!
//! The catalog is a TOML document holding every artwork and, once extracted, its dominant color:
//!
//! ```toml
//! [[artworks]]
//! id = "a-001"
//! title = "Harbour at Dusk"
//! image = "harbour.jpg"
//!
//! [artworks.color]
//! h = 210
//! s = 64
//! l = 41
//! isAchromatic = false
//! ```

use dominant::{CatalogStore, DominantColor, StoreError, WorkItem};
use log::debug;
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// One artwork record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artwork {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Image reference, resolved by [`crate::source::FileImageSource`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Dominant color, absent until extracted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<DominantColor>,
}

/// The whole catalog document.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub artworks: Vec<Artwork>,
}

/// A [`Catalog`] loaded from disk. Every saved color is written back immediately.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    catalog: Mutex<Catalog>,
}

fn backend<E>(e: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::Backend(Box::new(e))
}

/// Replace `target` with `content` by writing a sibling file and renaming it over.
fn write_file(target: &Path, content: &[u8]) -> Result<(), StoreError> {
    let mut staging = target.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    debug!("writing to {}", target.display());
    fs::write(&staging, content)?;
    if let Err(e) = fs::rename(&staging, target) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

impl From<&Artwork> for WorkItem {
    fn from(value: &Artwork) -> Self {
        WorkItem::new(&value.id, &value.title, value.image.as_deref())
    }
}

impl FileCatalog {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!("loading catalog from {}", path.display());
        let content = fs::read_to_string(path)?;
        let catalog = toml::from_str::<Catalog>(&content).map_err(backend)?;
        Ok(Self {
            path: path.to_owned(),
            catalog: Mutex::new(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every artwork in file order.
    pub fn artworks(&self) -> Result<Vec<Artwork>, StoreError> {
        Ok(self.lock()?.artworks.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalog>, StoreError> {
        self.catalog
            .lock()
            .map_err(|_| StoreError::Backend("catalog lock poisoned".into()))
    }
}

impl CatalogStore for FileCatalog {
    fn list_missing_descriptor(&self) -> Result<Vec<WorkItem>, StoreError> {
        Ok(self
            .lock()?
            .artworks
            .iter()
            .filter(|a| a.color.is_none())
            .map(WorkItem::from)
            .collect())
    }

    fn save_descriptor(&self, id: &str, color: &DominantColor) -> Result<(), StoreError> {
        let mut catalog = self.lock()?;
        // The in-memory catalog only changes once the file has been written.
        let mut updated = catalog.clone();
        let artwork = updated
            .artworks
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::UnknownArtwork(id.to_owned()))?;
        artwork.color = Some(*color);
        let content = toml::to_string_pretty(&updated).map_err(backend)?;
        write_file(&self.path, content.as_bytes())?;
        *catalog = updated;
        Ok(())
    }
}

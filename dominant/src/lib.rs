//! # Dominant
//!
//! Picks one representative color for an image, for sorting a gallery of artworks by color.
//!
//! Each image is stretched to a 30×30 grid, every pixel is converted to HSL and weighted by how
//! much it draws the eye, and the weights are collected into twelve 30° hue buckets plus a
//! separate pool for grays. If grays carry more than 60% of the weight the image is reported as
//! achromatic; otherwise the heaviest hue bucket's weighted mean wins.
//!
//! ```rust
//! use dominant::{Histogram, DominantColor, rgb_to_hsl};
//!
//! let mut histogram = Histogram::new();
//! for _ in 0..10 {
//!     histogram.ingest(rgb_to_hsl(0x33, 0x66, 0x99));
//! }
//! assert_eq!(histogram.resolve(), DominantColor::chromatic(210, 50, 40));
//! ```
//!
//! [`Batch`] runs extraction over many artworks, pulling bytes from an [`ImageSource`] and saving
//! results into a [`CatalogStore`], with failures kept per artwork.

pub mod batch;
pub mod bucket;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod gallery;
pub mod histogram;
pub mod hsl;
pub mod store;
pub mod weight;

pub use batch::{Batch, BatchOptions, BatchSummary, ItemResult};
pub use bucket::hue_bucket;
pub use descriptor::DominantColor;
pub use error::{BatchError, Error, FetchError, StoreError};
pub use extract::{extract, extract_from, extract_image};
pub use gallery::sort_by_color;
pub use histogram::{Histogram, HistogramState};
pub use hsl::{Hsl, hsl_to_rgb, rgb_to_hsl};
pub use store::{CatalogStore, ImageSource, WorkItem};
pub use weight::perceptual_weight;

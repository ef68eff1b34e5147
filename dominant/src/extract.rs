//! Single-image extraction: decode, shrink, histogram, resolve.

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

use crate::descriptor::DominantColor;
use crate::error::Error;
use crate::histogram::Histogram;
use crate::hsl::Hsl;
use crate::store::ImageSource;

/// Side of the square grid every image is resampled to before analysis.
pub const SAMPLE_GRID: u32 = 30;

/// Extract the dominant color from an encoded image.
pub fn extract(bytes: &[u8]) -> Result<DominantColor, Error> {
    let image = image::load_from_memory(bytes)?;
    Ok(extract_image(&image))
}

/// Extract the dominant color from an already decoded image.
///
/// The image is stretched to a [`SAMPLE_GRID`]² grid regardless of its aspect ratio and alpha is
/// dropped; only color statistics matter here.
pub fn extract_image(image: &DynamicImage) -> DominantColor {
    let grid = image
        .resize_exact(SAMPLE_GRID, SAMPLE_GRID, FilterType::Lanczos3)
        .to_rgb8();
    let mut histogram = Histogram::new();
    grid.pixels().for_each(|p| histogram.ingest(Hsl::from(*p)));
    histogram.resolve()
}

/// Fetch an image from `source` and extract its dominant color.
pub fn extract_from<S>(source: &S, reference: &str) -> Result<DominantColor, Error>
where
    S: ImageSource + ?Sized,
{
    let bytes = source.fetch(reference)?;
    debug!("fetched {} bytes from {}", bytes.len(), reference);
    extract(&bytes)
}

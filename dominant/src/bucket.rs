//! Hue quantization into fixed 30° sectors.

/// Width of a hue bucket in degrees.
pub const HUE_BUCKET_WIDTH: u16 = 30;
/// Number of hue buckets covering the hue circle.
pub const HUE_BUCKET_COUNT: usize = (360 / HUE_BUCKET_WIDTH) as usize;

/// The bucket a hue falls into, as the bucket's starting angle (`0, 30, ..., 330`).
///
/// Hues of 360° or more are reduced modulo 360 first.
#[inline]
pub const fn hue_bucket(hue: u16) -> u16 {
    (hue % 360) / HUE_BUCKET_WIDTH * HUE_BUCKET_WIDTH
}

/// Index of the bucket a hue falls into, in `0..HUE_BUCKET_COUNT`.
#[inline]
pub const fn hue_bucket_index(hue: u16) -> usize {
    (hue_bucket(hue) / HUE_BUCKET_WIDTH) as usize
}

//! Weighted hue histogram that resolves to a single [`DominantColor`].
//!
//! A [`Histogram`] is built fresh for every image. It starts out [`HistogramState::Empty`], moves
//! to [`HistogramState::Accumulating`] on the first [`Histogram::ingest`], and is consumed by
//! [`Histogram::resolve`], so it cannot be fed again once a color has been produced.

use log::trace;

use crate::bucket::{HUE_BUCKET_COUNT, HUE_BUCKET_WIDTH, hue_bucket_index};
use crate::descriptor::DominantColor;
use crate::hsl::Hsl;
use crate::weight::perceptual_weight;

/// Samples with saturation (in percent) below this are treated as gray.
pub const ACHROMATIC_THRESHOLD: u8 = 8;
/// Share of the total weight the gray samples must exceed for the image to count as achromatic.
pub const ACHROMATIC_DOMINANCE: f64 = 0.6;
/// Lightness reported when there is nothing to go on.
pub const NEUTRAL_LIGHTNESS: u8 = 50;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct HueAccumulator {
    hue: f64,
    saturation: f64,
    lightness: f64,
    weight: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct AchromaticAccumulator {
    lightness: f64,
    weight: f64,
}

/// Observable lifecycle of a [`Histogram`] before it is resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HistogramState {
    /// No sample ingested yet.
    Empty,
    /// At least one sample ingested.
    Accumulating,
}

#[derive(Clone, Debug)]
pub struct Histogram {
    buckets: [HueAccumulator; HUE_BUCKET_COUNT],
    achromatic: AchromaticAccumulator,
    total_weight: f64,
    samples: usize,
}

impl AchromaticAccumulator {
    fn mean_lightness(&self) -> Option<u8> {
        (self.weight > 0.0).then(|| (self.lightness / self.weight).round() as u8)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            buckets: [HueAccumulator::default(); HUE_BUCKET_COUNT],
            achromatic: AchromaticAccumulator::default(),
            total_weight: 0.0,
            samples: 0,
        }
    }

    pub fn state(&self) -> HistogramState {
        if self.samples == 0 {
            HistogramState::Empty
        } else {
            HistogramState::Accumulating
        }
    }

    /// Number of samples ingested so far.
    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Add one sample, weighted by [`perceptual_weight`].
    pub fn ingest(&mut self, sample: Hsl) {
        let w = perceptual_weight(sample.lightness, sample.saturation);
        let lightness = f64::from(sample.lightness);
        if sample.saturation < ACHROMATIC_THRESHOLD {
            self.achromatic.lightness += lightness * w;
            self.achromatic.weight += w;
        } else {
            let bucket = &mut self.buckets[hue_bucket_index(sample.hue)];
            bucket.hue += f64::from(sample.hue) * w;
            bucket.saturation += f64::from(sample.saturation) * w;
            bucket.lightness += lightness * w;
            bucket.weight += w;
        }
        self.total_weight += w;
        self.samples += 1;
    }

    /// Pick the dominant color and drop the histogram.
    pub fn resolve(self) -> DominantColor {
        if self.achromatic.weight > self.total_weight * ACHROMATIC_DOMINANCE {
            let lightness = self
                .achromatic
                .mean_lightness()
                .unwrap_or(NEUTRAL_LIGHTNESS);
            return DominantColor::achromatic(lightness);
        }

        // Strict comparison keeps the lowest bucket on ties.
        let (index, best) = self.buckets.iter().enumerate().fold(
            (0, &self.buckets[0]),
            |(best_index, best), (index, bucket)| {
                if bucket.weight > best.weight {
                    (index, bucket)
                } else {
                    (best_index, best)
                }
            },
        );

        if best.weight <= 0.0 {
            let lightness = self
                .achromatic
                .mean_lightness()
                .unwrap_or(NEUTRAL_LIGHTNESS);
            return DominantColor::achromatic(lightness);
        }

        trace!(
            "dominant hue bucket {}° with weight {:.2} of {:.2}",
            index as u16 * HUE_BUCKET_WIDTH,
            best.weight,
            self.total_weight
        );
        DominantColor::chromatic(
            (best.hue / best.weight).round() as u16,
            (best.saturation / best.weight).round() as u8,
            (best.lightness / best.weight).round() as u8,
        )
    }
}

//! Perceptual weighting of samples.
//!
//! Bright, saturated regions draw the eye more than shadows or washed-out areas, so they get a
//! larger say in which hue wins. The breakpoints below are tuned constants; stored colors were
//! computed with them, so changing any of them changes the output for existing artworks.

/// Weight for a sample with the given lightness and saturation (both in percent).
///
/// The result is always positive.
pub fn perceptual_weight(lightness: u8, saturation: u8) -> f64 {
    let base = match lightness {
        0..20 => 0.3,
        20..35 => 0.7,
        56..=70 => 1.2,
        71.. => 1.5,
        _ => 1.0,
    };
    let multiplier = match saturation {
        51.. => 1.3,
        31..=50 => 1.1,
        _ => 1.0,
    };
    base * multiplier
}

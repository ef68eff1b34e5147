//! Conversion between 8-bit sRGB triples and integer HSL.

use image::Rgb;

/// A color in integer HSL form.
///
/// `hue` is in degrees (`0..360`), `saturation` and `lightness` are percentages (`0..=100`).
/// When `saturation` is zero the hue carries no information and is reported as `0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in whole degrees.
    pub hue: u16,
    /// Saturation in whole percent.
    pub saturation: u8,
    /// Lightness in whole percent.
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

impl From<Rgb<u8>> for Hsl {
    fn from(value: Rgb<u8>) -> Self {
        let [r, g, b] = value.0;
        rgb_to_hsl(r, g, b)
    }
}

#[inline]
fn to_percent(value: f64) -> u8 {
    (value * 100.0).round() as u8
}

/// Convert an 8-bit RGB triple to HSL.
///
/// Total over all inputs. Hue is rounded to the nearest degree and wraps, so a hue that rounds up
/// to 360 is reported as 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0, 0, to_percent(lightness));
    }

    let d = max - min;
    let saturation = if lightness > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    let hue = ((sector / 6.0) * 360.0).round() as u16 % 360;

    Hsl::new(hue, to_percent(saturation), to_percent(lightness))
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL back to an 8-bit RGB triple, for display purposes.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb<u8> {
    let h = f64::from(hsl.hue % 360) / 360.0;
    let s = f64::from(hsl.saturation.min(100)) / 100.0;
    let l = f64::from(hsl.lightness.min(100)) / 100.0;
    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if hsl.saturation == 0 {
        let v = to_byte(l);
        return Rgb([v, v, v]);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb([
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    ])
}

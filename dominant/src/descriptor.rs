//! The persisted dominant color of an artwork.

use hex_color::HexColor;
use serde::{Deserialize, Serialize};

use crate::hsl::{Hsl, hsl_to_rgb};

/// Representative color of an image.
///
/// Serialized with the short keys used by the catalog and the batch summary:
/// `{ "h": 210, "s": 64, "l": 41, "isAchromatic": false }`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DominantColor {
    #[serde(rename = "h")]
    pub hue: u16,
    #[serde(rename = "s")]
    pub saturation: u8,
    #[serde(rename = "l")]
    pub lightness: u8,
    #[serde(rename = "isAchromatic")]
    pub is_achromatic: bool,
}

impl DominantColor {
    /// A gray/white/black color. Hue and saturation are zero.
    pub const fn achromatic(lightness: u8) -> Self {
        Self {
            hue: 0,
            saturation: 0,
            lightness,
            is_achromatic: true,
        }
    }

    pub const fn chromatic(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            is_achromatic: false,
        }
    }

    pub fn hsl(&self) -> Hsl {
        Hsl::new(self.hue, self.saturation, self.lightness)
    }

    /// sRGB approximation of this color for swatches.
    pub fn to_hex(&self) -> HexColor {
        let [r, g, b] = hsl_to_rgb(self.hsl()).0;
        HexColor::rgb(r, g, b)
    }
}

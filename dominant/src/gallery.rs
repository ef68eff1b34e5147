//! Ordering of artworks for the color-sorted gallery.

use std::cmp::Reverse;

use crate::descriptor::DominantColor;

/// Sort key: chromatic colors by hue then lightness (light first), then grays from white to
/// black, then records that have no color yet.
pub fn color_key(color: Option<&DominantColor>) -> (u8, u16, Reverse<u8>) {
    match color {
        Some(c) if !c.is_achromatic => (0, c.hue, Reverse(c.lightness)),
        Some(c) => (1, 0, Reverse(c.lightness)),
        None => (2, 0, Reverse(0)),
    }
}

/// Stable sort of `items` into gallery order.
pub fn sort_by_color<T, F>(items: &mut [T], color: F)
where
    F: Fn(&T) -> Option<&DominantColor>,
{
    items.sort_by_key(|item| color_key(color(item)));
}

#[cfg(test)]
mod test {
    use super::sort_by_color;
    use crate::descriptor::DominantColor;

    #[test]
    fn test_gallery_order() {
        let mut items = vec![
            ("none", None),
            ("black", Some(DominantColor::achromatic(5))),
            ("blue", Some(DominantColor::chromatic(230, 80, 50))),
            ("white", Some(DominantColor::achromatic(95))),
            ("dark red", Some(DominantColor::chromatic(2, 80, 20))),
            ("light red", Some(DominantColor::chromatic(2, 80, 70))),
            ("green", Some(DominantColor::chromatic(120, 80, 50))),
            ("other none", None),
        ];
        sort_by_color(&mut items, |(_, c)| c.as_ref());
        let names: Vec<&str> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "light red",
                "dark red",
                "green",
                "blue",
                "white",
                "black",
                "none",
                "other none"
            ]
        );
    }
}

//! Harmonies de couleurs : rotations de teinte sur la roue chromatique.
//!
//! Toutes les rotations se font en HSV, saturation et valeur préservées,
//! teinte modulo 360. L'ordre de sortie suit l'ordre des offsets.

use crate::convert::{hsv_to_rgb, rgb_to_hsv};

/// Couleur complémentaire : 255 moins chaque canal.
///
/// # Example
/// ```
/// use tn_core::harmony::complementary;
/// assert_eq!(complementary(255, 165, 0), (0, 90, 255));
/// ```
#[must_use]
pub fn complementary(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    (255 - r, 255 - g, 255 - b)
}

/// Tourne la teinte d'une couleur par chaque offset, en degrés signés.
fn rotate_hue<const N: usize>(r: u8, g: u8, b: u8, offsets: [i32; N]) -> [(u8, u8, u8); N] {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    offsets.map(|offset| {
        let rotated = (i32::from(h) + offset).rem_euclid(360) as u16;
        hsv_to_rgb(rotated, s, v)
    })
}

/// Couleurs triadiques : +120° et +240° sur la roue.
///
/// # Example
/// ```
/// use tn_core::harmony::triadic;
/// assert_eq!(triadic(255, 0, 0), [(0, 255, 0), (0, 0, 255)]);
/// ```
#[must_use]
pub fn triadic(r: u8, g: u8, b: u8) -> [(u8, u8, u8); 2] {
    rotate_hue(r, g, b, [120, 240])
}

/// Couleurs analogues : −30° et +30°.
///
/// # Example
/// ```
/// use tn_core::harmony::analogous;
/// assert_eq!(analogous(255, 0, 0), [(255, 0, 127), (255, 127, 0)]);
/// ```
#[must_use]
pub fn analogous(r: u8, g: u8, b: u8) -> [(u8, u8, u8); 2] {
    rotate_hue(r, g, b, [-30, 30])
}

/// Complémentaires divisées : +150° et +210°.
///
/// # Example
/// ```
/// use tn_core::harmony::split_complementary;
/// assert_eq!(split_complementary(255, 0, 0), [(0, 255, 127), (0, 127, 255)]);
/// ```
#[must_use]
pub fn split_complementary(r: u8, g: u8, b: u8) -> [(u8, u8, u8); 2] {
    rotate_hue(r, g, b, [150, 210])
}

//! Palette intégrée minimale : 13 couleurs de base.
//!
//! Utilisée quand aucune source de palette n'est disponible, pour que le
//! moteur reste utilisable hors ligne.

use crate::NamedColor;

/// (nom, rgb, hex) des 13 couleurs de repli.
const FALLBACK: [(&str, (u8, u8, u8), &str); 13] = [
    ("Black", (0, 0, 0), "#000000"),
    ("White", (255, 255, 255), "#FFFFFF"),
    ("Red", (255, 0, 0), "#FF0000"),
    ("Green", (0, 255, 0), "#00FF00"),
    ("Blue", (0, 0, 255), "#0000FF"),
    ("Yellow", (255, 255, 0), "#FFFF00"),
    ("Cyan", (0, 255, 255), "#00FFFF"),
    ("Magenta", (255, 0, 255), "#FF00FF"),
    ("Gray", (128, 128, 128), "#808080"),
    ("Orange", (255, 165, 0), "#FFA500"),
    ("Purple", (128, 0, 128), "#800080"),
    ("Pink", (255, 192, 203), "#FFC0CB"),
    ("Brown", (165, 42, 42), "#A52A2A"),
];

/// Construit les entrées de la palette de repli, dans l'ordre fixe.
pub(crate) fn fallback_entries() -> Vec<NamedColor> {
    FALLBACK
        .iter()
        .map(|&(name, rgb, hex)| NamedColor {
            name: name.to_string(),
            rgb,
            hex: hex.to_string(),
        })
        .collect()
}

//! Simulation de daltonisme par matrices linéaires 3×3 fixes.
//!
//! Quatre types fermés, chacun une constante. La sortie est bornée à
//! [0,255] puis tronquée : les matrices peuvent déborder l'intervalle en
//! flottant intermédiaire.

use serde::{Deserialize, Serialize};

/// Matrice de transformation ligne × colonne appliquée au vecteur RGB.
type Matrix = [[f64; 3]; 3];

/// Red-blind.
const PROTANOPIA: Matrix = [
    [0.567, 0.433, 0.000],
    [0.558, 0.442, 0.000],
    [0.000, 0.242, 0.758],
];

/// Green-blind.
const DEUTERANOPIA: Matrix = [
    [0.625, 0.375, 0.000],
    [0.700, 0.300, 0.000],
    [0.000, 0.300, 0.700],
];

/// Blue-blind.
const TRITANOPIA: Matrix = [
    [0.950, 0.050, 0.000],
    [0.000, 0.433, 0.567],
    [0.000, 0.475, 0.525],
];

/// Vision achromatique complète (pondération luma).
const ACHROMATOPSIA: Matrix = [
    [0.299, 0.587, 0.114],
    [0.299, 0.587, 0.114],
    [0.299, 0.587, 0.114],
];

/// Types de daltonisme simulables. Énumération fermée.
///
/// # Example
/// ```
/// use tn_core::blindness::ColorBlindness;
/// assert_eq!(
///     ColorBlindness::from_name("Protanopia"),
///     Some(ColorBlindness::Protanopia)
/// );
/// assert_eq!(ColorBlindness::from_name("monochromie"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorBlindness {
    /// Absence des cônes rouges.
    Protanopia,
    /// Absence des cônes verts.
    Deuteranopia,
    /// Absence des cônes bleus.
    Tritanopia,
    /// Absence totale de perception des couleurs.
    Achromatopsia,
}

impl ColorBlindness {
    /// Les quatre types, dans l'ordre de déclaration.
    pub const ALL: [Self; 4] = [
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
    ];

    /// Résout un nom (insensible à la casse ASCII) vers un type.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.eq_ignore_ascii_case(kind.name()))
    }

    /// Nom canonique, en minuscules.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Achromatopsia => "achromatopsia",
        }
    }

    /// Matrice de transformation associée.
    fn matrix(self) -> &'static Matrix {
        match self {
            Self::Protanopia => &PROTANOPIA,
            Self::Deuteranopia => &DEUTERANOPIA,
            Self::Tritanopia => &TRITANOPIA,
            Self::Achromatopsia => &ACHROMATOPSIA,
        }
    }
}

/// Applique la matrice du type donné, borne à [0,255], tronque.
///
/// # Example
/// ```
/// use tn_core::blindness::{simulate, ColorBlindness};
/// assert_eq!(
///     simulate(255, 0, 0, ColorBlindness::Protanopia),
///     (144, 142, 0)
/// );
/// ```
#[must_use]
pub fn simulate(r: u8, g: u8, b: u8, kind: ColorBlindness) -> (u8, u8, u8) {
    let matrix = kind.matrix();
    let rf = f64::from(r);
    let gf = f64::from(g);
    let bf = f64::from(b);

    let apply =
        |row: &[f64; 3]| (row[0] * rf + row[1] * gf + row[2] * bf).clamp(0.0, 255.0) as u8;

    (apply(&matrix[0]), apply(&matrix[1]), apply(&matrix[2]))
}

/// Variante par nom libre, politique de passage explicite : un nom
/// inconnu retourne la couleur d'entrée inchangée, ce n'est pas une
/// erreur.
///
/// # Example
/// ```
/// use tn_core::blindness::simulate_named;
/// assert_eq!(simulate_named(10, 20, 30, "pas-un-type"), (10, 20, 30));
/// ```
#[must_use]
pub fn simulate_named(r: u8, g: u8, b: u8, name: &str) -> (u8, u8, u8) {
    ColorBlindness::from_name(name).map_or((r, g, b), |kind| simulate(r, g, b, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stays_in_range_at_boundaries() {
        for kind in ColorBlindness::ALL {
            // Les bornes de l'espace RGB ne doivent jamais déborder.
            for (r, g, b) in [(0, 0, 0), (255, 255, 255), (255, 0, 0), (0, 0, 255)] {
                let _ = simulate(r, g, b, kind);
            }
        }
    }

    #[test]
    fn white_and_black_are_fixed_points() {
        for kind in ColorBlindness::ALL {
            assert_eq!(simulate(0, 0, 0, kind), (0, 0, 0));
            // Chaque ligne de matrice somme à ~1.0 : le blanc reste blanc
            // à la troncature près.
            let (r, g, b) = simulate(255, 255, 255, kind);
            assert!(r >= 254 && g >= 254 && b >= 254, "got ({r},{g},{b})");
        }
    }

    #[test]
    fn achromatopsia_collapses_to_gray() {
        let (r, g, b) = simulate(200, 60, 180, ColorBlindness::Achromatopsia);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn name_resolution_is_case_insensitive() {
        assert_eq!(
            ColorBlindness::from_name("DEUTERANOPIA"),
            Some(ColorBlindness::Deuteranopia)
        );
        assert_eq!(
            ColorBlindness::from_name("Tritanopia"),
            Some(ColorBlindness::Tritanopia)
        );
        assert_eq!(ColorBlindness::from_name(""), None);
    }

    #[test]
    fn unknown_name_passes_input_through() {
        assert_eq!(simulate_named(1, 2, 3, "protanomalie"), (1, 2, 3));
        // Un nom connu transforme bien.
        assert_ne!(simulate_named(255, 0, 0, "protanopia"), (255, 0, 0));
    }
}

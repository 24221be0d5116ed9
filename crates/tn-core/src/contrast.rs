//! Métriques perceptuelles WCAG : luminance relative, ratio de contraste.
//!
//! Les coefficients suivent la formule de référence WCAG 2.x à l'identique,
//! c'est une exigence de conformité.

use std::fmt;

use serde::Serialize;

/// Linéarisation sRGB d'un canal 8 bits.
fn linearize(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Luminance relative WCAG d'une couleur RGB, dans [0.0, 1.0].
///
/// # Example
/// ```
/// use tn_core::contrast::relative_luminance;
/// assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 1e-9);
/// assert!(relative_luminance(0, 0, 0) < 1e-9);
/// ```
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Ratio de contraste WCAG entre deux couleurs, dans [1.0, 21.0].
///
/// # Example
/// ```
/// use tn_core::contrast::contrast_ratio;
/// let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
/// assert!((ratio - 21.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(a.0, a.1, a.2);
    let l2 = relative_luminance(b.0, b.1, b.2);

    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Niveau d'accessibilité WCAG d'un ratio de contraste.
///
/// Seuils inclusifs : 7.0 → AAA, 4.5 → AA, 3.0 → AA Large, sinon échec.
///
/// # Example
/// ```
/// use tn_core::contrast::WcagRating;
/// assert_eq!(WcagRating::of(7.0), WcagRating::Aaa);
/// assert_eq!(WcagRating::of(4.49), WcagRating::AaLarge);
/// assert_eq!(WcagRating::of(2.0).to_string(), "Fail");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WcagRating {
    /// Contraste ≥ 7.0.
    Aaa,
    /// Contraste ≥ 4.5.
    Aa,
    /// Contraste ≥ 3.0, suffisant pour le texte large seulement.
    AaLarge,
    /// Contraste insuffisant.
    Fail,
}

impl WcagRating {
    /// Classe un ratio de contraste.
    #[must_use]
    pub fn of(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// Libellé court du niveau.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA Large",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for WcagRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

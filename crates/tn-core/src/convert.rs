//! Conversions entre modèles de couleur : RGB, HEX, HSV, HSL, CMYK.
//!
//! RGB 8 bits est la représentation canonique, tout le reste en dérive.
//! Les conversions vers HSV/HSL/CMYK tronquent (sans arrondir) vers des
//! entiers : degrés [0,360) pour la teinte, pourcentages [0,100] pour le
//! reste. La troncature est une politique testée, pas un artefact.

use serde::Serialize;

use crate::error::CoreError;

/// Convertit RGB → code HEX `#RRGGBB`, majuscules, sans alpha.
///
/// # Example
/// ```
/// use tn_core::convert::rgb_to_hex;
/// assert_eq!(rgb_to_hex(255, 165, 0), "#FFA500");
/// assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
/// ```
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse un code HEX vers RGB. Accepte `#` optionnel, formes 3 ou 6 digits.
///
/// La forme courte `#RGB` s'étend en `#RRGGBB` par duplication de digit.
/// Paire exacte de [`rgb_to_hex`] sur l'espace 24 bits.
///
/// # Errors
/// Returns [`CoreError::InvalidHex`] for any other shape or non-hex digit.
///
/// # Example
/// ```
/// use tn_core::convert::hex_to_rgb;
/// assert_eq!(hex_to_rgb("#FFA500").unwrap(), (255, 165, 0));
/// assert_eq!(hex_to_rgb("F80").unwrap(), (255, 136, 0));
/// assert!(hex_to_rgb("#12345G").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), CoreError> {
    let invalid = || CoreError::InvalidHex {
        input: hex.to_string(),
    };

    let raw = hex.strip_prefix('#').unwrap_or(hex);
    if !raw.is_ascii() {
        return Err(invalid());
    }

    let expanded: String;
    let digits = match raw.len() {
        3 => {
            expanded = raw.chars().flat_map(|c| [c, c]).collect();
            expanded.as_str()
        }
        6 => raw,
        _ => return Err(invalid()),
    };

    let channel =
        |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).map_err(|_| invalid());

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Teinte en degrés [0.0, 360.0) pour un triplet normalisé.
fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if (max - r).abs() < f64::EPSILON {
        (((g - b) / delta) % 6.0) / 6.0
    } else if (max - g).abs() < f64::EPSILON {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let h = if h < 0.0 { h + 1.0 } else { h };
    h * 360.0
}

/// Convertit RGB → HSV. H ∈ [0,360), S et V ∈ [0,100], tronqués.
///
/// # Example
/// ```
/// use tn_core::convert::rgb_to_hsv;
/// assert_eq!(rgb_to_hsv(255, 165, 0), (38, 100, 100));
/// assert_eq!(rgb_to_hsv(0, 255, 0), (120, 100, 100));
/// ```
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    let h = hue_degrees(rf, gf, bf, max, delta);

    ((h as u16) % 360, (s * 100.0) as u8, (v * 100.0) as u8)
}

/// Convertit HSV → RGB. H ∈ [0,360), S et V ∈ [0,100].
///
/// Aller-retour RGB→HSV→RGB approximatif seulement : la quantisation
/// entière de H (≈4.25 unités RGB par degré) et de S/V (2.55 par point)
/// borne la dérive, elle ne l'annule pas.
///
/// # Example
/// ```
/// use tn_core::convert::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(120, 100, 100), (0, 255, 0));
/// assert_eq!(hsv_to_rgb(0, 0, 100), (255, 255, 255));
/// ```
#[must_use]
pub fn hsv_to_rgb(h: u16, s: u8, v: u8) -> (u8, u8, u8) {
    let h = f64::from(h) / 60.0;
    let s = f64::from(s) / 100.0;
    let v = f64::from(v) / 100.0;

    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (rf, gf, bf) = match (i as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    ((rf * 255.0) as u8, (gf * 255.0) as u8, (bf * 255.0) as u8)
}

/// Convertit RGB → HSL. H ∈ [0,360), S et L ∈ [0,100], tronqués.
///
/// # Example
/// ```
/// use tn_core::convert::rgb_to_hsl;
/// assert_eq!(rgb_to_hsl(255, 0, 0), (0, 100, 50));
/// assert_eq!(rgb_to_hsl(128, 128, 128), (0, 0, 50));
/// ```
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    let h = hue_degrees(rf, gf, bf, max, delta);

    ((h as u16) % 360, (s * 100.0) as u8, (l * 100.0) as u8)
}

/// Composante RGB d'une teinte HSL (schéma m1/m2 classique).
fn hsl_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * 6.0 * hue
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Convertit HSL → RGB. H ∈ [0,360), S et L ∈ [0,100].
///
/// # Example
/// ```
/// use tn_core::convert::hsl_to_rgb;
/// assert_eq!(hsl_to_rgb(0, 100, 50), (255, 0, 0));
/// assert_eq!(hsl_to_rgb(240, 100, 50), (0, 0, 255));
/// ```
#[must_use]
pub fn hsl_to_rgb(h: u16, s: u8, l: u8) -> (u8, u8, u8) {
    let h = f64::from(h) / 360.0;
    let s = f64::from(s) / 100.0;
    let l = f64::from(l) / 100.0;

    if s == 0.0 {
        let gray = (l * 255.0) as u8;
        return (gray, gray, gray);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    let rf = hsl_component(m1, m2, h + 1.0 / 3.0);
    let gf = hsl_component(m1, m2, h);
    let bf = hsl_component(m1, m2, h - 1.0 / 3.0);

    ((rf * 255.0) as u8, (gf * 255.0) as u8, (bf * 255.0) as u8)
}

/// Convertit RGB → CMYK, pourcentages [0,100] tronqués.
///
/// Le noir pur est un cas spécial : (0,0,0) → (0,0,0,100), ce qui évite la
/// division par zéro quand K = 100 %.
///
/// # Example
/// ```
/// use tn_core::convert::rgb_to_cmyk;
/// assert_eq!(rgb_to_cmyk(0, 0, 0), (0, 0, 0, 100));
/// assert_eq!(rgb_to_cmyk(255, 165, 0), (0, 35, 100, 0));
/// ```
#[must_use]
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
    if r == 0 && g == 0 && b == 0 {
        return (0, 0, 0, 100);
    }

    let c = 1.0 - f64::from(r) / 255.0;
    let m = 1.0 - f64::from(g) / 255.0;
    let y = 1.0 - f64::from(b) / 255.0;
    let k = c.min(m).min(y);

    let c = (c - k) / (1.0 - k);
    let m = (m - k) / (1.0 - k);
    let y = (y - k) / (1.0 - k);

    (
        (c * 100.0) as u8,
        (m * 100.0) as u8,
        (y * 100.0) as u8,
        (k * 100.0) as u8,
    )
}

/// Convertit CMYK → RGB. Sorties bornées à [0,255] puis tronquées.
///
/// # Example
/// ```
/// use tn_core::convert::cmyk_to_rgb;
/// assert_eq!(cmyk_to_rgb(0, 100, 100, 0), (255, 0, 0));
/// assert_eq!(cmyk_to_rgb(0, 0, 0, 100), (0, 0, 0));
/// ```
#[must_use]
pub fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> (u8, u8, u8) {
    let c = f64::from(c) / 100.0;
    let m = f64::from(m) / 100.0;
    let y = f64::from(y) / 100.0;
    let k = f64::from(k) / 100.0;

    let r = 255.0 * (1.0 - c) * (1.0 - k);
    let g = 255.0 * (1.0 - m) * (1.0 - k);
    let b = 255.0 * (1.0 - y) * (1.0 - k);

    (
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    )
}

/// Toutes les représentations d'une même couleur RGB.
///
/// # Example
/// ```
/// use tn_core::convert::all_formats;
/// let f = all_formats(255, 165, 0);
/// assert_eq!(f.hex, "#FFA500");
/// assert_eq!(f.hsv, (38, 100, 100));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorFormats {
    /// Triplet source.
    pub rgb: (u8, u8, u8),
    /// Code `#RRGGBB`.
    pub hex: String,
    /// (teinte °, saturation %, valeur %).
    pub hsv: (u16, u8, u8),
    /// (teinte °, saturation %, luminosité %).
    pub hsl: (u16, u8, u8),
    /// Pourcentages (c, m, y, k).
    pub cmyk: (u8, u8, u8, u8),
}

/// Dérive toutes les représentations d'un triplet RGB.
#[must_use]
pub fn all_formats(r: u8, g: u8, b: u8) -> ColorFormats {
    ColorFormats {
        rgb: (r, g, b),
        hex: rgb_to_hex(r, g, b),
        hsv: rgb_to_hsv(r, g, b),
        hsl: rgb_to_hsl(r, g, b),
        cmyk: rgb_to_cmyk(r, g, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_exact() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let hex = rgb_to_hex(r, g, b);
                    let back = hex_to_rgb(&hex).expect("generated hex must parse");
                    assert_eq!(back, (r, g, b), "roundtrip failed for {hex}");
                }
            }
        }
    }

    #[test]
    fn hex_shorthand_expands_by_duplication() {
        assert_eq!(
            hex_to_rgb("#A1F").expect("shorthand"),
            hex_to_rgb("#AA11FF").expect("long form")
        );
        assert_eq!(hex_to_rgb("fff").expect("no hash"), (255, 255, 255));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#GGHHII", "rouge", "#ффф"] {
            assert!(hex_to_rgb(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn hsv_known_values() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 100, 100));
        assert_eq!(rgb_to_hsv(0, 0, 255), (240, 100, 100));
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 100));
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        // Orange : 38.82° tronqué à 38.
        assert_eq!(rgb_to_hsv(255, 165, 0), (38, 100, 100));
    }

    #[test]
    fn hsv_roundtrip_bounded_drift() {
        // La teinte entière vaut ≈4.25 unités RGB, S/V 2.55 chacun.
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let (h, s, v) = rgb_to_hsv(r, g, b);
                    let (r2, g2, b2) = hsv_to_rgb(h, s, v);
                    for (a, c) in [(r, r2), (g, g2), (b, b2)] {
                        assert!(
                            (i16::from(a) - i16::from(c)).abs() <= 10,
                            "drift too large: ({r},{g},{b}) -> ({r2},{g2},{b2})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn hsl_known_values() {
        assert_eq!(rgb_to_hsl(255, 0, 0), (0, 100, 50));
        assert_eq!(rgb_to_hsl(0, 255, 0), (120, 100, 50));
        assert_eq!(rgb_to_hsl(255, 255, 255), (0, 0, 100));
        assert_eq!(rgb_to_hsl(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn hsl_roundtrip_bounded_drift() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let (h, s, l) = rgb_to_hsl(r, g, b);
                    let (r2, g2, b2) = hsl_to_rgb(h, s, l);
                    for (a, c) in [(r, r2), (g, g2), (b, b2)] {
                        assert!(
                            (i16::from(a) - i16::from(c)).abs() <= 12,
                            "drift too large: ({r},{g},{b}) -> ({r2},{g2},{b2})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn cmyk_black_special_case() {
        assert_eq!(rgb_to_cmyk(0, 0, 0), (0, 0, 0, 100));
        assert_eq!(cmyk_to_rgb(0, 0, 0, 100), (0, 0, 0));
    }

    #[test]
    fn cmyk_primaries() {
        assert_eq!(rgb_to_cmyk(255, 0, 0), (0, 100, 100, 0));
        assert_eq!(rgb_to_cmyk(0, 255, 0), (100, 0, 100, 0));
        assert_eq!(rgb_to_cmyk(0, 0, 255), (100, 100, 0, 0));
        assert_eq!(rgb_to_cmyk(255, 255, 255), (0, 0, 0, 0));
    }

    #[test]
    fn cmyk_roundtrip_bounded_drift() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let (c, m, y, k) = rgb_to_cmyk(r, g, b);
                    let (r2, g2, b2) = cmyk_to_rgb(c, m, y, k);
                    for (a, e) in [(r, r2), (g, g2), (b, b2)] {
                        assert!(
                            (i16::from(a) - i16::from(e)).abs() <= 10,
                            "drift too large: ({r},{g},{b}) -> ({r2},{g2},{b2})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn cmyk_out_of_range_inputs_clamp() {
        // Comportement non spécifié en entrée, mais la sortie reste bornée.
        let (r, g, b) = cmyk_to_rgb(255, 255, 255, 0);
        assert_eq!((r, g, b), (0, 0, 0));
    }

    #[test]
    fn all_formats_aggregates_consistently() {
        let f = all_formats(255, 165, 0);
        assert_eq!(f.rgb, (255, 165, 0));
        assert_eq!(f.hex, "#FFA500");
        assert_eq!(f.hsv, (38, 100, 100));
        assert_eq!(f.hsl, (38, 100, 50));
        assert_eq!(f.cmyk, (0, 35, 100, 0));
    }
}

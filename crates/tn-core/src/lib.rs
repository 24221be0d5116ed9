/// Color math, types, and shared structures for teinte.
///
/// This crate contains the pure color science used across the teinte
/// workspace: model conversions (RGB, HEX, HSV, HSL, CMYK), harmony
/// derivations, WCAG perceptual metrics, color-blindness simulation, the
/// pixel buffer type, configuration, and the error taxonomy.
///
/// Everything here is stateless: each function is a pure function of its
/// explicit inputs, safe to call from any thread.

pub mod blindness;
pub mod buffer;
pub mod config;
pub mod contrast;
pub mod convert;
pub mod error;
pub mod harmony;

pub use buffer::PixelBuffer;
pub use config::{EngineConfig, ExtractConfig};
pub use error::CoreError;

/// Triplet RGB 8 bits par canal. Représentation canonique des couleurs,
/// tous les autres modèles en sont des vues dérivées.
pub type Rgb = (u8, u8, u8);

/// Re-exports pour accès par chemin sémantique.
pub mod color {
    pub use crate::blindness::{simulate, simulate_named, ColorBlindness};
    pub use crate::contrast::{contrast_ratio, relative_luminance, WcagRating};
    pub use crate::convert::{all_formats, hex_to_rgb, rgb_to_hex, ColorFormats};
}

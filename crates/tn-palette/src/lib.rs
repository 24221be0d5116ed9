/// Named-color index for teinte.
///
/// Loads a reference palette (name, RGB, hex), builds a kd-tree over the
/// RGB coordinates once, and answers nearest / top-k nearest queries under
/// Euclidean distance. When no palette source is available the built-in
/// 13-color set keeps the engine usable offline.

mod builtin;
mod matcher;

pub use matcher::{ColorMatcher, MatchResult};

use serde::{Deserialize, Serialize};
use tn_core::Rgb;

/// Entrée immuable de la palette de référence.
///
/// Format JSON d'une entrée : `{"name": "...", "rgb": [r, g, b], "hex": "#..."}`.
///
/// # Example
/// ```
/// use tn_palette::NamedColor;
/// let entry: NamedColor =
///     serde_json::from_str(r##"{"name": "Orange", "rgb": [255, 165, 0], "hex": "#FFA500"}"##)
///         .unwrap();
/// assert_eq!(entry.rgb, (255, 165, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedColor {
    /// Nom lisible ("Orange", "Bleu canard", ...).
    pub name: String,
    /// Triplet RGB de référence.
    pub rgb: Rgb,
    /// Code `#RRGGBB` correspondant.
    pub hex: String,
}

/// Document racine d'un fichier de palette JSON.
#[derive(Deserialize)]
pub(crate) struct PaletteFile {
    pub(crate) colors: Vec<NamedColor>,
}

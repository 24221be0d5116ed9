//! Classification d'un RGB arbitraire vers la couleur nommée la plus
//! proche, via un kd-tree construit une seule fois sur la palette.

use std::path::Path;

use kd_tree::KdTree;
use tn_core::Rgb;

use crate::builtin::fallback_entries;
use crate::{NamedColor, PaletteFile};

/// Distance RGB maximale possible : √(3 × 255²) ≈ 441.67. Constante de
/// normalisation fixe du score de confiance, pas dérivée de la palette.
const MAX_RGB_DISTANCE: f64 = 441.67;

/// Voisins supplémentaires interrogés au-delà de k, pour départager les
/// distances égales par ordre d'apparition dans la palette.
const TIE_PAD: usize = 4;

/// Point du kd-tree : coordonnées RGB + index d'origine dans la palette.
struct IndexedPoint {
    index: usize,
    point: [i32; 3],
}

impl kd_tree::KdPoint for IndexedPoint {
    type Scalar = i32;
    type Dim = typenum::U3;

    fn at(&self, k: usize) -> i32 {
        self.point[k]
    }
}

/// Résultat d'une requête de plus proche voisin.
///
/// `confidence` est un score de proximité normalisé sur [0,100], arrondi à
/// une décimale. Ce n'est pas une probabilité.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MatchResult {
    /// Nom de l'entrée la plus proche.
    pub name: String,
    /// Code hex de l'entrée.
    pub hex: String,
    /// RGB de l'entrée.
    pub rgb: Rgb,
    /// RGB interrogé.
    pub input_rgb: Rgb,
    /// Distance euclidienne dans l'espace RGB.
    pub distance: f64,
    /// max(0, 1 − distance/441.67) × 100, arrondi à une décimale.
    pub confidence: f64,
}

/// Index de couleurs nommées, immuable après construction.
///
/// Le kd-tree est construit une fois (O(n log n)) puis partagé en lecture
/// seule : les requêtes concurrentes sont sûres sans verrou.
///
/// # Example
/// ```
/// use tn_palette::ColorMatcher;
/// let matcher = ColorMatcher::builtin();
/// let hit = matcher.find_closest(0, 0, 0).expect("palette non vide");
/// assert_eq!(hit.name, "Black");
/// assert_eq!(hit.distance, 0.0);
/// assert_eq!(hit.confidence, 100.0);
/// ```
pub struct ColorMatcher {
    entries: Vec<NamedColor>,
    tree: KdTree<IndexedPoint>,
    fallback: bool,
}

impl ColorMatcher {
    /// Charge une palette JSON. N'échoue jamais : toute erreur de
    /// lecture ou de parsing déclenche le repli sur la palette intégrée,
    /// signalé par [`ColorMatcher::is_fallback`].
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(entries) if !entries.is_empty() => {
                log::info!(
                    "Palette chargée : {} couleurs depuis {}",
                    entries.len(),
                    path.display()
                );
                Self::build(entries, false)
            }
            Ok(_) => {
                log::warn!(
                    "Palette vide dans {}, repli sur la palette intégrée",
                    path.display()
                );
                Self::builtin()
            }
            Err(err) => {
                log::warn!("Palette illisible ({err:#}), repli sur la palette intégrée");
                Self::builtin()
            }
        }
    }

    /// Construit l'index depuis des entrées déjà chargées. Une liste vide
    /// déclenche le repli intégré.
    #[must_use]
    pub fn new(entries: Vec<NamedColor>) -> Self {
        if entries.is_empty() {
            return Self::builtin();
        }
        Self::build(entries, false)
    }

    /// Palette intégrée de 13 couleurs de base.
    #[must_use]
    pub fn builtin() -> Self {
        Self::build(fallback_entries(), true)
    }

    fn try_load(path: &Path) -> anyhow::Result<Vec<NamedColor>> {
        use anyhow::Context;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("lecture de {}", path.display()))?;
        let file: PaletteFile =
            serde_json::from_str(&text).with_context(|| format!("JSON de {}", path.display()))?;
        Ok(file.colors)
    }

    fn build(entries: Vec<NamedColor>, fallback: bool) -> Self {
        let points = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| IndexedPoint {
                index,
                point: [
                    i32::from(entry.rgb.0),
                    i32::from(entry.rgb.1),
                    i32::from(entry.rgb.2),
                ],
            })
            .collect();
        Self {
            tree: KdTree::build(points),
            entries,
            fallback,
        }
    }

    /// True si la palette active est le repli intégré.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Nombre d'entrées de la palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True si la palette est vide (impossible après construction, les
    /// listes vides déclenchent le repli).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices et distances des k plus proches entrées, distances
    /// croissantes, égalités départagées par ordre d'apparition.
    fn ranked(&self, rgb: Rgb, k: usize) -> Vec<(usize, f64)> {
        if self.entries.is_empty() || k == 0 {
            return Vec::new();
        }
        let query = [i32::from(rgb.0), i32::from(rgb.1), i32::from(rgb.2)];
        let fetch = (k + TIE_PAD).min(self.entries.len());

        let mut hits: Vec<(usize, i32)> = self
            .tree
            .nearests(&query, fetch)
            .into_iter()
            .map(|found| (found.item.index, found.squared_distance))
            .collect();
        // Comparaison entière exacte : distance au carré, puis index.
        hits.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        hits.truncate(k);

        hits.into_iter()
            .map(|(index, d2)| (index, f64::from(d2).sqrt()))
            .collect()
    }

    fn to_match(&self, input: Rgb, index: usize, distance: f64) -> MatchResult {
        let entry = &self.entries[index];
        let confidence = (1.0 - distance / MAX_RGB_DISTANCE).max(0.0) * 100.0;
        MatchResult {
            name: entry.name.clone(),
            hex: entry.hex.clone(),
            rgb: entry.rgb,
            input_rgb: input,
            distance,
            confidence: (confidence * 10.0).round() / 10.0,
        }
    }

    /// Entrée la plus proche au sens euclidien RGB.
    ///
    /// `None` seulement pour une palette vide, ce que la construction
    /// empêche.
    #[must_use]
    pub fn find_closest(&self, r: u8, g: u8, b: u8) -> Option<MatchResult> {
        let input = (r, g, b);
        self.ranked(input, 1)
            .first()
            .map(|&(index, distance)| self.to_match(input, index, distance))
    }

    /// Les k entrées les plus proches, distances croissantes. `k` est
    /// borné à la taille de la palette.
    ///
    /// # Example
    /// ```
    /// use tn_palette::ColorMatcher;
    /// let matcher = ColorMatcher::builtin();
    /// let top = matcher.find_top_k(250, 5, 5, 3);
    /// assert_eq!(top.len(), 3);
    /// assert_eq!(top[0].name, "Red");
    /// assert!(top[0].distance <= top[1].distance);
    /// ```
    #[must_use]
    pub fn find_top_k(&self, r: u8, g: u8, b: u8, k: usize) -> Vec<MatchResult> {
        let input = (r, g, b);
        self.ranked(input, k)
            .into_iter()
            .map(|(index, distance)| self.to_match(input, index, distance))
            .collect()
    }

    /// Recherche exacte par nom, insensible à la casse ASCII. Première
    /// occurrence retenue ; l'absence n'est pas une erreur.
    #[must_use]
    pub fn search_by_name(&self, name: &str) -> Option<&NamedColor> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Toutes les entrées, dans l'ordre de chargement.
    #[must_use]
    pub fn all(&self) -> &[NamedColor] {
        &self.entries
    }
}

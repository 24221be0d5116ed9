//! Extraction des couleurs dominantes par k-means multi-essais.
//!
//! Le pipeline suit trois étapes : sous-échantillonnage uniforme sans
//! remise au-delà du plafond, clustering de Lloyd en RGB 3-D avec
//! plusieurs initialisations aléatoires (meilleure inertie retenue), puis
//! résumé centroïde + poids de population. Tout le tirage passe par un
//! RNG semé : même buffer + même config ⇒ même résultat.

use serde::Serialize;
use tn_core::{ExtractConfig, PixelBuffer, Rgb};

/// Seuil de convergence : déplacement maximal d'un centroïde entre deux
/// itérations, par composante.
const CONVERGENCE_EPS: f64 = 1e-4;

/// Une couleur dominante : centroïde tronqué + poids de population.
///
/// Le pourcentage porte sur les pixels *échantillonnés* (pas l'image
/// entière quand le plafond s'applique), arrondi à une décimale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DominantColor {
    /// Centroïde du cluster, composantes tronquées vers l'entier.
    pub rgb: Rgb,
    /// Pourcentage des pixels échantillonnés assignés au cluster.
    pub percentage: f64,
    /// Nombre brut de pixels assignés.
    pub count: usize,
}

/// Résultat d'un essai de Lloyd.
struct Trial {
    centroids: Vec<[f64; 3]>,
    assignment: Vec<usize>,
    inertia: f64,
}

/// Extrait les couleurs dominantes d'un buffer.
///
/// Résultats triés par pourcentage décroissant, égalités départagées par
/// index de cluster croissant. Buffer vide ou `clusters == 0` : séquence
/// vide, pas une erreur.
///
/// # Example
/// ```
/// use tn_core::{ExtractConfig, PixelBuffer};
/// use tn_extract::dominant::extract_dominant;
/// let mut buf = PixelBuffer::new(8, 8);
/// for y in 0..8 {
///     for x in 0..8 {
///         buf.set_pixel(x, y, (40, 80, 120));
///     }
/// }
/// let config = ExtractConfig { clusters: 1, ..ExtractConfig::default() };
/// let palette = extract_dominant(&buf, &config);
/// assert_eq!(palette[0].rgb, (40, 80, 120));
/// assert_eq!(palette[0].percentage, 100.0);
/// ```
#[must_use]
pub fn extract_dominant(buf: &PixelBuffer, config: &ExtractConfig) -> Vec<DominantColor> {
    if buf.is_empty() || config.clusters == 0 {
        return Vec::new();
    }

    let mut rng = fastrand::Rng::with_seed(config.seed);
    let pixels = sample_pixels(buf, config.sample_cap, &mut rng);
    let k = config.clusters.min(pixels.len());
    let trials = config.trials.max(1);
    let max_iter = config.max_iter.max(1);

    log::debug!(
        "extraction dominante : {} pixels échantillonnés (sur {}), k={k}, {trials} essais",
        pixels.len(),
        buf.pixel_count()
    );

    let mut best: Option<Trial> = None;
    for _ in 0..trials {
        let trial = run_trial(&pixels, k, max_iter, &mut rng);
        let better = match &best {
            // Inertie strictement plus faible : le premier essai gagne
            // les égalités.
            Some(current) => trial.inertia < current.inertia,
            None => true,
        };
        if better {
            best = Some(trial);
        }
    }

    best.map_or_else(Vec::new, |trial| summarize(&trial, pixels.len()))
}

/// Tous les pixels, ou un tirage uniforme sans remise de `cap` pixels.
/// `cap == 0` désactive le plafond.
fn sample_pixels(buf: &PixelBuffer, cap: usize, rng: &mut fastrand::Rng) -> Vec<[f64; 3]> {
    let total = buf.pixel_count();
    let at = |i: usize| {
        let p = &buf.data[i * 3..i * 3 + 3];
        [f64::from(p[0]), f64::from(p[1]), f64::from(p[2])]
    };

    if cap == 0 || total <= cap {
        (0..total).map(at).collect()
    } else {
        rng.choose_multiple(0..total, cap)
            .into_iter()
            .map(at)
            .collect()
    }
}

/// Index du centroïde le plus proche ; égalité → premier index.
fn nearest_centroid(pixel: &[f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_d2 = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d2 = squared_distance(pixel, c);
        if d2 < best_d2 {
            best = i;
            best_d2 = d2;
        }
    }
    best
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Un essai de Lloyd complet : init aléatoire, itérations, inertie finale.
fn run_trial(pixels: &[[f64; 3]], k: usize, max_iter: u32, rng: &mut fastrand::Rng) -> Trial {
    let mut centroids: Vec<[f64; 3]> = rng
        .choose_multiple(0..pixels.len(), k)
        .into_iter()
        .map(|i| pixels[i])
        .collect();
    let mut assignment = vec![0usize; pixels.len()];

    for _ in 0..max_iter {
        for (slot, pixel) in assignment.iter_mut().zip(pixels) {
            *slot = nearest_centroid(pixel, &centroids);
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (&cluster, pixel) in assignment.iter().zip(pixels) {
            for c in 0..3 {
                sums[cluster][c] += pixel[c];
            }
            counts[cluster] += 1;
        }

        let mut shift = 0.0f64;
        for i in 0..k {
            let next = if counts[i] == 0 {
                // Cluster vide : re-semé sur un pixel tiré au sort.
                pixels[rng.usize(0..pixels.len())]
            } else {
                let n = counts[i] as f64;
                [sums[i][0] / n, sums[i][1] / n, sums[i][2] / n]
            };
            for c in 0..3 {
                shift = shift.max((next[c] - centroids[i][c]).abs());
            }
            centroids[i] = next;
        }

        if shift < CONVERGENCE_EPS {
            break;
        }
    }

    // Assignation finale cohérente avec les centroïdes retenus.
    for (slot, pixel) in assignment.iter_mut().zip(pixels) {
        *slot = nearest_centroid(pixel, &centroids);
    }
    let inertia = assignment
        .iter()
        .zip(pixels)
        .map(|(&cluster, pixel)| squared_distance(pixel, &centroids[cluster]))
        .sum();

    Trial {
        centroids,
        assignment,
        inertia,
    }
}

/// Centroïdes tronqués + poids, triés par pourcentage décroissant.
fn summarize(trial: &Trial, total: usize) -> Vec<DominantColor> {
    let mut counts = vec![0usize; trial.centroids.len()];
    for &cluster in &trial.assignment {
        counts[cluster] += 1;
    }

    let mut results: Vec<DominantColor> = trial
        .centroids
        .iter()
        .zip(&counts)
        .map(|(centroid, &count)| {
            let percentage = count as f64 / total as f64 * 100.0;
            DominantColor {
                rgb: (centroid[0] as u8, centroid[1] as u8, centroid[2] as u8),
                percentage: (percentage * 10.0).round() / 10.0,
                count,
            }
        })
        .collect();

    // Tri stable : les égalités gardent l'ordre des clusters d'origine.
    results.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: Rgb) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.set_pixel(x, y, rgb);
            }
        }
        buf
    }

    fn halves(width: u32, height: u32, left: Rgb, right: Rgb) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.set_pixel(x, y, if x < width / 2 { left } else { right });
            }
        }
        buf
    }

    #[test]
    fn empty_buffer_yields_empty_palette() {
        let buf = PixelBuffer::new(0, 0);
        assert!(extract_dominant(&buf, &ExtractConfig::default()).is_empty());
    }

    #[test]
    fn zero_clusters_yield_empty_palette() {
        let buf = solid(4, 4, (9, 9, 9));
        let config = ExtractConfig {
            clusters: 0,
            ..ExtractConfig::default()
        };
        assert!(extract_dominant(&buf, &config).is_empty());
    }

    #[test]
    fn solid_image_concentrates_in_one_cluster() {
        let buf = solid(4, 4, (10, 200, 60));
        let config = ExtractConfig {
            clusters: 3,
            ..ExtractConfig::default()
        };
        let palette = extract_dominant(&buf, &config);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette[0].rgb, (10, 200, 60));
        assert_eq!(palette[0].percentage, 100.0);
        assert_eq!(palette[0].count, 16);
        assert_eq!(palette[1].count + palette[2].count, 0);
    }

    #[test]
    fn two_region_image_splits_exactly() {
        let buf = halves(8, 8, (200, 0, 0), (0, 0, 200));
        let config = ExtractConfig {
            clusters: 2,
            ..ExtractConfig::default()
        };
        let palette = extract_dominant(&buf, &config);
        assert_eq!(palette.len(), 2);

        let mut rgbs: Vec<Rgb> = palette.iter().map(|c| c.rgb).collect();
        rgbs.sort_unstable();
        assert_eq!(rgbs, vec![(0, 0, 200), (200, 0, 0)]);
        for color in &palette {
            assert_eq!(color.percentage, 50.0);
            assert_eq!(color.count, 32);
        }
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        // Quatre quadrants de couleurs éloignées.
        let mut buf = PixelBuffer::new(10, 10);
        for y in 0..10 {
            for x in 0..10 {
                let rgb = match (x < 5, y < 5) {
                    (true, true) => (250, 10, 10),
                    (false, true) => (10, 250, 10),
                    (true, false) => (10, 10, 250),
                    (false, false) => (240, 240, 240),
                };
                buf.set_pixel(x, y, rgb);
            }
        }
        let config = ExtractConfig {
            clusters: 4,
            ..ExtractConfig::default()
        };
        let palette = extract_dominant(&buf, &config);
        let sum: f64 = palette.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() <= 4.0 * 0.05, "sum was {sum}");
    }

    #[test]
    fn same_seed_is_deterministic() {
        let buf = halves(20, 20, (180, 30, 90), (20, 160, 200));
        let config = ExtractConfig {
            clusters: 5,
            sample_cap: 150, // force le sous-échantillonnage
            ..ExtractConfig::default()
        };
        let first = extract_dominant(&buf, &config);
        let second = extract_dominant(&buf, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_may_sample_differently() {
        let buf = halves(20, 20, (180, 30, 90), (20, 160, 200));
        let base = ExtractConfig {
            clusters: 2,
            sample_cap: 150,
            ..ExtractConfig::default()
        };
        let other = ExtractConfig { seed: 7, ..base.clone() };
        // Les deux runs restent des partitions valides de 150 pixels.
        let a = extract_dominant(&buf, &base);
        let b = extract_dominant(&buf, &other);
        assert_eq!(a.iter().map(|c| c.count).sum::<usize>(), 150);
        assert_eq!(b.iter().map(|c| c.count).sum::<usize>(), 150);
    }

    #[test]
    fn results_sorted_by_descending_percentage() {
        let mut buf = PixelBuffer::new(9, 1);
        // 6 pixels rouges, 3 bleus.
        for x in 0..9 {
            buf.set_pixel(x, 0, if x < 6 { (220, 10, 10) } else { (10, 10, 220) });
        }
        let config = ExtractConfig {
            clusters: 2,
            ..ExtractConfig::default()
        };
        let palette = extract_dominant(&buf, &config);
        assert!(palette[0].percentage >= palette[1].percentage);
        assert_eq!(palette[0].rgb, (220, 10, 10));
        assert_eq!(palette[0].count, 6);
    }

    #[test]
    fn cluster_count_clamps_to_sample_size() {
        let buf = solid(2, 1, (50, 60, 70));
        let config = ExtractConfig {
            clusters: 10,
            ..ExtractConfig::default()
        };
        let palette = extract_dominant(&buf, &config);
        assert_eq!(palette.len(), 2, "k borné au nombre de pixels");
    }
}

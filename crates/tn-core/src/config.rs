use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration du moteur, chargeable depuis un fichier TOML.
///
/// Chaque champ a une valeur par défaut saine : un fichier vide est une
/// configuration valide.
///
/// # Example
/// ```
/// use tn_core::config::EngineConfig;
/// let config = EngineConfig::default();
/// assert!(config.palette_path.is_none());
/// assert_eq!(config.extract.clusters, 5);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Chemin vers la palette nommée (JSON). None = palette intégrée.
    #[serde(default)]
    pub palette_path: Option<PathBuf>,

    /// Paramètres de l'extraction de couleurs dominantes.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Paramètres du clustering k-means de l'extracteur.
///
/// # Example
/// ```
/// use tn_core::config::ExtractConfig;
/// let cfg = ExtractConfig::default();
/// assert_eq!((cfg.clusters, cfg.sample_cap, cfg.seed), (5, 10_000, 42));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Nombre de couleurs dominantes à extraire.
    #[serde(default = "default_clusters")]
    pub clusters: usize,
    /// Plafond d'échantillonnage. Au-delà, tirage uniforme sans remise.
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,
    /// Graine du RNG. Même buffer + même config ⇒ même résultat.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Nombre d'initialisations aléatoires, meilleure inertie retenue.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Nombre maximal d'itérations de Lloyd par essai.
    #[serde(default = "default_max_iter")]
    pub max_iter: u32,
}

fn default_clusters() -> usize {
    5
}

fn default_sample_cap() -> usize {
    10_000
}

fn default_seed() -> u64 {
    42
}

fn default_trials() -> u32 {
    10
}

fn default_max_iter() -> u32 {
    100
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            clusters: default_clusters(),
            sample_cap: default_sample_cap(),
            seed: default_seed(),
            trials: default_trials(),
            max_iter: default_max_iter(),
        }
    }
}

impl ExtractConfig {
    /// Ramène les paramètres dans leurs bornes utilisables.
    pub fn clamp_all(&mut self) {
        self.trials = self.trials.max(1);
        self.max_iter = self.max_iter.max(1);
    }
}

/// Charge la configuration depuis un fichier TOML.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let mut config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("TOML invalide : {}", path.display()))?;
    config.extract.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: EngineConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.extract.clusters, 5);
        assert_eq!(config.extract.sample_cap, 10_000);
        assert_eq!(config.extract.seed, 42);
        assert_eq!(config.extract.trials, 10);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: EngineConfig =
            toml::from_str("[extract]\nclusters = 8\n").expect("partial config should parse");
        assert_eq!(config.extract.clusters, 8);
        assert_eq!(config.extract.seed, 42);
    }

    #[test]
    fn clamp_all_restores_floors() {
        let mut cfg = ExtractConfig {
            trials: 0,
            max_iter: 0,
            ..ExtractConfig::default()
        };
        cfg.clamp_all();
        assert_eq!(cfg.trials, 1);
        assert_eq!(cfg.max_iter, 1);
    }
}

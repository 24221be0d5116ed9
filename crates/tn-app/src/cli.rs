use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// teinte — échantillonnage, nommage et extraction de palettes couleur.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Palette nommée (JSON). Défaut : palette intégrée de 13 couleurs.
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sortie JSON au lieu du texte.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Toutes les représentations et harmonies d'une couleur.
    Convert {
        /// Couleur : `#RGB`, `#RRGGBB` ou `r,g,b`.
        color: String,
    },

    /// Couleurs nommées les plus proches d'une couleur, ou recherche
    /// exacte par nom.
    Name {
        /// Couleur (`#RGB`, `#RRGGBB`, `r,g,b`) ou nom ("Orange").
        color: String,

        /// Nombre de correspondances retournées.
        #[arg(short, long, default_value_t = 1)]
        k: usize,
    },

    /// Liste les entrées de la palette active, dans l'ordre de chargement.
    List,

    /// Échantillonne un point ou une région d'une image.
    Pick {
        /// Image (PNG, JPEG, BMP, GIF).
        image: PathBuf,

        /// Coordonnée X du point.
        #[arg(short)]
        x: u32,

        /// Coordonnée Y du point.
        #[arg(short)]
        y: u32,

        /// Rayon de la fenêtre de moyenne. 0 = pixel exact.
        #[arg(short, long, default_value_t = 0)]
        radius: u32,
    },

    /// Couleurs dominantes d'une image par clustering k-means.
    Dominant {
        /// Image (PNG, JPEG, BMP, GIF).
        image: PathBuf,

        /// Nombre de clusters. Défaut : valeur de la config (5).
        #[arg(short, long)]
        k: Option<usize>,

        /// Plafond d'échantillonnage. 0 = tous les pixels.
        #[arg(long)]
        sample_cap: Option<usize>,

        /// Graine du RNG, pour des résultats reproductibles.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Histogramme par canal d'une image.
    Histo {
        /// Image (PNG, JPEG, BMP, GIF).
        image: PathBuf,

        /// Nombre de classes par canal.
        #[arg(long, default_value_t = tn_extract::DEFAULT_HISTOGRAM_BINS)]
        bins: usize,
    },

    /// Ratio de contraste WCAG entre deux couleurs.
    Contrast {
        /// Première couleur.
        color_a: String,
        /// Seconde couleur.
        color_b: String,
    },

    /// Simule la perception d'une couleur par un daltonien.
    Simulate {
        /// Couleur : `#RGB`, `#RRGGBB` ou `r,g,b`.
        color: String,

        /// protanopia, deuteranopia, tritanopia ou achromatopsia.
        kind: String,
    },
}

/// Parse une couleur CLI : code hex (`#RGB`, `#RRGGBB`) ou triplet `r,g,b`.
///
/// # Errors
/// Returns an error for any other shape.
pub fn parse_color(text: &str) -> anyhow::Result<(u8, u8, u8)> {
    if text.contains(',') {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            anyhow::bail!("Triplet RGB attendu sous la forme r,g,b : {text}");
        }
        let channel = |raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| anyhow::anyhow!("Canal RGB invalide (0-255 attendu) : {raw}"))
        };
        return Ok((channel(parts[0])?, channel(parts[1])?, channel(parts[2])?));
    }
    Ok(tn_core::convert::hex_to_rgb(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_triplet_forms() {
        assert_eq!(parse_color("#FFA500").expect("hex"), (255, 165, 0));
        assert_eq!(parse_color("F80").expect("short hex"), (255, 136, 0));
        assert_eq!(parse_color("255, 165, 0").expect("triplet"), (255, 165, 0));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("300,0,0").is_err());
        assert!(parse_color("#12Z456").is_err());
    }
}

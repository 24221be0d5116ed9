use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use tn_core::blindness::simulate_named;
use tn_core::config::{load_config, EngineConfig};
use tn_core::contrast::{contrast_ratio, WcagRating};
use tn_core::convert::{all_formats, rgb_to_hex};
use tn_core::harmony::{analogous, complementary, split_complementary, triadic};
use tn_core::PixelBuffer;
use tn_palette::ColorMatcher;

pub mod cli;

use cli::{parse_color, Cli, Command};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis la palette
    let config = resolve_config(&cli)?;
    let matcher = resolve_matcher(&cli, &config);

    // 4. Exécuter la sous-commande
    match &cli.command {
        Command::Convert { color } => run_convert(color, cli.json),
        Command::Name { color, k } => run_name(&matcher, color, *k, cli.json),
        Command::List => run_list(&matcher, cli.json),
        Command::Histo { image, bins } => run_histo(image, *bins, cli.json),
        Command::Pick {
            image,
            x,
            y,
            radius,
        } => run_pick(&matcher, image, *x, *y, *radius, cli.json),
        Command::Dominant {
            image,
            k,
            sample_cap,
            seed,
        } => {
            let mut extract = config.extract.clone();
            if let Some(k) = k {
                extract.clusters = *k;
            }
            if let Some(cap) = sample_cap {
                extract.sample_cap = *cap;
            }
            if let Some(seed) = seed {
                extract.seed = *seed;
            }
            run_dominant(&matcher, image, &extract, cli.json)
        }
        Command::Contrast { color_a, color_b } => run_contrast(color_a, color_b, cli.json),
        Command::Simulate { color, kind } => run_simulate(color, kind, cli.json),
    }
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => load_config(path),
        None => Ok(EngineConfig::default()),
    }
}

fn resolve_matcher(cli: &Cli, config: &EngineConfig) -> ColorMatcher {
    let path = cli.palette.as_ref().or(config.palette_path.as_ref());
    match path {
        Some(path) => ColorMatcher::from_path(path),
        None => ColorMatcher::builtin(),
    }
}

/// Charge une image disque vers un buffer RGB 8 bits.
fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_raw(rgb.into_raw(), width, height)?)
}

fn run_convert(color: &str, as_json: bool) -> Result<()> {
    let (r, g, b) = parse_color(color)?;
    let formats = all_formats(r, g, b);
    let comp = complementary(r, g, b);

    if as_json {
        let payload = json!({
            "formats": formats,
            "harmony": {
                "complementary": comp,
                "triadic": triadic(r, g, b),
                "analogous": analogous(r, g, b),
                "split_complementary": split_complementary(r, g, b),
            },
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("RGB   : {:?}", formats.rgb);
    println!("HEX   : {}", formats.hex);
    println!("HSV   : {:?}", formats.hsv);
    println!("HSL   : {:?}", formats.hsl);
    println!("CMYK  : {:?}", formats.cmyk);
    println!("Complémentaire : {}", rgb_to_hex(comp.0, comp.1, comp.2));
    for (label, pair) in [
        ("Triadiques", triadic(r, g, b)),
        ("Analogues", analogous(r, g, b)),
        ("Compl. divisées", split_complementary(r, g, b)),
    ] {
        let hexes: Vec<String> = pair.iter().map(|c| rgb_to_hex(c.0, c.1, c.2)).collect();
        println!("{label} : {}", hexes.join(" "));
    }
    Ok(())
}

fn run_name(matcher: &ColorMatcher, color: &str, k: usize, as_json: bool) -> Result<()> {
    // Un argument qui ne parse pas comme couleur est traité comme un nom.
    let Ok((r, g, b)) = parse_color(color) else {
        let Some(entry) = matcher.search_by_name(color) else {
            anyhow::bail!("Couleur inconnue dans la palette : {color}");
        };
        if as_json {
            println!("{}", serde_json::to_string_pretty(entry)?);
        } else {
            println!("{} ({}) {:?}", entry.name, entry.hex, entry.rgb);
        }
        return Ok(());
    };

    let matches = matcher.find_top_k(r, g, b, k.max(1));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    for hit in matches {
        println!(
            "{} ({}) — distance {:.2}, confiance {:.1} %",
            hit.name, hit.hex, hit.distance, hit.confidence
        );
    }
    Ok(())
}

fn run_list(matcher: &ColorMatcher, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(matcher.all())?);
        return Ok(());
    }

    if matcher.is_fallback() {
        println!("(palette intégrée de secours)");
    }
    for entry in matcher.all() {
        println!("{} ({}) {:?}", entry.name, entry.hex, entry.rgb);
    }
    Ok(())
}

fn run_histo(image: &Path, bins: usize, as_json: bool) -> Result<()> {
    let buf = load_image(image)?;
    let hist = tn_extract::histogram(&buf, bins);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&hist)?);
        return Ok(());
    }

    for (label, counts) in [("R", &hist.red), ("G", &hist.green), ("B", &hist.blue)] {
        let line: Vec<String> = counts.iter().map(ToString::to_string).collect();
        println!("{label} : {}", line.join(" "));
    }
    Ok(())
}

fn run_pick(
    matcher: &ColorMatcher,
    image: &Path,
    x: u32,
    y: u32,
    radius: u32,
    as_json: bool,
) -> Result<()> {
    let buf = load_image(image)?;
    let Some((r, g, b)) = tn_extract::average_in_region(&buf, x, y, radius) else {
        anyhow::bail!(
            "Coordonnées ({x}, {y}) hors de l'image ({}×{})",
            buf.width,
            buf.height
        );
    };

    let formats = all_formats(r, g, b);
    let closest = matcher.find_closest(r, g, b);

    if as_json {
        let payload = json!({ "formats": formats, "closest": closest });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Couleur : {} {:?}", formats.hex, formats.rgb);
    if let Some(hit) = closest {
        println!("Nom le plus proche : {} (confiance {:.1} %)", hit.name, hit.confidence);
    }
    Ok(())
}

fn run_dominant(
    matcher: &ColorMatcher,
    image: &Path,
    extract: &tn_core::ExtractConfig,
    as_json: bool,
) -> Result<()> {
    let buf = load_image(image)?;
    let palette = tn_extract::extract_dominant(&buf, extract);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&palette)?);
        return Ok(());
    }

    for color in palette {
        let (r, g, b) = color.rgb;
        let name = matcher
            .find_closest(r, g, b)
            .map_or_else(String::new, |hit| format!(" ~ {}", hit.name));
        println!(
            "{} {:?} — {:.1} % ({} px){name}",
            rgb_to_hex(r, g, b),
            color.rgb,
            color.percentage,
            color.count
        );
    }
    Ok(())
}

fn run_contrast(color_a: &str, color_b: &str, as_json: bool) -> Result<()> {
    let a = parse_color(color_a)?;
    let b = parse_color(color_b)?;
    let ratio = contrast_ratio(a, b);
    let rating = WcagRating::of(ratio);

    if as_json {
        let payload = json!({ "ratio": ratio, "rating": rating });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Contraste : {ratio:.2}:1 — {rating}");
    Ok(())
}

fn run_simulate(color: &str, kind: &str, as_json: bool) -> Result<()> {
    let (r, g, b) = parse_color(color)?;
    // Politique de passage : un type inconnu rend la couleur inchangée.
    let (sr, sg, sb) = simulate_named(r, g, b, kind);

    if as_json {
        let payload = json!({ "input": (r, g, b), "simulated": (sr, sg, sb) });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{kind} : {} {:?}", rgb_to_hex(sr, sg, sb), (sr, sg, sb));
    Ok(())
}

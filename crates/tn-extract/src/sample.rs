//! Échantillonnage ponctuel et régional d'un buffer de pixels.
//!
//! Toutes les fonctions prennent le buffer en paramètre explicite : aucun
//! état n'est retenu entre deux appels. Hors bornes = `None`, jamais de
//! panique.

use serde::Serialize;
use tn_core::{PixelBuffer, Rgb};

/// Nombre de classes par canal de l'histogramme par défaut.
pub const DEFAULT_HISTOGRAM_BINS: usize = 16;

/// Couleur au point (x, y), ou `None` hors de l'image.
///
/// # Example
/// ```
/// use tn_core::PixelBuffer;
/// use tn_extract::sample::color_at;
/// let mut buf = PixelBuffer::new(4, 4);
/// buf.set_pixel(2, 1, (255, 165, 0));
/// assert_eq!(color_at(&buf, 2, 1), Some((255, 165, 0)));
/// assert_eq!(color_at(&buf, 4, 0), None);
/// ```
#[must_use]
pub fn color_at(buf: &PixelBuffer, x: u32, y: u32) -> Option<Rgb> {
    (x < buf.width && y < buf.height).then(|| buf.pixel(x, y))
}

/// Couleur moyenne dans une fenêtre autour de (x, y).
///
/// La fenêtre est la boîte alignée aux axes `[x−radius, x+radius] ×
/// [y−radius, y+radius]` bornée à l'image — une boîte, pas un disque :
/// c'est le comportement observable historique, préservé tel quel. La
/// moyenne par canal est tronquée vers l'entier. `None` quand la fenêtre
/// bornée est vide.
///
/// # Example
/// ```
/// use tn_core::PixelBuffer;
/// use tn_extract::sample::average_in_region;
/// let mut buf = PixelBuffer::new(1, 1);
/// buf.set_pixel(0, 0, (9, 18, 27));
/// // Rayon 0 sur un coin : la fenêtre dégénère en ce seul pixel.
/// assert_eq!(average_in_region(&buf, 0, 0, 0), Some((9, 18, 27)));
/// assert_eq!(average_in_region(&buf, 5, 0, 1), None);
/// ```
#[must_use]
pub fn average_in_region(buf: &PixelBuffer, x: u32, y: u32, radius: u32) -> Option<Rgb> {
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    let x1 = x.saturating_add(radius).saturating_add(1).min(buf.width);
    let y1 = y.saturating_add(radius).saturating_add(1).min(buf.height);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let mut sum = [0u64; 3];
    for py in y0..y1 {
        for px in x0..x1 {
            let (r, g, b) = buf.pixel(px, py);
            sum[0] += u64::from(r);
            sum[1] += u64::from(g);
            sum[2] += u64::from(b);
        }
    }

    let count = u64::from(x1 - x0) * u64::from(y1 - y0);
    Some((
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    ))
}

/// Histogramme indépendant par canal sur [0,256).
///
/// # Example
/// ```
/// use tn_core::PixelBuffer;
/// use tn_extract::sample::{histogram, DEFAULT_HISTOGRAM_BINS};
/// let buf = PixelBuffer::new(2, 2);
/// let h = histogram(&buf, DEFAULT_HISTOGRAM_BINS);
/// assert_eq!(h.red.len(), 16);
/// assert_eq!(h.red[0], 4); // tout le buffer est noir
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelHistogram {
    /// Nombre de classes par canal.
    pub bins: usize,
    /// Comptes du canal rouge.
    pub red: Vec<u64>,
    /// Comptes du canal vert.
    pub green: Vec<u64>,
    /// Comptes du canal bleu.
    pub blue: Vec<u64>,
}

/// Compte les pixels de chaque canal dans `bins` classes égales.
///
/// `bins == 0` retourne des canaux vides.
#[must_use]
pub fn histogram(buf: &PixelBuffer, bins: usize) -> ChannelHistogram {
    let mut hist = ChannelHistogram {
        bins,
        red: vec![0; bins],
        green: vec![0; bins],
        blue: vec![0; bins],
    };
    if bins == 0 {
        return hist;
    }

    for pixel in buf.data.chunks_exact(3) {
        hist.red[pixel[0] as usize * bins / 256] += 1;
        hist.green[pixel[1] as usize * bins / 256] += 1;
        hist.blue[pixel[2] as usize * bins / 256] += 1;
    }
    hist
}

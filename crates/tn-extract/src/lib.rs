/// Sampling and dominant-color extraction for teinte.
///
/// Two independent utilities over an externally supplied [`tn_core::PixelBuffer`]:
/// point/region sampling with per-channel histograms, and a k-means
/// summarization of an image's color content. Both are pure functions of
/// their inputs; the extractor's randomness is fully determined by the
/// seed in [`tn_core::ExtractConfig`].
///
/// Extraction is CPU-bound and may be long on large images: hosts with an
/// interactive thread should run it on a worker and discard the result to
/// cancel.

pub mod dominant;
pub mod sample;

pub use dominant::{extract_dominant, DominantColor};
pub use sample::{
    average_in_region, color_at, histogram, ChannelHistogram, DEFAULT_HISTOGRAM_BINS,
};

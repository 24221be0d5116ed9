use thiserror::Error;

/// Errors originating from the core module.
///
/// The taxonomy is deliberately narrow: most "not found" conditions in the
/// engine are expected and surface as `Option::None`, not as errors.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed hexadecimal color string.
    #[error("Code hexadécimal invalide : {input}")]
    InvalidHex {
        /// The rejected input, as received.
        input: String,
    },

    /// Raw pixel data does not match the declared dimensions.
    #[error("Taille de buffer invalide : attendu {expected} octets, reçu {actual}")]
    BufferSize {
        /// Expected byte length (width × height × 3).
        expected: usize,
        /// Actual byte length received.
        actual: usize,
    },
}

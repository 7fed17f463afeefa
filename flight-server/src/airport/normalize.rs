//! Text normalization for airport matching and cache keys.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize free text for matching.
///
/// Lowercases, strips diacritics (NFD decomposition minus combining marks)
/// and drops everything that is not an ASCII letter, digit or whitespace.
///
/// ```
/// use flight_server::airport::normalize;
///
/// assert_eq!(normalize("São Paulo!"), "sao paulo");
/// assert_eq!(normalize("CÓRDOBA"), "cordoba");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Accent-strip and case-fold text for phrase comparison.
///
/// Canonical decomposition (NFD), combining marks dropped, then lowercased.
/// Idempotent. Structured-code matching never goes through here; codes carry
/// no diacritics by construction and are matched case-insensitively on the
/// raw text.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

//! Slug derivation for legislator names.
//!
//! A slug is lowercase ASCII `[a-z0-9]` runs joined by single hyphens, with no
//! leading or trailing hyphen.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive a stable, URL-safe identifier from a name.
///
/// Lowercases, decomposes (NFD) and drops combining marks, then collapses every
/// run of characters outside `[a-z0-9]` into one hyphen.
///
/// ```
/// assert_eq!(pv_text::slugify("Jean-François O'Connor"), "jean-francois-o-connor");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics_and_punctuation() {
        assert_eq!(slugify("Jean-François O'Connor"), "jean-francois-o-connor");
    }

    #[test]
    fn test_trims_edges_and_collapses_runs() {
        assert_eq!(slugify("  --Marie   Éloïse--  "), "marie-eloise");
        assert_eq!(slugify("A  &  B"), "a-b");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(slugify("Louis XIV 2e"), "louis-xiv-2e");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("'-- !"), "");
    }

    #[test]
    fn test_non_latin_letters_become_separators() {
        // No decomposition exists for these, so they behave like punctuation.
        assert_eq!(slugify("Søren Kierkegård"), "s-ren-kierkegard");
    }

    #[test]
    fn test_uppercase_accented() {
        assert_eq!(slugify("ÉRIC CIOTTI"), "eric-ciotti");
    }
}

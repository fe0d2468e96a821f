//! Shared text utilities for `parlvotes`
//!
//! Used natively by the data-access layer and, compiled to WASM, by the
//! browser front end so both sides derive identical slugs and orderings.

use wasm_bindgen::prelude::*;

mod collate;
mod date;
mod slug;

pub use collate::{collate_fr, fold};
pub use date::format_date_fr;
pub use slug::slugify;

/// Derive a URL-safe slug from a display name (WASM binding).
///
/// For native Rust code, use [`slugify`] instead.
#[wasm_bindgen(js_name = "slugify")]
#[must_use]
pub fn slugify_js(name: &str) -> String {
    slugify(name)
}

/// Format an ISO date as a long French date (WASM binding).
#[wasm_bindgen(js_name = "formatDateFr")]
#[must_use]
pub fn format_date_fr_js(date: &str) -> String {
    format_date_fr(date)
}

/// Compare two names with French collation (WASM binding).
///
/// Returns -1, 0 or 1 like `String.prototype.localeCompare`.
#[wasm_bindgen(js_name = "collateFr")]
#[must_use]
pub fn collate_fr_js(a: &str, b: &str) -> i32 {
    collate_fr(a, b) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bindings_delegate() {
        assert_eq!(slugify_js("Élise Lucet"), slugify("Élise Lucet"));
        assert_eq!(format_date_fr_js("2024-03-05"), "5 mars 2024");
        assert_eq!(collate_fr_js("abc", "abd"), -1);
        assert_eq!(collate_fr_js("b", "a"), 1);
        assert_eq!(collate_fr_js("same", "same"), 0);
    }
}

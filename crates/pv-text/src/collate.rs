//! Diacritic folding and French-style name ordering.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase `text` and strip combining diacritical marks.
///
/// Everything else (spaces, punctuation, non-Latin letters) is kept.
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Order two strings the way a French reader expects names to be sorted.
///
/// Primary comparison ignores case and accents (`"Élise" < "Emma"`). Ties are
/// broken by accents, then by case with lowercase first (`"dupont" < "Dupont"`),
/// then by code point so the result is a total order.
#[must_use]
pub fn collate_fr(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn case_pattern(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.chars().map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("Ménard"), "menard");
        assert_eq!(fold("ÇA Œ"), "ca œ");
        assert_eq!(fold("Adoptée"), "adoptee");
    }

    #[test]
    fn test_accents_do_not_push_names_to_the_end() {
        let mut names = vec!["Zemmour", "Élysée", "Eliot", "Emma", "abad"];
        names.sort_by(|a, b| collate_fr(a, b));
        assert_eq!(names, vec!["abad", "Eliot", "Élysée", "Emma", "Zemmour"]);
    }

    #[test]
    fn test_total_order_on_variants() {
        assert_eq!(collate_fr("e", "é"), Ordering::Less);
        assert_eq!(collate_fr("é", "e"), Ordering::Greater);
        assert_eq!(collate_fr("Le Pen", "Le Pen"), Ordering::Equal);
        assert_ne!(collate_fr("Dupont", "dupont"), Ordering::Equal);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(collate_fr("dupont", "Dupont"), Ordering::Less);
        assert_eq!(collate_fr("Dupont", "dupont"), Ordering::Greater);
        assert_eq!(collate_fr("de Gaulle", "De Gaulle"), Ordering::Less);
        assert_eq!(collate_fr("Dupont", "dupond"), Ordering::Greater);
    }

    #[test]
    fn test_space_sorts_before_letters() {
        assert_eq!(collate_fr("Le Pen", "Lebon"), Ordering::Less);
    }
}

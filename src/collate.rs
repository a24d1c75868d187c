//! Locale-aware ordering for display names.
//!
//! Uses the Unicode Collation Algorithm with the CLDR root tailoring and non-ignorable
//! variable weighting, the default of ICU-backed `localeCompare`. Spaces and punctuation
//! sort before digits, digits before letters, accents are secondary differences and
//! lowercase precedes uppercase on an otherwise equal name. Names that collate equal
//! compare as `Equal`, so a stable sort keeps their input order.

use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

/// Reusable root-locale collator. Keep one per sort; it caches decoding buffers.
pub struct NameCollator(Collator);

impl NameCollator {
    pub fn new() -> Self {
        Self(Collator::new(Tailoring::Cldr(Locale::Root), false, false))
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.0.collate(a, b)
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off comparison. Prefer [`NameCollator`] when sorting.
pub fn compare(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(ToString::to_string).collect();
        let mut collator = NameCollator::new();
        names.sort_by(|a, b| collator.compare(a, b));
        names
    }

    #[test]
    fn test_case_insensitive_then_lowercase_first() {
        assert_eq!(sorted(&["Zeta", "Alpha", "alpha"]), ["alpha", "Alpha", "Zeta"]);
        assert_eq!(sorted(&["beta", "Alpha", "GAMMA"]), ["Alpha", "beta", "GAMMA"]);
    }

    #[test]
    fn test_punctuation_digits_and_accents() {
        assert_eq!(
            sorted(&["Zeta", "Élan", "eagle", "a1", "a_b", "Wolf 2", "Wolf:1", "Wolf1"]),
            ["a_b", "a1", "eagle", "Élan", "Wolf 2", "Wolf:1", "Wolf1", "Zeta"]
        );
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(sorted(&["Wolf #10", "Wolf", "Wolf #1"]), ["Wolf", "Wolf #1", "Wolf #10"]);
    }

    #[test]
    fn test_identical_names_are_equal() {
        assert_eq!(compare("Wolf #1", "Wolf #1"), Ordering::Equal);
        assert_eq!(compare("", ""), Ordering::Equal);
        assert_eq!(compare("", "a"), Ordering::Less);
        assert_eq!(compare("é", "e"), Ordering::Greater);
    }
}

//! Locale-aware string ordering.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;

/// Tertiary-strength collation, so `"amélie"` sorts beside `"Amelie"` rather
/// than after `"Zelig"` as a code-point comparison would put it.
///
/// Falls back to code-point order if the collator cannot be constructed.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);

        let collator = match Collator::try_new(&locale!("en").into(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(error = ?e, "Collator unavailable, using code-point order");
                None
            }
        };

        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

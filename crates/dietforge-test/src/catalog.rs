//! Catalog entry fixtures.
//!
//! Yield figures are illustrative, not authoritative. Prices are left unset
//! unless the builder takes one, so tests can price through the snapshot.
//!
//! # Example
//!
//! ```
//! use dietforge_core::{Note, Organ};
//! use dietforge_test::catalog::{beer, mug};
//!
//! let entry = beer("pils", 3, 3, 1);
//! assert_eq!(entry.organ, Some(Organ::Booze));
//! assert!(entry.resource.has_note(Note::Beer));
//! assert_eq!(mug(20.0).price, Some(20.0));
//! ```

use dietforge_core::{known, Entry, Note, Organ, Resource, YieldRange};

fn consumable(name: &str, organ: Organ, min: i64, max: i64, size: i64) -> Entry {
    Entry::new(
        Resource::new(name).with_adventures(YieldRange::new(min, max)),
        Some(organ),
        size,
    )
}

fn noted(mut entry: Entry, note: Note) -> Entry {
    entry.resource = entry.resource.with_note(note);
    entry
}

/// A plain food entry yielding `min..=max` adventures.
pub fn food(name: &str, min: i64, max: i64, size: i64) -> Entry {
    consumable(name, Organ::Food, min, max, size)
}

pub fn booze(name: &str, min: i64, max: i64, size: i64) -> Entry {
    consumable(name, Organ::Booze, min, max, size)
}

pub fn spleen(name: &str, min: i64, max: i64, size: i64) -> Entry {
    consumable(name, Organ::Spleen, min, max, size)
}

/// Food the salad fork multiplies by 1.5.
pub fn salad(name: &str, min: i64, max: i64, size: i64) -> Entry {
    noted(food(name, min, max, size), Note::Salad)
}

/// Booze the frosty mug multiplies by 1.5.
pub fn beer(name: &str, min: i64, max: i64, size: i64) -> Entry {
    noted(booze(name, min, max, size), Note::Beer)
}

pub fn wine(name: &str, min: i64, max: i64, size: i64) -> Entry {
    noted(booze(name, min, max, size), Note::Wine)
}

pub fn fork(price: f64) -> Entry {
    Entry::helper(known::SALAD_FORK).with_price(price)
}

pub fn mug(price: f64) -> Entry {
    Entry::helper(known::FROSTY_MUG).with_price(price)
}

pub fn seasoning(price: f64) -> Entry {
    Entry::helper(known::SPECIAL_SEASONING).with_price(price)
}

pub fn mayoflex(price: f64) -> Entry {
    mayo(known::MAYOFLEX, price)
}

pub fn mayo(name: &str, price: f64) -> Entry {
    Entry::helper(name).with_price(price)
}

/// An extra-greasy slider: 5 fullness, cleans 5 spleen.
pub fn slider(price: f64) -> Entry {
    food(known::EXTRA_GREASY_SLIDER, 20, 24, 5).with_price(price)
}

/// A jar of fermented pickle juice: 5 drunkenness, cleans 5 spleen.
pub fn pickle_juice(price: f64) -> Entry {
    booze(known::FERMENTED_PICKLE_JUICE, 20, 24, 5).with_price(price)
}

/// Spice melange: frees 3 fullness and 3 drunkenness, once a day.
pub fn spice_melange(price: f64) -> Entry {
    Entry::helper("spice melange")
        .with_price(price)
        .with_maximum(1)
}

/// A pocket wish for `effect`.
pub fn pocket_wish(effect: &str, price: f64) -> Entry {
    Entry::helper("pocket wish")
        .with_effect(effect)
        .with_price(price)
}

/// A small mixed catalog: one entry per organ, the companions and a
/// seasoning.
pub fn sample_catalog() -> Vec<Entry> {
    vec![
        food("hot dog", 3, 5, 2).with_price(100.0),
        salad("chef's salad", 8, 10, 3).with_price(900.0),
        booze("gin", 2, 4, 1).with_price(80.0),
        beer("pils", 3, 3, 1).with_price(60.0),
        spleen("agua", 4, 6, 4).with_price(1500.0),
        fork(500.0),
        mug(400.0),
        seasoning(200.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_valid() {
        for entry in sample_catalog() {
            assert!(entry.validate().is_ok(), "{entry}");
        }
    }

    #[test]
    fn test_notes() {
        assert!(salad("s", 1, 1, 1).resource.has_note(Note::Salad));
        assert!(wine("w", 1, 1, 1).resource.has_note(Note::Wine));
        assert!(!food("f", 1, 1, 1).resource.has_note(Note::Salad));
    }
}

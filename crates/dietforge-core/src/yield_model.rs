//! Expected adventure yield of one entry under an explicit modifier set.
//!
//! The base range is expanded to every integer it contains and each integer
//! is transformed independently before averaging. Several steps truncate, so
//! the order below is part of the contract:
//!
//! 1. fork / mug multiplier, floored
//! 2. saucemaven on saucy food
//! 3. lasagna bonus while garish, except on Mondays
//! 4. refined palate on wine, floored
//! 5. pinky ring on wine, rounded
//! 6. tuxedo shirt on martinis
//! 7. mayoflex on food
//! 8. whet stone on food
//!
//! Seasoning is added to the mean afterwards.

use crate::entry::{Entry, Note, YieldRange};
use crate::modifiers::Modifiers;
use crate::organ::Organ;

const FORK_MUG_SPECIAL: f64 = 1.5;
const FORK_MUG_NORMAL: f64 = 1.3;
const SAUCY_MYSTICALITY: i64 = 5;
const SAUCY_OTHER: i64 = 3;
const LASAGNA_BONUS: i64 = 5;
const REFINED_PALATE_MULTIPLIER: f64 = 1.25;
const PINKY_RING_MULTIPLIER: f64 = 1.125;
const TUXEDO_BONUS: i64 = 2;

/// Multiplier the fork or mug applies to `entry`, if any applies at all.
///
/// Salads under the fork and beers under the mug get the larger multiplier.
pub fn fork_mug_multiplier(entry: &Entry) -> Option<f64> {
    let special = match entry.organ? {
        Organ::Food => Note::Salad,
        Organ::Booze => Note::Beer,
        Organ::Spleen => return None,
    };
    Some(if entry.resource.has_note(special) {
        FORK_MUG_SPECIAL
    } else {
        FORK_MUG_NORMAL
    })
}

/// Flat bonus Special Seasoning adds to the mean yield of a food range.
pub fn seasoning_bonus(range: &YieldRange) -> f64 {
    if range.spread() <= 1 {
        1.0
    } else {
        0.5
    }
}

/// Expected adventures from one use of `entry`.
///
/// # Examples
///
/// ```
/// use dietforge_core::{expected_adventures, Entry, Modifiers, Organ, Resource, YieldRange};
///
/// let food = Entry::new(
///     Resource::new("pizza").with_adventures(YieldRange::new(3, 5)),
///     Some(Organ::Food),
///     1,
/// );
/// assert_eq!(expected_adventures(&food, &Modifiers::default()), 4.0);
///
/// let forked = Modifiers { fork_mug: true, ..Modifiers::default() };
/// // floor(3*1.3), floor(4*1.3), floor(5*1.3) = 3, 5, 6
/// assert!((expected_adventures(&food, &forked) - 14.0 / 3.0).abs() < 1e-12);
/// ```
pub fn expected_adventures(entry: &Entry, modifiers: &Modifiers) -> f64 {
    let Some(range) = entry.resource.adventures else {
        return 0.0;
    };
    if range.is_empty() {
        return 0.0;
    }

    let total: i64 = range
        .values()
        .map(|base| transform(entry, modifiers, base))
        .sum();
    let mut mean = total as f64 / range.len() as f64;

    if modifiers.seasoning && entry.organ == Some(Organ::Food) {
        mean += seasoning_bonus(&range);
    }
    mean
}

fn transform(entry: &Entry, modifiers: &Modifiers, base: i64) -> i64 {
    let resource = &entry.resource;
    let is_food = entry.organ == Some(Organ::Food);
    let mut adventures = base;

    if modifiers.fork_mug {
        if let Some(multiplier) = fork_mug_multiplier(entry) {
            adventures = (adventures as f64 * multiplier).floor() as i64;
        }
    }
    if modifiers.saucemaven && resource.has_note(Note::Saucy) {
        adventures += if modifiers.mysticality_prime {
            SAUCY_MYSTICALITY
        } else {
            SAUCY_OTHER
        };
    }
    if modifiers.garish && !modifiers.monday && resource.has_note(Note::Lasagna) {
        adventures += LASAGNA_BONUS;
    }
    if modifiers.refined_palate && resource.has_note(Note::Wine) {
        adventures = (adventures as f64 * REFINED_PALATE_MULTIPLIER).floor() as i64;
    }
    if modifiers.pinky_ring && resource.has_note(Note::Wine) {
        adventures = round_half_up(adventures as f64 * PINKY_RING_MULTIPLIER);
    }
    if modifiers.tuxedo_shirt && resource.has_note(Note::Martini) {
        adventures += TUXEDO_BONUS;
    }
    if modifiers.mayoflex && is_food {
        adventures += 1;
    }
    if modifiers.whet_stone && is_food {
        adventures += 1;
    }
    adventures
}

#[inline]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

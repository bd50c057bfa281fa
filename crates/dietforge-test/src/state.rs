//! State fixtures.
//!
//! [`FixedState`] answers every read from plain fields, so tests can capture
//! a [`Snapshot`] from it exactly like from live state.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use dietforge_core::{EffectId, Organ, OrganUsage, ResourceId, Snapshot, StateProvider};

/// A [`StateProvider`] with fixed answers.
///
/// It counts price reads, which lets tests check that planning only reads
/// live state while capturing.
///
/// # Example
///
/// ```
/// use dietforge_core::{Organ, Snapshot, StateProvider};
/// use dietforge_test::catalog::food;
/// use dietforge_test::FixedState;
///
/// let state = FixedState::new()
///     .with_limit(Organ::Food, 15)
///     .with_price("pizza", 90.0);
/// let snapshot = Snapshot::capture(&state, &[food("pizza", 3, 5, 1)]);
///
/// assert_eq!(snapshot.price(&"pizza".into()), 90.0);
/// assert_eq!(state.price_reads(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FixedState {
    pub prices: BTreeMap<String, f64>,
    pub owned: BTreeSet<String>,
    pub equipped: BTreeSet<String>,
    pub effects: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub usage: [OrganUsage; 3],
    pub remaining: BTreeMap<String, u32>,
    pub excluded_day: bool,
    pub level: u32,
    pub mysticality_prime: bool,
    price_reads: Cell<usize>,
}

impl FixedState {
    /// Empty state at level 1 with no organ capacity.
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }

    pub fn with_price(mut self, name: &str, price: f64) -> Self {
        self.prices.insert(name.to_string(), price);
        self
    }

    pub fn with_owned(mut self, name: &str) -> Self {
        self.owned.insert(name.to_string());
        self
    }

    pub fn with_equipped(mut self, name: &str) -> Self {
        self.equipped.insert(name.to_string());
        self
    }

    pub fn with_effect(mut self, name: &str) -> Self {
        self.effects.insert(name.to_string());
        self
    }

    pub fn with_skill(mut self, name: &str) -> Self {
        self.skills.insert(name.to_string());
        self
    }

    /// Sets `organ` to `limit` with nothing used yet.
    pub fn with_limit(self, organ: Organ, limit: i64) -> Self {
        self.with_usage(organ, 0, limit)
    }

    pub fn with_usage(mut self, organ: Organ, used: i64, limit: i64) -> Self {
        self.usage[organ.index()] = OrganUsage::new(used, limit);
        self
    }

    pub fn with_remaining_uses(mut self, name: &str, uses: u32) -> Self {
        self.remaining.insert(name.to_string(), uses);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Number of [`StateProvider::price`] calls answered so far.
    pub fn price_reads(&self) -> usize {
        self.price_reads.get()
    }
}

impl StateProvider for FixedState {
    fn price(&self, resource: &ResourceId) -> f64 {
        self.price_reads.set(self.price_reads.get() + 1);
        self.prices.get(resource.as_str()).copied().unwrap_or(0.0)
    }

    fn have(&self, resource: &ResourceId) -> bool {
        self.owned.contains(resource.as_str())
    }

    fn equipped(&self, resource: &ResourceId) -> bool {
        self.equipped.contains(resource.as_str())
    }

    fn have_effect(&self, effect: &EffectId) -> bool {
        self.effects.contains(effect.as_str())
    }

    fn have_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    fn organ_usage(&self, organ: Organ) -> OrganUsage {
        self.usage[organ.index()]
    }

    fn remaining_uses(&self, resource: &ResourceId) -> Option<u32> {
        self.remaining.get(resource.as_str()).copied()
    }

    fn is_excluded_day(&self) -> bool {
        self.excluded_day
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn mysticality_prime(&self) -> bool {
        self.mysticality_prime
    }
}

/// A snapshot at level 1 with the given remaining capacities and nothing
/// else.
pub fn snapshot_with_capacity(food: i64, booze: i64, spleen: i64) -> Snapshot {
    Snapshot::new()
        .with_level(1)
        .with_usage(Organ::Food, OrganUsage::new(0, food))
        .with_usage(Organ::Booze, OrganUsage::new(0, booze))
        .with_usage(Organ::Spleen, OrganUsage::new(0, spleen))
}

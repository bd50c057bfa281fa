//! Read-only access to live state, and the snapshot planning runs against.
//!
//! Planning never talks to live state directly. A [`Snapshot`] is captured
//! once at the start of a planning call and every later read goes through
//! it, so two planning calls over equal snapshots produce equal plans.

use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{EffectId, Entry, ResourceId};
use crate::known;
use crate::modifiers::Modifiers;
use crate::organ::{Organ, OrganUsage};

/// Read interface over live state.
pub trait StateProvider {
    /// Market price of one unit of `resource`.
    fn price(&self, resource: &ResourceId) -> f64;

    /// Whether `resource` is owned.
    fn have(&self, resource: &ResourceId) -> bool;

    /// Whether `resource` is currently worn.
    fn equipped(&self, resource: &ResourceId) -> bool;

    fn have_effect(&self, effect: &EffectId) -> bool;

    fn have_skill(&self, skill: &str) -> bool;

    /// Current usage and hard limit of `organ`.
    fn organ_usage(&self, organ: Organ) -> OrganUsage;

    /// Uses of `resource` left today, or `None` when unlimited.
    fn remaining_uses(&self, resource: &ResourceId) -> Option<u32>;

    /// Whether today is the recurring day some bonuses skip.
    fn is_excluded_day(&self) -> bool;

    fn level(&self) -> u32;

    /// Whether mysticality is the dominant attribute.
    fn mysticality_prime(&self) -> bool;
}

/// Everything planning reads, captured at one point in time.
///
/// # Examples
///
/// ```
/// use dietforge_core::{Organ, OrganUsage, Snapshot, StateProvider};
///
/// let snapshot = Snapshot::new()
///     .with_usage(Organ::Food, OrganUsage::new(3, 15))
///     .with_price("pizza", 120.0)
///     .with_level(13);
///
/// assert_eq!(snapshot.organ_usage(Organ::Food).remaining(), 12);
/// assert_eq!(snapshot.price(&"pizza".into()), 120.0);
/// // unknown prices read as zero
/// assert_eq!(snapshot.price(&"gravel".into()), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    prices: BTreeMap<ResourceId, f64>,
    owned: BTreeSet<ResourceId>,
    equipped: BTreeSet<ResourceId>,
    effects: BTreeSet<EffectId>,
    skills: BTreeSet<String>,
    usage: [OrganUsage; 3],
    remaining: BTreeMap<ResourceId, u32>,
    excluded_day: bool,
    level: u32,
    mysticality_prime: bool,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every value planning over `catalog` will need from `provider`.
    pub fn capture<P: StateProvider + ?Sized>(provider: &P, catalog: &[Entry]) -> Self {
        let mut snapshot = Snapshot {
            excluded_day: provider.is_excluded_day(),
            level: provider.level(),
            mysticality_prime: provider.mysticality_prime(),
            ..Snapshot::default()
        };
        for organ in Organ::ALL {
            snapshot.usage[organ.index()] = provider.organ_usage(organ);
        }

        for entry in catalog {
            let id = entry.id();
            snapshot.prices.insert(id.clone(), provider.price(id));
            if let Some(remaining) = provider.remaining_uses(id) {
                snapshot.remaining.insert(id.clone(), remaining);
            }
            if provider.have(id) {
                snapshot.owned.insert(id.clone());
            }
        }

        for effect in [known::REFINED_PALATE, known::GARISH, known::WHETTED] {
            let effect = EffectId::new(effect);
            if provider.have_effect(&effect) {
                snapshot.effects.insert(effect);
            }
        }
        if provider.have_skill(known::SAUCEMAVEN) {
            snapshot.skills.insert(known::SAUCEMAVEN.to_string());
        }
        for gear in [known::PINKY_RING, known::TUXEDO_SHIRT] {
            let gear = ResourceId::new(gear);
            if provider.equipped(&gear) {
                snapshot.equipped.insert(gear);
            }
        }
        snapshot
    }

    pub fn with_price(mut self, resource: impl Into<ResourceId>, price: f64) -> Self {
        self.prices.insert(resource.into(), price);
        self
    }

    pub fn with_owned(mut self, resource: impl Into<ResourceId>) -> Self {
        self.owned.insert(resource.into());
        self
    }

    pub fn with_equipped(mut self, resource: impl Into<ResourceId>) -> Self {
        self.equipped.insert(resource.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effects.insert(effect.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    pub fn with_usage(mut self, organ: Organ, usage: OrganUsage) -> Self {
        self.usage[organ.index()] = usage;
        self
    }

    pub fn with_remaining_uses(mut self, resource: impl Into<ResourceId>, uses: u32) -> Self {
        self.remaining.insert(resource.into(), uses);
        self
    }

    pub fn with_excluded_day(mut self, excluded: bool) -> Self {
        self.excluded_day = excluded;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_mysticality_prime(mut self, mysticality: bool) -> Self {
        self.mysticality_prime = mysticality;
        self
    }

    /// Price of `entry`: its override if set, otherwise the captured price.
    pub fn entry_price(&self, entry: &Entry) -> f64 {
        entry.price.unwrap_or_else(|| self.price(entry.id()))
    }

    /// Uses left for `entry`: the catalog's value if set, otherwise the
    /// captured remaining-uses read.
    pub fn entry_maximum(&self, entry: &Entry) -> Option<u32> {
        entry.maximum.or_else(|| self.remaining_uses(entry.id()))
    }

    /// Modifiers that hold for every entry before bundling or branching.
    pub fn base_modifiers(&self) -> Modifiers {
        Modifiers {
            saucemaven: self.have_skill(known::SAUCEMAVEN),
            garish: self.have_effect(&EffectId::new(known::GARISH)),
            refined_palate: self.have_effect(&EffectId::new(known::REFINED_PALATE)),
            pinky_ring: self.equipped(&ResourceId::new(known::PINKY_RING)),
            tuxedo_shirt: self.equipped(&ResourceId::new(known::TUXEDO_SHIRT)),
            whet_stone: self.have_effect(&EffectId::new(known::WHETTED)),
            monday: self.excluded_day,
            mysticality_prime: self.mysticality_prime,
            ..Modifiers::default()
        }
    }
}

impl StateProvider for Snapshot {
    fn price(&self, resource: &ResourceId) -> f64 {
        self.prices.get(resource).copied().unwrap_or(0.0)
    }

    fn have(&self, resource: &ResourceId) -> bool {
        self.owned.contains(resource)
    }

    fn equipped(&self, resource: &ResourceId) -> bool {
        self.equipped.contains(resource)
    }

    fn have_effect(&self, effect: &EffectId) -> bool {
        self.effects.contains(effect)
    }

    fn have_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    fn organ_usage(&self, organ: Organ) -> OrganUsage {
        self.usage[organ.index()]
    }

    fn remaining_uses(&self, resource: &ResourceId) -> Option<u32> {
        self.remaining.get(resource).copied()
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

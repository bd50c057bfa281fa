//! Interacting entries and their effects.
//!
//! An entry is interacting when it changes the capacity of some organ other
//! than by its own size, or switches on a yield modifier. Such entries are
//! kept out of the per-organ knapsack and toggled by the resolver instead.
//! A rule's deltas replace the entry's own size: the resolver never charges
//! an interacting entry's `size` on top of them.

use dietforge_config::InteractionRuleConfig;
use dietforge_core::{known, EffectId, Entry, ModifierFlag, ModifierOverrides, Organ, ResourceId};
use smallvec::SmallVec;

/// Capacity deltas and implied flags of one interacting resource.
///
/// Deltas follow `capacity += delta`: negative costs capacity, positive
/// frees it.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRule {
    resource: ResourceId,
    effect: Option<EffectId>,
    deltas: SmallVec<[(Organ, i64); 3]>,
    implies: ModifierOverrides,
}

impl InteractionRule {
    pub fn new(resource: impl Into<ResourceId>) -> Self {
        Self {
            resource: resource.into(),
            effect: None,
            deltas: SmallVec::new(),
            implies: ModifierOverrides::none(),
        }
    }

    /// Restricts the rule to one effect variant.
    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Sets the delta for `organ`, replacing any earlier one.
    pub fn with_delta(mut self, organ: Organ, delta: i64) -> Self {
        self.deltas.retain(|(o, _)| *o != organ);
        if delta != 0 {
            self.deltas.push((organ, delta));
        }
        self
    }

    pub fn with_implied(mut self, flag: ModifierFlag) -> Self {
        self.implies.insert(flag);
        self
    }

    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    pub fn effect(&self) -> Option<&EffectId> {
        self.effect.as_ref()
    }

    pub fn implies(&self) -> ModifierOverrides {
        self.implies
    }

    pub fn deltas(&self) -> impl Iterator<Item = (Organ, i64)> + '_ {
        self.deltas.iter().copied()
    }

    pub fn delta(&self, organ: Organ) -> i64 {
        self.deltas
            .iter()
            .find(|(o, _)| *o == organ)
            .map_or(0, |(_, d)| *d)
    }

    /// Whether the rule applies to `entry`. A rule without an effect matches
    /// every variant of its resource.
    pub fn matches(&self, entry: &Entry) -> bool {
        *entry.id() == self.resource
            && match &self.effect {
                Some(effect) => entry.effect.as_ref() == Some(effect),
                None => true,
            }
    }

    fn same_key(&self, other: &InteractionRule) -> bool {
        self.resource == other.resource && self.effect == other.effect
    }
}

impl From<&InteractionRuleConfig> for InteractionRule {
    fn from(config: &InteractionRuleConfig) -> Self {
        let mut rule = InteractionRule::new(config.resource.as_str());
        if let Some(effect) = &config.effect {
            rule = rule.with_effect(effect.as_str());
        }
        for (organ, delta) in &config.deltas {
            rule = rule.with_delta(*organ, *delta);
        }
        for flag in &config.implies {
            rule = rule.with_implied(*flag);
        }
        rule
    }
}

/// Lookup from entries to interaction rules.
///
/// The default table holds the built-in rules; configuration may add more.
///
/// # Examples
///
/// ```
/// use dietforge_core::{Entry, Organ};
/// use dietforge_solver::interaction::{InteractionRule, InteractionTable};
///
/// let table = InteractionTable::default()
///     .with_rule(InteractionRule::new("lucky lindy").with_delta(Organ::Booze, -1));
///
/// let melange = Entry::helper("spice melange");
/// let lindy = Entry::new("lucky lindy", Some(Organ::Booze), 1);
/// let pizza = Entry::new("pizza", Some(Organ::Food), 1);
///
/// assert_eq!(table.rule_for(&melange).map(|r| r.delta(Organ::Food)), Some(3));
/// assert!(table.is_interacting(&lindy));
/// assert!(!table.is_interacting(&pizza));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionTable {
    rules: Vec<InteractionRule>,
}

impl InteractionTable {
    /// A table with no rules; every entry is simple.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds `rule`, replacing a rule with the same resource and effect.
    pub fn with_rule(mut self, rule: InteractionRule) -> Self {
        match self.rules.iter_mut().find(|r| r.same_key(&rule)) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn with_config_rules(self, rules: &[InteractionRuleConfig]) -> Self {
        rules
            .iter()
            .fold(self, |table, config| table.with_rule(config.into()))
    }

    /// The rule for `entry`: an exact effect match first, then a rule that
    /// matches any variant.
    pub fn rule_for(&self, entry: &Entry) -> Option<&InteractionRule> {
        let mut wildcard = None;
        for rule in self.rules.iter().filter(|r| r.matches(entry)) {
            if rule.effect.is_some() {
                return Some(rule);
            }
            if wildcard.is_none() {
                wildcard = Some(rule);
            }
        }
        wildcard
    }

    pub fn is_interacting(&self, entry: &Entry) -> bool {
        self.rule_for(entry).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionRule> {
        self.rules.iter()
    }
}

impl Default for InteractionTable {
    fn default() -> Self {
        let rules = vec![
            InteractionRule::new("spice melange")
                .with_delta(Organ::Food, 3)
                .with_delta(Organ::Booze, 3),
            InteractionRule::new("Ultra Mega Sour Ball")
                .with_delta(Organ::Food, 3)
                .with_delta(Organ::Booze, 3),
            InteractionRule::new("cuppa Voraci tea").with_delta(Organ::Food, 1),
            InteractionRule::new("cuppa Sobrie tea").with_delta(Organ::Booze, 1),
            InteractionRule::new("distention pill")
                .with_delta(Organ::Food, 1)
                .with_delta(Organ::Spleen, -1),
            InteractionRule::new("synthetic dog hair pill")
                .with_delta(Organ::Booze, 1)
                .with_delta(Organ::Spleen, -1),
            InteractionRule::new("mojo filter").with_delta(Organ::Spleen, 1),
            InteractionRule::new("pocket wish")
                .with_effect(known::REFINED_PALATE)
                .with_implied(ModifierFlag::RefinedPalate),
            InteractionRule::new("pocket wish")
                .with_effect(known::GARISH)
                .with_implied(ModifierFlag::Garish),
            InteractionRule::new("potion of the field gar").with_implied(ModifierFlag::Garish),
            InteractionRule::new("toasted brie")
                .with_delta(Organ::Food, -2)
                .with_implied(ModifierFlag::RefinedPalate),
            InteractionRule::new("whet stone").with_implied(ModifierFlag::WhetStone),
        ];
        Self { rules }
    }
}

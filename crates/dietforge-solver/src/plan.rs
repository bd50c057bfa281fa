//! Bundles, plan entries and the resulting plan.
//!
//! A [`Plan`] stores only what was chosen. Every aggregate is recomputed from
//! the entries and a [`Snapshot`] on demand.

use std::fmt;
use std::sync::Arc;

use dietforge_core::{
    expected_adventures, known, Entry, ModifierFlag, ModifierOverrides, Organ, Snapshot,
};
use serde::Serialize;
use smallvec::SmallVec;

use crate::interaction::InteractionTable;

/// A target entry plus the helpers consumed with it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use dietforge_core::{known, Entry, ModifierFlag, Organ};
/// use dietforge_solver::Bundle;
///
/// let salad = Arc::new(Entry::new("chef's salad", Some(Organ::Food), 2));
/// let fork = Arc::new(Entry::helper(known::SALAD_FORK));
/// let bundle = Bundle::new(salad).with_helper(fork);
///
/// assert_eq!(bundle.entries().count(), 2);
/// assert!(bundle.flags().contains(ModifierFlag::ForkMug));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    target: Arc<Entry>,
    helpers: SmallVec<[Arc<Entry>; 3]>,
}

impl Bundle {
    pub fn new(target: Arc<Entry>) -> Self {
        Self {
            target,
            helpers: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_helper(mut self, helper: Arc<Entry>) -> Self {
        self.helpers.push(helper);
        self
    }

    pub fn push_helper(&mut self, helper: Arc<Entry>) {
        self.helpers.push(helper);
    }

    #[inline]
    pub fn target(&self) -> &Entry {
        &self.target
    }

    pub fn helpers(&self) -> &[Arc<Entry>] {
        &self.helpers
    }

    /// The target followed by its helpers.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        std::iter::once(&*self.target).chain(self.helpers.iter().map(|h| &**h))
    }

    /// Price of one use of the whole bundle.
    pub fn price(&self, snapshot: &Snapshot) -> f64 {
        self.entries().map(|e| snapshot.entry_price(e)).sum()
    }

    pub fn additional_value(&self) -> f64 {
        self.entries().map(|e| e.additional_value).sum()
    }

    /// Yield flags the helpers switch on.
    pub fn flags(&self) -> ModifierOverrides {
        let mut flags = ModifierOverrides::none();
        for helper in &self.helpers {
            let name = helper.id().as_str();
            if name == known::SALAD_FORK || name == known::FROSTY_MUG {
                flags.insert(ModifierFlag::ForkMug);
            } else if name == known::SPECIAL_SEASONING {
                flags.insert(ModifierFlag::Seasoning);
            } else if name == known::MAYOFLEX {
                flags.insert(ModifierFlag::Mayoflex);
            }
        }
        flags
    }

    /// Expected adventures of one use, with `implied` layered over the
    /// snapshot's base modifiers.
    pub fn expected_adventures(&self, snapshot: &Snapshot, implied: ModifierOverrides) -> f64 {
        let modifiers = implied.union(self.flags()).apply(snapshot.base_modifiers());
        expected_adventures(&self.target, &modifiers)
    }

    /// Net value of one use: yield at `mpa`, less prices, plus flat value.
    pub fn value(&self, mpa: f64, snapshot: &Snapshot, implied: ModifierOverrides) -> f64 {
        self.expected_adventures(snapshot, implied) * mpa - self.price(snapshot)
            + self.additional_value()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)?;
        for helper in &self.helpers {
            write!(f, " + {helper}")?;
        }
        Ok(())
    }
}

/// A bundle and how many times to consume it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub bundle: Bundle,
    pub quantity: u32,
}

impl PlanEntry {
    pub fn new(bundle: Bundle, quantity: u32) -> Self {
        Self { bundle, quantity }
    }
}

/// Which value [`Plan::expected_value`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMethod {
    /// Yield times value per adventure, plus flat bonuses.
    Gross,
    /// Gross minus everything paid.
    Net,
}

/// An ordered allocation plus the flags its interacting entries imply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    entries: Vec<PlanEntry>,
    implied: ModifierOverrides,
}

impl Plan {
    pub fn new(entries: Vec<PlanEntry>, implied: ModifierOverrides) -> Self {
        Self { entries, implied }
    }

    /// Builds a plan from raw entries, reading implied flags from `table`.
    pub fn from_entries(entries: Vec<PlanEntry>, table: &InteractionTable) -> Self {
        let implied = entries
            .iter()
            .filter(|e| e.quantity > 0)
            .filter_map(|e| table.rule_for(e.bundle.target()))
            .fold(ModifierOverrides::none(), |acc, rule| acc.union(rule.implies()));
        Self { entries, implied }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn implied(&self) -> ModifierOverrides {
        self.implied
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total quantity of every entry whose target is `name`.
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.bundle.target().is(name))
            .map(|e| e.quantity)
            .sum()
    }

    /// Capacity of `organ` the plan consumes; restoring entries count negative.
    pub fn organ_usage(&self, organ: Organ) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.bundle.target().organ == Some(organ))
            .map(|e| e.bundle.target().size * i64::from(e.quantity))
            .sum()
    }

    pub fn expected_adventures(&self, snapshot: &Snapshot) -> f64 {
        self.entries
            .iter()
            .map(|e| f64::from(e.quantity) * e.bundle.expected_adventures(snapshot, self.implied))
            .sum()
    }

    pub fn expected_price(&self, snapshot: &Snapshot) -> f64 {
        self.entries
            .iter()
            .map(|e| f64::from(e.quantity) * e.bundle.price(snapshot))
            .sum()
    }

    pub fn expected_value(&self, mpa: f64, snapshot: &Snapshot, method: ValueMethod) -> f64 {
        let gross = self.expected_adventures(snapshot) * mpa
            + self
                .entries
                .iter()
                .map(|e| f64::from(e.quantity) * e.bundle.additional_value())
                .sum::<f64>();
        match method {
            ValueMethod::Gross => gross,
            ValueMethod::Net => gross - self.expected_price(snapshot),
        }
    }

    /// A serializable report of the plan at `mpa`.
    pub fn summary(&self, mpa: f64, snapshot: &Snapshot) -> PlanSummary {
        let entries = self
            .entries
            .iter()
            .map(|e| {
                let target = e.bundle.target();
                PlanSummaryEntry {
                    resource: target.id().to_string(),
                    effect: target.effect.as_ref().map(ToString::to_string),
                    organ: target.organ,
                    helpers: e.bundle.helpers().iter().map(|h| h.id().to_string()).collect(),
                    quantity: e.quantity,
                    adventures_per_use: e.bundle.expected_adventures(snapshot, self.implied),
                }
            })
            .collect();

        PlanSummary {
            entries,
            implied: self.implied.iter().collect(),
            adventures: self.expected_adventures(snapshot),
            price: self.expected_price(snapshot),
            gross_value: self.expected_value(mpa, snapshot, ValueMethod::Gross),
            net_value: self.expected_value(mpa, snapshot, ValueMethod::Net),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("(empty plan)");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} x {}", entry.quantity, entry.bundle)?;
        }
        Ok(())
    }
}

/// One line of a [`PlanSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummaryEntry {
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    pub organ: Option<Organ>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub helpers: Vec<String>,
    pub quantity: u32,
    pub adventures_per_use: f64,
}

/// Aggregates of a plan, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub entries: Vec<PlanSummaryEntry>,
    pub implied: Vec<ModifierFlag>,
    pub adventures: f64,
    pub price: f64,
    pub gross_value: f64,
    pub net_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dietforge_core::{Note, Resource, YieldRange};

    fn pizza() -> Arc<Entry> {
        Arc::new(Entry::new(
            Resource::new("pizza").with_adventures(YieldRange::new(3, 5)),
            Some(Organ::Food),
            1,
        ))
    }

    fn salad() -> Arc<Entry> {
        Arc::new(Entry::new(
            Resource::new("chef's salad")
                .with_adventures(YieldRange::single(10))
                .with_note(Note::Salad),
            Some(Organ::Food),
            2,
        ))
    }

    #[test]
    fn test_bundle_flags_follow_helpers() {
        let bundle = Bundle::new(pizza())
            .with_helper(Arc::new(Entry::helper(known::SPECIAL_SEASONING)))
            .with_helper(Arc::new(Entry::helper(known::MAYOFLEX)));
        let flags = bundle.flags();
        assert!(flags.contains(ModifierFlag::Seasoning));
        assert!(flags.contains(ModifierFlag::Mayoflex));
        assert!(!flags.contains(ModifierFlag::ForkMug));

        let other_mayo = Bundle::new(pizza()).with_helper(Arc::new(Entry::helper("Mayodiol")));
        assert!(other_mayo.flags().is_empty());
    }

    #[test]
    fn test_bundle_value() {
        let snapshot = Snapshot::new()
            .with_price("chef's salad", 100.0)
            .with_price(known::SALAD_FORK, 30.0);
        let plain = Bundle::new(salad());
        let forked = plain
            .clone()
            .with_helper(Arc::new(Entry::helper(known::SALAD_FORK)));

        assert_eq!(plain.value(10.0, &snapshot, ModifierOverrides::none()), 0.0);
        // floor(10 * 1.5) = 15
        assert_eq!(forked.expected_adventures(&snapshot, ModifierOverrides::none()), 15.0);
        assert_eq!(forked.value(10.0, &snapshot, ModifierOverrides::none()), 20.0);
    }

    #[test]
    fn test_plan_aggregates() {
        let snapshot = Snapshot::new().with_price("pizza", 50.0);
        let plan = Plan::new(
            vec![PlanEntry::new(Bundle::new(pizza()), 2)],
            ModifierOverrides::none(),
        );

        assert_eq!(plan.expected_adventures(&snapshot), 8.0);
        assert_eq!(plan.expected_price(&snapshot), 100.0);
        assert_eq!(plan.expected_value(100.0, &snapshot, ValueMethod::Gross), 800.0);
        assert_eq!(plan.expected_value(100.0, &snapshot, ValueMethod::Net), 700.0);
        assert_eq!(plan.organ_usage(Organ::Food), 2);
        assert_eq!(plan.organ_usage(Organ::Booze), 0);
        assert_eq!(plan.quantity_of("pizza"), 2);
    }

    #[test]
    fn test_implied_flags_raise_yield() {
        let wine = Arc::new(Entry::new(
            Resource::new("wine")
                .with_adventures(YieldRange::single(8))
                .with_note(Note::Wine),
            Some(Organ::Booze),
            1,
        ));
        let entries = vec![PlanEntry::new(Bundle::new(wine), 1)];
        let snapshot = Snapshot::new();

        let plain = Plan::new(entries.clone(), ModifierOverrides::none());
        let palate = Plan::new(
            entries,
            ModifierOverrides::none().with(ModifierFlag::RefinedPalate),
        );
        assert_eq!(plain.expected_adventures(&snapshot), 8.0);
        assert_eq!(palate.expected_adventures(&snapshot), 10.0);
    }

    #[test]
    fn test_from_entries_reads_implied_flags() {
        let table = InteractionTable::default();
        let wish = Arc::new(Entry::helper("pocket wish").with_effect(known::REFINED_PALATE));
        let plan = Plan::from_entries(
            vec![
                PlanEntry::new(Bundle::new(wish), 1),
                PlanEntry::new(Bundle::new(pizza()), 1),
            ],
            &table,
        );
        assert!(plan.implied().contains(ModifierFlag::RefinedPalate));
        assert!(!plan.implied().contains(ModifierFlag::Garish));
    }

    #[test]
    fn test_display() {
        let bundle = Bundle::new(salad()).with_helper(Arc::new(Entry::helper(known::SALAD_FORK)));
        let plan = Plan::new(
            vec![
                PlanEntry::new(bundle, 1),
                PlanEntry::new(Bundle::new(pizza()), 3),
            ],
            ModifierOverrides::none(),
        );
        assert_eq!(
            plan.to_string(),
            "1 x chef's salad + Ol' Scratch's salad fork\n3 x pizza"
        );
        assert_eq!(Plan::default().to_string(), "(empty plan)");
    }

    #[test]
    fn test_summary_serializes() {
        let snapshot = Snapshot::new().with_price("pizza", 50.0);
        let plan = Plan::new(
            vec![PlanEntry::new(Bundle::new(pizza()), 2)],
            ModifierOverrides::none().with(ModifierFlag::Garish),
        );
        let summary = plan.summary(100.0, &snapshot);
        assert_eq!(summary.net_value, 700.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["entries"][0]["resource"], "pizza");
        assert_eq!(json["entries"][0]["organ"], "food");
        assert_eq!(json["entries"][0]["quantity"], 2);
        assert!(json["entries"][0].get("effect").is_none());
        assert_eq!(json["implied"][0], "garish");
        assert_eq!(json["gross_value"], 800.0);
    }
}

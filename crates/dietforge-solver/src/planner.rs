//! Allocation planner: per-entry values and per-organ selection.
//!
//! The planner owns the working catalog for one planning call. It decides
//! which helpers ride along with each entry, values the resulting bundle via
//! the yield model and hands one knapsack per organ to the selector.

use std::collections::BTreeMap;
use std::sync::Arc;

use dietforge_core::{
    known, seasoning_bonus, strictly_greater, Capacities, Entry, ModifierOverrides,
    Organ, ResourceId, Result, Snapshot, StateProvider,
};
use tracing::{debug, warn};

use crate::interaction::{InteractionRule, InteractionTable};
use crate::plan::{Bundle, PlanEntry};
use crate::selector::{knapsack, Row};
use crate::stats::{PlanningStats, StatsCollector};

/// An interacting entry together with the rule that matched it.
#[derive(Debug, Clone)]
pub struct Interacting {
    pub entry: Arc<Entry>,
    pub rule: InteractionRule,
}

/// Values entries and plans organs for one planning call.
#[derive(Debug)]
pub struct AllocationPlanner<'a> {
    mpa: f64,
    snapshot: &'a Snapshot,
    simple: Vec<Arc<Entry>>,
    interacting: Vec<Interacting>,
    fork: Option<Arc<Entry>>,
    mug: Option<Arc<Entry>>,
    seasoning: Option<Arc<Entry>>,
    mayos: BTreeMap<ResourceId, Arc<Entry>>,
    spleen_value: f64,
    stats: StatsCollector,
}

impl<'a> AllocationPlanner<'a> {
    /// Builds the working catalog.
    ///
    /// Entries that fail validation, carry a non-finite price, or would give
    /// the selector an unbounded row are skipped with a warning. Entries above
    /// the snapshot's level are left out. Entries without an organ are only
    /// kept when `table` makes them interacting; the rest are helpers or
    /// inert.
    pub fn new(
        mpa: f64,
        catalog: &[Entry],
        snapshot: &'a Snapshot,
        table: &InteractionTable,
    ) -> Self {
        let mut planner = Self {
            mpa,
            snapshot,
            simple: Vec::new(),
            interacting: Vec::new(),
            fork: None,
            mug: None,
            seasoning: None,
            mayos: BTreeMap::new(),
            spleen_value: 0.0,
            stats: StatsCollector::new(),
        };

        for entry in catalog {
            if let Err(err) = entry.validate() {
                warn!(event = "entry_skipped", entry = %entry, error = %err);
                continue;
            }
            if !snapshot.entry_price(entry).is_finite() {
                warn!(event = "entry_skipped", entry = %entry, error = "price is not finite");
                continue;
            }
            let name = entry.id().as_str();
            if name == known::SALAD_FORK {
                planner.fork = Some(Arc::new(entry.clone()));
            } else if name == known::FROSTY_MUG {
                planner.mug = Some(Arc::new(entry.clone()));
            } else if name == known::SPECIAL_SEASONING {
                planner.seasoning = Some(Arc::new(entry.clone()));
            } else if known::is_mayo(name) {
                planner.mayos.insert(entry.id().clone(), Arc::new(entry.clone()));
            }

            if entry.resource.level_requirement > snapshot.level() {
                continue;
            }
            if let Some(rule) = table.rule_for(entry) {
                planner.interacting.push(Interacting {
                    entry: Arc::new(entry.clone()),
                    rule: rule.clone(),
                });
            } else if entry.organ.is_some() {
                // A knapsack row of size zero or less needs a bound.
                if entry.size <= 0 && snapshot.entry_maximum(entry).is_none() {
                    warn!(
                        event = "entry_skipped",
                        entry = %entry,
                        error = "non-positive size without a maximum",
                    );
                    continue;
                }
                planner.simple.push(Arc::new(entry.clone()));
            }
        }

        planner.spleen_value = planner
            .simple
            .iter()
            .filter(|e| e.organ == Some(Organ::Spleen) && e.size > 0)
            .map(|e| planner.bundle_for(e, ModifierOverrides::none()).1 / e.size as f64)
            .fold(0.0, f64::max);

        planner
    }

    pub fn value_per_adventure(&self) -> f64 {
        self.mpa
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot
    }

    /// Entries the per-organ knapsacks choose from.
    pub fn simple_entries(&self) -> &[Arc<Entry>] {
        &self.simple
    }

    /// Entries the resolver toggles, in catalog order.
    pub fn interacting(&self) -> &[Interacting] {
        &self.interacting
    }

    /// Best value per unit of spleen among spleen entries, never negative.
    pub fn spleen_value(&self) -> f64 {
        self.spleen_value
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    /// Consumes the planner, returning what its calls recorded.
    pub fn finish(self) -> PlanningStats {
        self.stats.into_stats()
    }

    /// Chooses helpers for `entry` and returns the bundle with its value per
    /// use under `overrides`.
    ///
    /// The fork or mug is only added when it is strictly better; a tie keeps
    /// the bundle without it. Spleen cleaners are credited with the spleen
    /// they free at [`spleen_value`](Self::spleen_value).
    pub fn consumption_value_and_bundle(
        &self,
        entry: &Arc<Entry>,
        overrides: ModifierOverrides,
    ) -> (Bundle, f64) {
        let (bundle, mut value) = self.bundle_for(entry, overrides);
        if known::is_spleen_cleaner(entry.id().as_str()) {
            value += known::SPLEEN_CLEANED_PER_USE as f64 * self.spleen_value;
        }
        (bundle, value)
    }

    pub fn consumption_value(&self, entry: &Arc<Entry>, overrides: ModifierOverrides) -> f64 {
        self.consumption_value_and_bundle(entry, overrides).1
    }

    fn bundle_for(&self, entry: &Arc<Entry>, overrides: ModifierOverrides) -> (Bundle, f64) {
        let mut bundle = Bundle::new(Arc::clone(entry));

        if entry.organ == Some(Organ::Food) {
            if let (Some(seasoning), Some(range)) = (&self.seasoning, &entry.resource.adventures) {
                if self.mpa * seasoning_bonus(range) > self.snapshot.entry_price(seasoning) {
                    bundle.push_helper(Arc::clone(seasoning));
                }
            }
            if let Some(mayo) = self.mayo_for(entry) {
                bundle.push_helper(mayo);
            }
        }
        let value = bundle.value(self.mpa, self.snapshot, overrides);

        let companion = match entry.organ {
            Some(Organ::Food) => self.fork.as_ref(),
            Some(Organ::Booze) => self.mug.as_ref(),
            _ => None,
        };
        if let Some(companion) = companion {
            let with = bundle.clone().with_helper(Arc::clone(companion));
            let with_value = with.value(self.mpa, self.snapshot, overrides);
            if strictly_greater(with_value, value) {
                return (with, with_value);
            }
        }
        (bundle, value)
    }

    // The designated mayo when the catalog has it, otherwise Mayoflex when one
    // extra adventure is worth its price.
    fn mayo_for(&self, entry: &Entry) -> Option<Arc<Entry>> {
        if let Some(designated) = &entry.mayo {
            return self.mayos.get(designated).cloned();
        }
        if entry.resource.adventures.is_none() {
            return None;
        }
        let mayoflex = self.mayos.get(&ResourceId::new(known::MAYOFLEX))?;
        (self.mpa > self.snapshot.entry_price(mayoflex)).then(|| Arc::clone(mayoflex))
    }

    /// Plans one organ with the simple entries that occupy it.
    ///
    /// # Errors
    ///
    /// Returns [`DietForgeError::Precondition`](dietforge_core::DietForgeError)
    /// when the selector rejects its input, e.g. a negative `capacity`.
    pub fn plan_category(
        &self,
        organ: Organ,
        capacity: i64,
        overrides: ModifierOverrides,
    ) -> Result<(f64, Vec<PlanEntry>)> {
        let rows: Vec<Row<Bundle>> = self
            .simple
            .iter()
            .filter(|e| e.organ == Some(organ))
            .map(|e| {
                let (bundle, value) = self.consumption_value_and_bundle(e, overrides);
                Row::new(bundle, value, e.size, self.snapshot.entry_maximum(e))
            })
            .collect();
        self.stats.record_selector_call(rows.len());

        let selection = knapsack(rows, capacity)?;
        debug!(
            event = "organ_planned",
            organ = %organ,
            capacity,
            value = selection.value,
            chosen = selection.chosen.len(),
        );
        let plan = selection
            .chosen
            .into_iter()
            .map(|(bundle, quantity)| PlanEntry::new(bundle, quantity))
            .collect();
        Ok((selection.value, plan))
    }

    /// Plans every primary organ with a non-negative capacity.
    pub fn plan_categories(
        &self,
        capacities: &Capacities,
        overrides: ModifierOverrides,
    ) -> Result<(f64, Vec<PlanEntry>)> {
        let mut total = 0.0;
        let mut plan = Vec::new();
        for (organ, capacity) in capacities.eligible(&Organ::PRIMARY) {
            let (value, entries) = self.plan_category(organ, capacity, overrides)?;
            total += value;
            plan.extend(entries);
        }
        Ok((total, plan))
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;

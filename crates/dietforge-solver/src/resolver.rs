//! Exhaustive toggling of interacting entries.
//!
//! Every interacting entry is tried both with and without, in catalog order.
//! Each call receives its own copy of the capacities and overrides, so the
//! two subtrees share nothing and may run in parallel. The search is `2^k`
//! leaves for `k` interacting entries; catalogs keep `k` small.

use dietforge_core::{strictly_greater, Capacities, ModifierOverrides, Organ, Result};
use tracing::trace;

use crate::plan::{Bundle, PlanEntry};
use crate::planner::{AllocationPlanner, Interacting};

/// Outcome of one subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Primary plan value plus the standalone value of every chosen
    /// interacting entry.
    pub value: f64,
    pub entries: Vec<PlanEntry>,
    /// Flags switched on by the chosen interacting entries.
    pub implied: ModifierOverrides,
    /// Net spleen freed (positive) or spent (negative) by the chosen
    /// interacting entries.
    pub secondary_delta: i64,
}

impl Branch {
    /// Value used to compare branches: spleen deltas count at `spleen_value`
    /// per unit.
    pub fn score(&self, spleen_value: f64) -> f64 {
        self.value + self.secondary_delta as f64 * spleen_value
    }
}

// An interacting entry prepared for the search.
struct Choice<'p> {
    interacting: &'p Interacting,
    bundle: Bundle,
    standalone: f64,
    maximum: Option<u32>,
}

/// Enumerates presence and absence of every interacting entry and keeps the
/// best branch.
pub struct InteractionResolver<'p, 'a> {
    planner: &'p AllocationPlanner<'a>,
    choices: Vec<Choice<'p>>,
    parallel: bool,
}

impl<'p, 'a> InteractionResolver<'p, 'a> {
    /// Prepares the search over `planner`'s interacting entries.
    ///
    /// Each entry's standalone value is computed once, with no overrides.
    pub fn new(planner: &'p AllocationPlanner<'a>) -> Self {
        let choices = planner
            .interacting()
            .iter()
            .map(|interacting| {
                let (bundle, standalone) = planner
                    .consumption_value_and_bundle(&interacting.entry, ModifierOverrides::none());
                Choice {
                    interacting,
                    bundle,
                    standalone,
                    maximum: planner.snapshot().entry_maximum(&interacting.entry),
                }
            })
            .collect();
        Self {
            planner,
            choices,
            parallel: false,
        }
    }

    /// Evaluates the two branches of each entry with `rayon::join`.
    pub fn with_parallel_branches(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the best branch reachable from `capacities` and `overrides`.
    ///
    /// # Errors
    ///
    /// Propagates selector precondition failures from the leaves.
    pub fn resolve(&self, capacities: Capacities, overrides: ModifierOverrides) -> Result<Branch> {
        self.resolve_from(0, capacities, overrides)
    }

    fn resolve_from(
        &self,
        index: usize,
        capacities: Capacities,
        overrides: ModifierOverrides,
    ) -> Result<Branch> {
        self.planner.stats().record_branch();

        let Some(choice) = self.choices.get(index) else {
            let (value, entries) = self.planner.plan_categories(&capacities, overrides)?;
            return Ok(Branch {
                value,
                entries,
                implied: overrides,
                secondary_delta: 0,
            });
        };
        let entry = &choice.interacting.entry;
        let rule = &choice.interacting.rule;

        if choice.maximum == Some(0) {
            self.planner.stats().record_skip();
            trace!(event = "branch", depth = index, entry = %entry, decision = "skip");
            return self.resolve_from(index + 1, capacities, overrides);
        }

        // Organs driven below zero stay negative; the leaf leaves them unplanned.
        let mut with_capacities = capacities;
        for (organ, delta) in rule.deltas().filter(|(organ, _)| organ.is_primary()) {
            with_capacities[organ] += delta;
        }
        let with_overrides = overrides.union(rule.implies());

        let (without, mut with) = if self.parallel {
            let (without, with) = rayon::join(
                || self.resolve_from(index + 1, capacities, overrides),
                || self.resolve_from(index + 1, with_capacities, with_overrides),
            );
            (without?, with?)
        } else {
            let without = self.resolve_from(index + 1, capacities, overrides)?;
            let with = self.resolve_from(index + 1, with_capacities, with_overrides)?;
            (without, with)
        };

        with.value += choice.standalone;
        with.secondary_delta += rule.delta(Organ::Spleen);

        let spleen_value = self.planner.spleen_value();
        if strictly_greater(with.score(spleen_value), without.score(spleen_value)) {
            trace!(
                event = "branch",
                depth = index,
                entry = %entry,
                decision = "with",
                value = with.score(spleen_value),
            );
            with.entries.insert(0, PlanEntry::new(choice.bundle.clone(), 1));
            Ok(with)
        } else {
            trace!(
                event = "branch",
                depth = index,
                entry = %entry,
                decision = "without",
                value = without.score(spleen_value),
            );
            Ok(without)
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

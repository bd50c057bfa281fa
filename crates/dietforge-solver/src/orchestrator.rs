//! Top-level planning.
//!
//! Resolves capacities, runs the resolver over the primary organs, then
//! plans spleen once with whatever the primary plan cleaned.

use std::time::Instant;

use dietforge_config::{CapacityConfig, CapacitySetting, DietConfig};
use dietforge_core::{
    known, Capacities, DietForgeError, Entry, ModifierOverrides, Organ, Result, Snapshot,
    StateProvider,
};
use tracing::{info, warn};

use crate::interaction::InteractionTable;
use crate::plan::{Plan, PlanEntry, ValueMethod};
use crate::planner::AllocationPlanner;
use crate::resolver::InteractionResolver;
use crate::stats::PlanningStats;

/// Inputs of one planning call besides the catalog and snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub value_per_adventure: f64,
    pub capacity: CapacityConfig,
    pub parallel_branches: bool,
}

impl PlanRequest {
    /// A request deriving every capacity from the snapshot.
    pub fn new(value_per_adventure: f64) -> Self {
        Self {
            value_per_adventure,
            capacity: CapacityConfig::default(),
            parallel_branches: false,
        }
    }

    pub fn with_capacity(mut self, organ: Organ, capacity: i64) -> Self {
        self.capacity.set(organ, CapacitySetting::Fixed(capacity));
        self
    }

    pub fn with_capacity_config(mut self, capacity: CapacityConfig) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_parallel_branches(mut self, parallel: bool) -> Self {
        self.parallel_branches = parallel;
        self
    }

    /// Builds a request from `config`; an explicit `mpa` wins over the
    /// configured one.
    ///
    /// # Errors
    ///
    /// Returns [`DietForgeError::Config`] when neither supplies a value per
    /// adventure.
    pub fn from_config(config: &DietConfig, mpa: Option<f64>) -> Result<Self> {
        let mpa = mpa.or(config.value_per_adventure).ok_or_else(|| {
            DietForgeError::Config("no value_per_adventure given or configured".to_string())
        })?;
        Ok(Self {
            value_per_adventure: mpa,
            capacity: config.capacity,
            parallel_branches: config.parallel_branches,
        })
    }

    /// Capacity of every organ: the fixed override, or `limit - used` read
    /// from `snapshot`.
    pub fn resolve_capacities(&self, snapshot: &Snapshot) -> Capacities {
        let mut capacities = Capacities::default();
        for organ in Organ::ALL {
            capacities[organ] = match self.capacity.get(organ) {
                CapacitySetting::Fixed(capacity) => capacity,
                CapacitySetting::Derive(_) => snapshot.organ_usage(organ).remaining(),
            };
        }
        capacities
    }
}

/// Runs planning calls against one interaction table.
///
/// # Examples
///
/// ```
/// use dietforge_core::{Entry, Organ, Resource, Snapshot, YieldRange};
/// use dietforge_solver::{Orchestrator, PlanRequest};
///
/// let pizza = Entry::new(
///     Resource::new("pizza").with_adventures(YieldRange::new(3, 5)),
///     Some(Organ::Food),
///     1,
/// );
/// let request = PlanRequest::new(100.0)
///     .with_capacity(Organ::Food, 2)
///     .with_capacity(Organ::Booze, 0)
///     .with_capacity(Organ::Spleen, 0);
///
/// let plan = Orchestrator::new()
///     .plan(&request, &[pizza], &Snapshot::new())
///     .unwrap();
///
/// assert_eq!(plan.quantity_of("pizza"), 2);
/// assert_eq!(plan.expected_adventures(&Snapshot::new()), 8.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    table: InteractionTable,
}

impl Orchestrator {
    /// An orchestrator using the built-in interaction rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: InteractionTable) -> Self {
        Self { table }
    }

    /// Built-in rules plus the ones `config` declares.
    pub fn from_config(config: &DietConfig) -> Self {
        Self::with_table(InteractionTable::default().with_config_rules(&config.interactions))
    }

    pub fn table(&self) -> &InteractionTable {
        &self.table
    }

    pub fn plan(
        &self,
        request: &PlanRequest,
        catalog: &[Entry],
        snapshot: &Snapshot,
    ) -> Result<Plan> {
        self.plan_with_stats(request, catalog, snapshot)
            .map(|(plan, _)| plan)
    }

    /// Plans the day and reports search statistics alongside.
    ///
    /// # Errors
    ///
    /// Returns [`DietForgeError::Precondition`] for a non-finite or negative
    /// value per adventure, or when the selector rejects its input.
    pub fn plan_with_stats(
        &self,
        request: &PlanRequest,
        catalog: &[Entry],
        snapshot: &Snapshot,
    ) -> Result<(Plan, PlanningStats)> {
        let started = Instant::now();
        let mpa = request.value_per_adventure;
        if !mpa.is_finite() || mpa < 0.0 {
            return Err(DietForgeError::Precondition(format!(
                "value per adventure must be finite and non-negative, got {mpa}"
            )));
        }
        let capacities = request.resolve_capacities(snapshot);

        let planner = AllocationPlanner::new(mpa, catalog, snapshot, &self.table);
        info!(
            event = "plan_start",
            mpa,
            entries = planner.simple_entries().len(),
            interacting = planner.interacting().len(),
            food = capacities[Organ::Food],
            booze = capacities[Organ::Booze],
            spleen = capacities[Organ::Spleen],
        );

        let branch = InteractionResolver::new(&planner)
            .with_parallel_branches(request.parallel_branches)
            .resolve(capacities, ModifierOverrides::none())?;

        let cleaned = spleen_cleaned(&branch.entries);
        let spleen = capacities[Organ::Spleen] + branch.secondary_delta + cleaned;
        let mut entries = branch.entries;
        if spleen < 0 {
            warn!(event = "organ_skipped", organ = %Organ::Spleen, capacity = spleen);
        } else {
            let (_, spleen_plan) = planner.plan_category(Organ::Spleen, spleen, branch.implied)?;
            entries.extend(spleen_plan);
        }

        let plan = Plan::new(entries, branch.implied);
        let mut stats = planner.finish();
        stats.elapsed = started.elapsed();

        info!(
            event = "plan_end",
            adventures = plan.expected_adventures(snapshot),
            value = plan.expected_value(mpa, snapshot, ValueMethod::Net),
            branches = stats.branches_explored,
            skipped = stats.branches_skipped,
            duration_ms = stats.elapsed_ms(),
        );
        Ok((plan, stats))
    }
}

/// Spleen freed by the cleaners in `entries`.
fn spleen_cleaned(entries: &[PlanEntry]) -> i64 {
    entries
        .iter()
        .filter(|e| known::is_spleen_cleaner(e.bundle.target().id().as_str()))
        .map(|e| known::SPLEEN_CLEANED_PER_USE * i64::from(e.quantity))
        .sum()
}

/// Plans a day with the built-in interaction rules.
///
/// # Examples
///
/// ```
/// use dietforge_config::CapacityConfig;
/// use dietforge_core::{Entry, Organ, OrganUsage, Resource, Snapshot, YieldRange};
/// use dietforge_solver::plan_diet;
///
/// let beer = Entry::new(
///     Resource::new("beer").with_adventures(YieldRange::single(3)),
///     Some(Organ::Booze),
///     1,
/// );
/// let snapshot = Snapshot::new().with_usage(Organ::Booze, OrganUsage::new(12, 14));
///
/// let plan = plan_diet(1000.0, &[beer], &CapacityConfig::default(), &snapshot).unwrap();
/// assert_eq!(plan.quantity_of("beer"), 2);
/// ```
pub fn plan_diet(
    mpa: f64,
    catalog: &[Entry],
    capacity: &CapacityConfig,
    snapshot: &Snapshot,
) -> Result<Plan> {
    let request = PlanRequest::new(mpa).with_capacity_config(*capacity);
    Orchestrator::new().plan(&request, catalog, snapshot)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

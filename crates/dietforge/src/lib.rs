//! DietForge - a consumption planner in Rust
//!
//! Given a catalog of consumables, a value per adventure and a snapshot of
//! the day's state, pick what to eat, drink and chew to maximize net value.
//!
//! # Example
//!
//! ```rust
//! use dietforge::prelude::*;
//!
//! let pizza = Entry::new(
//!     Resource::new("pizza").with_adventures(YieldRange::new(3, 5)),
//!     Some(Organ::Food),
//!     1,
//! );
//! let snapshot = Snapshot::new().with_usage(Organ::Food, OrganUsage::new(13, 15));
//! let config = DietConfig::new().with_value_per_adventure(100.0);
//!
//! let plan = dietforge::plan_with_config(&config, None, &[pizza], &snapshot).unwrap();
//! assert_eq!(plan.quantity_of("pizza"), 2);
//! ```

use tracing::debug;

pub use dietforge_config::{CapacityConfig, CapacitySetting, ConfigError, DietConfig};
pub use dietforge_core::{
    known, Capacities, DietForgeError, Entry, ModifierFlag, ModifierOverrides, Organ,
    OrganUsage, Resource, Result, Snapshot, StateProvider, YieldRange,
};
pub use dietforge_solver::{
    plan_diet, InteractionRule, InteractionTable, Orchestrator, Plan, PlanEntry, PlanRequest,
    PlanSummary, PlanningStats, ValueMethod,
};

/// Configuration file [`plan`] reads from the working directory.
pub const CONFIG_FILE: &str = "dietforge.toml";

/// Plans with `dietforge.toml` from the working directory, or the defaults
/// when it is missing or unreadable.
///
/// # Errors
///
/// Returns [`DietForgeError::Config`] when no value per adventure is
/// configured, and planning errors otherwise.
pub fn plan(catalog: &[Entry], snapshot: &Snapshot) -> Result<Plan> {
    let config = DietConfig::load(CONFIG_FILE).unwrap_or_else(|err| {
        debug!(event = "config_default", file = CONFIG_FILE, error = %err);
        DietConfig::default()
    });
    plan_with_config(&config, None, catalog, snapshot)
}

/// Plans with an explicit configuration; `mpa` overrides the configured value
/// per adventure.
pub fn plan_with_config(
    config: &DietConfig,
    mpa: Option<f64>,
    catalog: &[Entry],
    snapshot: &Snapshot,
) -> Result<Plan> {
    #[cfg(feature = "console")]
    dietforge_console::init();

    let request = PlanRequest::from_config(config, mpa)?;
    Orchestrator::from_config(config).plan(&request, catalog, snapshot)
}

pub mod prelude {
    pub use super::{
        plan_diet, CapacityConfig, DietConfig, DietForgeError, Entry, ModifierFlag, Orchestrator,
        Organ, OrganUsage, Plan, PlanRequest, Resource, Snapshot, StateProvider, ValueMethod,
        YieldRange,
    };
}

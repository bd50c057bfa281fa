//! DietForge Solver
//!
//! This crate provides the allocation optimizer:
//! - Bounded knapsack selector for a single organ
//! - Allocation planner (helper bundling, per-entry values, per-organ plans)
//! - Interaction table and exhaustive interaction resolver
//! - Plans and their aggregates
//! - Top-level orchestration and planning statistics

pub mod interaction;
pub mod orchestrator;
pub mod plan;
pub mod planner;
pub mod resolver;
pub mod selector;
pub mod stats;

pub use interaction::{InteractionRule, InteractionTable};
pub use orchestrator::{plan_diet, Orchestrator, PlanRequest};
pub use plan::{Bundle, Plan, PlanEntry, PlanSummary, PlanSummaryEntry, ValueMethod};
pub use planner::{AllocationPlanner, Interacting};
pub use resolver::{Branch, InteractionResolver};
pub use selector::{knapsack, Row, Selection, SelectorError};
pub use stats::{PlanningStats, StatsCollector};

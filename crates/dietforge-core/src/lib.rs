//! DietForge Core - Core types for diet planning
//!
//! This crate provides the fundamental abstractions for DietForge:
//! - Organs (the independent capacity dimensions) and their capacities
//! - Resources and catalog entries
//! - Modifier flags and the adventure yield model
//! - The read-only state interface and its captured snapshot

pub mod entry;
pub mod error;
pub mod known;
pub mod modifiers;
pub mod organ;
pub mod state;
pub mod yield_model;


pub use entry::{EffectId, Entry, EntryKey, Note, Resource, ResourceId, YieldRange};
pub use error::{DietForgeError, Result};
pub use modifiers::{ModifierFlag, ModifierOverrides, Modifiers};
pub use organ::{Capacities, Organ, OrganUsage};
pub use state::{Snapshot, StateProvider};
pub use yield_model::{expected_adventures, fork_mug_multiplier, seasoning_bonus};

/// Tolerance used for every value comparison made while planning.
///
/// Two values closer than this are treated as equal, so the branch or bundle
/// favoured on ties is the same regardless of floating point noise.
pub const VALUE_EPSILON: f64 = 1e-9;

/// Returns true if `a` beats `b` by more than [`VALUE_EPSILON`].
#[inline]
pub fn strictly_greater(a: f64, b: f64) -> bool {
    a > b + VALUE_EPSILON
}

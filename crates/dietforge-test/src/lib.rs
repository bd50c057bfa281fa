//! Shared test fixtures for DietForge crates.
//!
//! This crate provides ready-made catalog entries and state providers.
//! It only depends on `dietforge-core` so every other crate can use it as a
//! dev-dependency.
//!
//! - [`catalog`] - Entry builders for common consumables and helpers
//! - [`state`] - A fixed [`StateProvider`](dietforge_core::StateProvider)
//!   and snapshot helpers
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! dietforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use dietforge_test::catalog::{food, fork};
//! use dietforge_test::state::snapshot_with_capacity;
//!
//! let catalog = vec![food("pizza", 3, 5, 1), fork(50.0)];
//! let snapshot = snapshot_with_capacity(2, 0, 0);
//! assert_eq!(catalog.len(), 2);
//! ```

pub mod catalog;
pub mod state;

pub use state::{snapshot_with_capacity, FixedState};

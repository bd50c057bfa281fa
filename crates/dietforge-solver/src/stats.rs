//! Planning statistics.
//!
//! Counters are atomic so branches evaluated under `rayon::join` can record
//! into the same collector.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Final statistics of one planning call.
///
/// # Example
///
/// ```
/// use dietforge_solver::stats::StatsCollector;
///
/// let collector = StatsCollector::new();
/// collector.record_branch();
/// collector.record_branch();
/// collector.record_skip();
/// collector.record_selector_call(4);
///
/// let stats = collector.into_stats();
/// assert_eq!(stats.branches_explored, 2);
/// assert_eq!(stats.branches_skipped, 1);
/// assert_eq!(stats.rows_evaluated, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanningStats {
    /// Resolver nodes visited, leaves included.
    pub branches_explored: u64,
    /// Interacting entries passed over because no uses remain.
    pub branches_skipped: u64,
    /// Knapsack invocations.
    pub selector_calls: u64,
    /// Knapsack rows built across all invocations.
    pub rows_evaluated: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl PlanningStats {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Average rows per knapsack call.
    pub fn rows_per_call(&self) -> f64 {
        if self.selector_calls == 0 {
            0.0
        } else {
            self.rows_evaluated as f64 / self.selector_calls as f64
        }
    }
}

/// Thread-safe collector for [`PlanningStats`].
#[derive(Debug)]
pub struct StatsCollector {
    start_time: Instant,
    branches_explored: AtomicU64,
    branches_skipped: AtomicU64,
    selector_calls: AtomicU64,
    rows_evaluated: AtomicU64,
}

impl StatsCollector {
    /// Creates a collector; the clock starts now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            branches_explored: AtomicU64::new(0),
            branches_skipped: AtomicU64::new(0),
            selector_calls: AtomicU64::new(0),
            rows_evaluated: AtomicU64::new(0),
        }
    }

    pub fn record_branch(&self) {
        self.branches_explored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.branches_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one knapsack call over `rows` rows.
    pub fn record_selector_call(&self, rows: usize) {
        self.selector_calls.fetch_add(1, Ordering::Relaxed);
        self.rows_evaluated.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn current_branches(&self) -> u64 {
        self.branches_explored.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Reads the counters without consuming the collector.
    pub fn snapshot(&self) -> PlanningStats {
        PlanningStats {
            branches_explored: self.branches_explored.load(Ordering::Relaxed),
            branches_skipped: self.branches_skipped.load(Ordering::Relaxed),
            selector_calls: self.selector_calls.load(Ordering::Relaxed),
            rows_evaluated: self.rows_evaluated.load(Ordering::Relaxed),
            elapsed: self.elapsed(),
        }
    }

    pub fn into_stats(self) -> PlanningStats {
        self.snapshot()
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounded knapsack selection for a single organ.
//!
//! Given rows of `(item, value, size, maximum)` and a capacity, picks the
//! quantity of every row that maximizes the total value without exceeding
//! the capacity.
//!
//! Rows with a negative size give capacity back. They must be bounded: the
//! selector takes all of them up front, adds the capacity they free, and
//! turns "not taking one" into an ordinary positive-size choice. Zero-size
//! rows are taken to their maximum when their value is positive.
//!
//! Bounded rows are split into power-of-two pieces and solved as a 0/1
//! knapsack over integer capacity. Pieces are visited in input order and a
//! piece is only taken when it is strictly better, so equal-value
//! alternatives always resolve the same way.

use dietforge_core::{strictly_greater, DietForgeError};
use thiserror::Error;

/// Violations of the selector's input contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("capacity {0} is negative")]
    NegativeCapacity(i64),

    #[error("row {index} has a non-finite value")]
    NonFiniteValue { index: usize },

    #[error("row {index} restores capacity without a maximum")]
    UnboundedRestoring { index: usize },

    #[error("row {index} has zero size and positive value without a maximum")]
    UnboundedFree { index: usize },

    #[error("adjusted capacity {0} is too large to tabulate")]
    CapacityOverflow(i64),
}

impl From<SelectorError> for DietForgeError {
    fn from(err: SelectorError) -> Self {
        DietForgeError::Precondition(err.to_string())
    }
}

/// One candidate row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub item: T,
    /// Value of one unit.
    pub value: f64,
    /// Capacity one unit consumes; negative restores capacity.
    pub size: i64,
    /// Upper bound on the quantity; `None` is unbounded.
    pub maximum: Option<u32>,
}

impl<T> Row<T> {
    pub fn new(item: T, value: f64, size: i64, maximum: Option<u32>) -> Self {
        Self {
            item,
            value,
            size,
            maximum,
        }
    }
}

/// The selector's result.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    /// Sum of `quantity * value` over the chosen rows.
    pub value: f64,
    /// Chosen rows with a positive quantity, in input order.
    pub chosen: Vec<(T, u32)>,
}

impl<T> Selection<T> {
    pub fn empty() -> Self {
        Self {
            value: 0.0,
            chosen: Vec::new(),
        }
    }
}

/// Largest tabulated capacity; far above any organ.
const MAX_TABLE_CAPACITY: i64 = 1 << 20;

// A 0/1 piece standing for `count` units of one row.
struct Piece {
    row: usize,
    count: u32,
    weight: usize,
    value: f64,
    // Taking this piece removes units from a fully-taken restoring row.
    untake: bool,
}

/// Solves the bounded knapsack over `rows` with `capacity`.
///
/// # Errors
///
/// Returns [`SelectorError`] for a negative capacity, a non-finite value, an
/// unbounded restoring row or an unbounded free row with positive value.
///
/// # Examples
///
/// ```
/// use dietforge_solver::selector::{knapsack, Row};
///
/// let rows = vec![
///     Row::new("big", 9.0, 3, None),
///     Row::new("small", 4.0, 1, Some(2)),
/// ];
/// let selection = knapsack(rows, 4).unwrap();
///
/// assert_eq!(selection.value, 13.0);
/// assert_eq!(selection.chosen, vec![("big", 1), ("small", 1)]);
/// ```
pub fn knapsack<T>(rows: Vec<Row<T>>, capacity: i64) -> Result<Selection<T>, SelectorError> {
    if capacity < 0 {
        return Err(SelectorError::NegativeCapacity(capacity));
    }

    let mut counts = vec![0u32; rows.len()];
    let mut adjusted = capacity;

    for (index, row) in rows.iter().enumerate() {
        if !row.value.is_finite() {
            return Err(SelectorError::NonFiniteValue { index });
        }
        if row.size < 0 {
            let maximum = row
                .maximum
                .ok_or(SelectorError::UnboundedRestoring { index })?;
            counts[index] = maximum;
            adjusted = adjusted.saturating_add((-row.size).saturating_mul(i64::from(maximum)));
        } else if row.size == 0 && row.value > 0.0 {
            counts[index] = row.maximum.ok_or(SelectorError::UnboundedFree { index })?;
        }
    }
    if adjusted > MAX_TABLE_CAPACITY {
        return Err(SelectorError::CapacityOverflow(adjusted));
    }
    let adjusted = adjusted as usize;

    let pieces = split_into_pieces(&rows, adjusted);
    let taken = solve_zero_one(&pieces, adjusted);

    for (piece, take) in pieces.iter().zip(taken) {
        if !take {
            continue;
        }
        if piece.untake {
            counts[piece.row] -= piece.count;
        } else {
            counts[piece.row] += piece.count;
        }
    }

    let mut value = 0.0;
    let mut chosen = Vec::new();
    for (row, count) in rows.into_iter().zip(counts) {
        if count > 0 {
            value += row.value * f64::from(count);
            chosen.push((row.item, count));
        }
    }
    Ok(Selection { value, chosen })
}

fn split_into_pieces<T>(rows: &[Row<T>], capacity: usize) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let (weight, value, untake) = match row.size {
            s if s > 0 => (s as usize, row.value, false),
            s if s < 0 => ((-s) as usize, -row.value, true),
            _ => continue,
        };
        // Pieces that cannot help are skipped up front.
        if value <= 0.0 {
            continue;
        }
        let fit = (capacity / weight) as u64;
        let bound = match row.maximum {
            Some(maximum) => u64::from(maximum).min(fit),
            None => fit,
        } as u32;

        let mut remaining = bound;
        let mut chunk = 1u32;
        while remaining > 0 {
            let count = chunk.min(remaining);
            pieces.push(Piece {
                row: index,
                count,
                weight: weight * count as usize,
                value: value * f64::from(count),
                untake,
            });
            remaining -= count;
            chunk = chunk.saturating_mul(2);
        }
    }
    pieces
}

// Returns, per piece, whether it is part of the best packing within `capacity`.
fn solve_zero_one(pieces: &[Piece], capacity: usize) -> Vec<bool> {
    let width = capacity + 1;
    let mut best = vec![0.0f64; width];
    let mut keep = vec![false; pieces.len() * width];

    for (p, piece) in pieces.iter().enumerate() {
        if piece.weight > capacity {
            continue;
        }
        for c in (piece.weight..=capacity).rev() {
            let candidate = best[c - piece.weight] + piece.value;
            if strictly_greater(candidate, best[c]) {
                best[c] = candidate;
                keep[p * width + c] = true;
            }
        }
    }

    let mut taken = vec![false; pieces.len()];
    let mut c = capacity;
    for p in (0..pieces.len()).rev() {
        if keep[p * width + c] {
            taken[p] = true;
            c -= pieces[p].weight;
        }
    }
    taken
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;

//! Organs: the independent capacity dimensions of a day's diet.

use std::fmt;
use std::ops::{Index, IndexMut};

/// One capacity dimension.
///
/// `Food` and `Booze` are the primary organs and are planned together with
/// every interacting entry. `Spleen` is the secondary organ, planned last
/// once the primary plan has revealed how much spleen it cleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Organ {
    Food,
    Booze,
    Spleen,
}

impl Organ {
    /// All organs in planning order.
    pub const ALL: [Organ; 3] = [Organ::Food, Organ::Booze, Organ::Spleen];

    /// The organs planned jointly by the interaction resolver.
    pub const PRIMARY: [Organ; 2] = [Organ::Food, Organ::Booze];

    /// The organ planned after the primary plan is fixed.
    pub const SECONDARY: Organ = Organ::Spleen;

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Organ::Food => 0,
            Organ::Booze => 1,
            Organ::Spleen => 2,
        }
    }

    #[inline]
    pub fn is_primary(self) -> bool {
        self != Organ::SECONDARY
    }

    pub fn name(self) -> &'static str {
        match self {
            Organ::Food => "food",
            Organ::Booze => "booze",
            Organ::Spleen => "spleen",
        }
    }
}

impl fmt::Display for Organ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current usage and hard limit of one organ, as read from live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrganUsage {
    pub used: i64,
    pub limit: i64,
}

impl OrganUsage {
    pub const fn new(used: i64, limit: i64) -> Self {
        Self { used, limit }
    }

    /// Capacity left today. May be negative when usage exceeds the limit.
    #[inline]
    pub const fn remaining(&self) -> i64 {
        self.limit - self.used
    }
}

/// Signed capacity per organ.
///
/// Small and `Copy` so every search branch can own its own value.
///
/// # Examples
///
/// ```
/// use dietforge_core::{Capacities, Organ};
///
/// let caps = Capacities::new(15, 14, 15).with_delta(Organ::Food, -3);
/// assert_eq!(caps[Organ::Food], 12);
/// assert_eq!(caps[Organ::Booze], 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacities([i64; 3]);

impl Capacities {
    pub const fn new(food: i64, booze: i64, spleen: i64) -> Self {
        Self([food, booze, spleen])
    }

    #[inline]
    pub fn get(&self, organ: Organ) -> i64 {
        self.0[organ.index()]
    }

    /// Returns a copy with `delta` added to `organ`.
    #[must_use]
    pub fn with_delta(mut self, organ: Organ, delta: i64) -> Self {
        self.0[organ.index()] += delta;
        self
    }

    /// Returns a copy with `organ` set to `value`.
    #[must_use]
    pub fn with(mut self, organ: Organ, value: i64) -> Self {
        self.0[organ.index()] = value;
        self
    }

    /// Organs from `organs` whose capacity is non-negative, in the given order.
    pub fn eligible<'a>(&'a self, organs: &'a [Organ]) -> impl Iterator<Item = (Organ, i64)> + 'a {
        organs
            .iter()
            .map(move |&organ| (organ, self.get(organ)))
            .filter(|&(_, capacity)| capacity >= 0)
    }
}

impl Index<Organ> for Capacities {
    type Output = i64;

    fn index(&self, organ: Organ) -> &i64 {
        &self.0[organ.index()]
    }
}

impl IndexMut<Organ> for Capacities {
    fn index_mut(&mut self, organ: Organ) -> &mut i64 {
        &mut self.0[organ.index()]
    }
}

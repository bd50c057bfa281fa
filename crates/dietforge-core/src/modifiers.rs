//! Yield modifiers.
//!
//! [`Modifiers`] is the explicit flag set one yield evaluation runs under.
//! [`ModifierOverrides`] is the set of flags a search branch forces on; it is
//! layered over the base modifiers read from the snapshot.

use std::fmt;

/// A single switchable yield modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierFlag {
    /// Value-multiplying companion (salad fork for food, frosty mug for booze).
    ForkMug,
    /// Special Seasoning bundled with food.
    Seasoning,
    /// Mayoflex bundled with food.
    Mayoflex,
    Saucemaven,
    Garish,
    RefinedPalate,
    PinkyRing,
    TuxedoShirt,
    WhetStone,
}

impl ModifierFlag {
    pub const ALL: [ModifierFlag; 9] = [
        ModifierFlag::ForkMug,
        ModifierFlag::Seasoning,
        ModifierFlag::Mayoflex,
        ModifierFlag::Saucemaven,
        ModifierFlag::Garish,
        ModifierFlag::RefinedPalate,
        ModifierFlag::PinkyRing,
        ModifierFlag::TuxedoShirt,
        ModifierFlag::WhetStone,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn name(self) -> &'static str {
        match self {
            ModifierFlag::ForkMug => "fork_mug",
            ModifierFlag::Seasoning => "seasoning",
            ModifierFlag::Mayoflex => "mayoflex",
            ModifierFlag::Saucemaven => "saucemaven",
            ModifierFlag::Garish => "garish",
            ModifierFlag::RefinedPalate => "refined_palate",
            ModifierFlag::PinkyRing => "pinky_ring",
            ModifierFlag::TuxedoShirt => "tuxedo_shirt",
            ModifierFlag::WhetStone => "whet_stone",
        }
    }
}

impl fmt::Display for ModifierFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags forced on by a search branch.
///
/// # Examples
///
/// ```
/// use dietforge_core::{ModifierFlag, ModifierOverrides, Modifiers};
///
/// let overrides = ModifierOverrides::none().with(ModifierFlag::RefinedPalate);
/// let modifiers = overrides.apply(Modifiers::default());
///
/// assert!(modifiers.refined_palate);
/// assert!(!modifiers.garish);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierOverrides(u16);

impl ModifierOverrides {
    pub const fn none() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, flag: ModifierFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    pub fn insert(&mut self, flag: ModifierFlag) {
        self.0 |= flag.bit();
    }

    #[must_use]
    pub const fn union(self, other: ModifierOverrides) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, flag: ModifierFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ModifierFlag> + '_ {
        ModifierFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }

    /// Switches every contained flag on in `modifiers`.
    pub fn apply(&self, mut modifiers: Modifiers) -> Modifiers {
        for flag in self.iter() {
            modifiers.set(flag, true);
        }
        modifiers
    }
}

impl FromIterator<ModifierFlag> for ModifierOverrides {
    fn from_iter<I: IntoIterator<Item = ModifierFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// Snapshot of the conditions active for one yield evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub fork_mug: bool,
    pub seasoning: bool,
    pub mayoflex: bool,
    pub saucemaven: bool,
    pub garish: bool,
    pub refined_palate: bool,
    pub pinky_ring: bool,
    pub tuxedo_shirt: bool,
    pub whet_stone: bool,
    /// Today is the excluded recurring day (no lasagna bonus).
    pub monday: bool,
    /// Mysticality is the dominant attribute (bigger saucy bonus).
    pub mysticality_prime: bool,
}

impl Modifiers {
    pub fn get(&self, flag: ModifierFlag) -> bool {
        match flag {
            ModifierFlag::ForkMug => self.fork_mug,
            ModifierFlag::Seasoning => self.seasoning,
            ModifierFlag::Mayoflex => self.mayoflex,
            ModifierFlag::Saucemaven => self.saucemaven,
            ModifierFlag::Garish => self.garish,
            ModifierFlag::RefinedPalate => self.refined_palate,
            ModifierFlag::PinkyRing => self.pinky_ring,
            ModifierFlag::TuxedoShirt => self.tuxedo_shirt,
            ModifierFlag::WhetStone => self.whet_stone,
        }
    }

    pub fn set(&mut self, flag: ModifierFlag, on: bool) {
        let slot = match flag {
            ModifierFlag::ForkMug => &mut self.fork_mug,
            ModifierFlag::Seasoning => &mut self.seasoning,
            ModifierFlag::Mayoflex => &mut self.mayoflex,
            ModifierFlag::Saucemaven => &mut self.saucemaven,
            ModifierFlag::Garish => &mut self.garish,
            ModifierFlag::RefinedPalate => &mut self.refined_palate,
            ModifierFlag::PinkyRing => &mut self.pinky_ring,
            ModifierFlag::TuxedoShirt => &mut self.tuxedo_shirt,
            ModifierFlag::WhetStone => &mut self.whet_stone,
        };
        *slot = on;
    }

    #[must_use]
    pub fn with(mut self, flag: ModifierFlag) -> Self {
        self.set(flag, true);
        self
    }
}

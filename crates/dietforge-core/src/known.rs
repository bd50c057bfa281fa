//! Names of resources, effects and skills the planner recognises.

/// Food companion that multiplies food yield.
pub const SALAD_FORK: &str = "Ol' Scratch's salad fork";
/// Booze companion that multiplies booze yield.
pub const FROSTY_MUG: &str = "Frosty's frosty mug";
/// Flat-bonus companion for food.
pub const SPECIAL_SEASONING: &str = "Special Seasoning";

/// The mayo variant that adds a flat adventure to food.
pub const MAYOFLEX: &str = "Mayoflex";
/// Interchangeable auxiliary variants that pair with food.
pub const MAYO_VARIANTS: [&str; 5] = ["Mayoflex", "Mayodiol", "Mayostat", "Mayozapine", "Mayonex"];

/// Food that cleans spleen after eating.
pub const EXTRA_GREASY_SLIDER: &str = "extra-greasy slider";
/// Booze that cleans spleen after drinking.
pub const FERMENTED_PICKLE_JUICE: &str = "jar of fermented pickle juice";
/// The primary entries that unlock secondary capacity.
pub const SPLEEN_CLEANERS: [&str; 2] = [EXTRA_GREASY_SLIDER, FERMENTED_PICKLE_JUICE];
/// Spleen unlocked per use of a spleen cleaner.
pub const SPLEEN_CLEANED_PER_USE: i64 = 5;

pub const REFINED_PALATE: &str = "Refined Palate";
pub const GARISH: &str = "Gar-ish";
pub const WHETTED: &str = "Whetted";
pub const SAUCEMAVEN: &str = "Saucemaven";
pub const PINKY_RING: &str = "mafia pinky ring";
pub const TUXEDO_SHIRT: &str = "tuxedo shirt";

/// Returns true for any mayo variant name.
pub fn is_mayo(name: &str) -> bool {
    MAYO_VARIANTS.contains(&name)
}

/// Returns true for the primary entries that clean spleen.
pub fn is_spleen_cleaner(name: &str) -> bool {
    SPLEEN_CLEANERS.contains(&name)
}

//! Resources and catalog entries.
//!
//! A [`Resource`] is the static description of a consumable. An [`Entry`]
//! wraps a resource with everything the planner needs to reason about it:
//! its organ, per-use size, how many uses are left, its price and the
//! optional side-effect and auxiliary-variant links.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{DietForgeError, Result};
use crate::organ::Organ;

/// Name of a consumable or helper resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ResourceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of an effect granted by an entry (its side-effect variant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectId(String);

impl EffectId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive range of base adventures a resource yields per use.
///
/// # Examples
///
/// ```
/// use dietforge_core::YieldRange;
///
/// assert_eq!(YieldRange::parse("3-5"), Some(YieldRange::new(3, 5)));
/// assert_eq!(YieldRange::parse("4"), Some(YieldRange::single(4)));
/// assert_eq!(YieldRange::parse("lots"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldRange {
    pub min: i64,
    pub max: i64,
}

impl YieldRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Parses the `"min-max"` or `"value"` text form.
    ///
    /// Returns `None` for anything malformed; callers treat that as a resource
    /// with no yield.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        // A leading '-' belongs to a negative minimum, not the separator.
        let split_at = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i);
        match split_at {
            Some(i) => {
                let min = text[..i].trim().parse().ok()?;
                let max = text[i + 1..].trim().parse().ok()?;
                Some(Self::new(min, max))
            }
            None => text.parse().ok().map(Self::single),
        }
    }

    /// Every integer in the range. Empty when `max < min`.
    pub fn values(&self) -> impl Iterator<Item = i64> {
        self.min..=self.max
    }

    /// Number of integers in the range.
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the range (`max - min`).
    pub fn spread(&self) -> i64 {
        self.max - self.min
    }
}

/// Flags on a resource that the yield model reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Note {
    Salad,
    Beer,
    Wine,
    Martini,
    Saucy,
    Lasagna,
}

/// Static description of a consumable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub id: ResourceId,
    pub adventures: Option<YieldRange>,
    pub notes: BTreeSet<Note>,
    pub level_requirement: u32,
}

impl Resource {
    /// Creates a resource with no yield, notes or level requirement.
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            adventures: None,
            notes: BTreeSet::new(),
            level_requirement: 0,
        }
    }

    pub fn with_adventures(mut self, range: YieldRange) -> Self {
        self.adventures = Some(range);
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note);
        self
    }

    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    #[inline]
    pub fn has_note(&self, note: Note) -> bool {
        self.notes.contains(&note)
    }
}

impl From<&str> for Resource {
    fn from(name: &str) -> Self {
        Resource::new(name)
    }
}

/// Identity of a logical choice: the resource plus its side-effect variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub resource: ResourceId,
    pub effect: Option<EffectId>,
}

/// One selectable catalog item.
///
/// Built once per planning call by the catalog collaborator and never
/// mutated by the planner.
///
/// # Examples
///
/// ```
/// use dietforge_core::{Entry, Organ, Resource, YieldRange};
///
/// let pizza = Entry::new(
///     Resource::new("pizza").with_adventures(YieldRange::new(3, 5)),
///     Some(Organ::Food),
///     1,
/// )
/// .with_maximum(2)
/// .with_price(0.0);
///
/// assert_eq!(pizza.maximum, Some(2));
/// assert!(pizza.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub resource: Resource,
    /// `None` for entries that occupy no organ (helpers, wishes, potions).
    pub organ: Option<Organ>,
    /// Capacity consumed per use; negative only for restoring entries.
    pub size: i64,
    /// Uses left today; `None` is unlimited.
    pub maximum: Option<u32>,
    /// Price override; the snapshot price is used when unset.
    pub price: Option<f64>,
    /// Flat value added per use, independent of yield.
    pub additional_value: f64,
    /// Effect variant distinguishing entries that wrap the same resource.
    pub effect: Option<EffectId>,
    /// Designated auxiliary (mayo) variant to pair with this entry.
    pub mayo: Option<ResourceId>,
    #[cfg_attr(feature = "serde", serde(default))]
    restores_capacity: bool,
}

impl Entry {
    pub fn new(resource: impl Into<Resource>, organ: Option<Organ>, size: i64) -> Self {
        Self {
            resource: resource.into(),
            organ,
            size,
            maximum: None,
            price: None,
            additional_value: 0.0,
            effect: None,
            mayo: None,
            restores_capacity: false,
        }
    }

    /// Creates an entry that gives capacity back; `size` may be negative.
    pub fn restoring(resource: impl Into<Resource>, organ: Organ, size: i64) -> Self {
        Self {
            restores_capacity: true,
            ..Self::new(resource, Some(organ), size)
        }
    }

    /// Creates an entry occupying no organ.
    pub fn helper(resource: impl Into<Resource>) -> Self {
        Self::new(resource, None, 0)
    }

    pub fn with_maximum(mut self, maximum: u32) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_additional_value(mut self, value: f64) -> Self {
        self.additional_value = value;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_mayo(mut self, mayo: impl Into<ResourceId>) -> Self {
        self.mayo = Some(mayo.into());
        self
    }

    #[inline]
    pub fn id(&self) -> &ResourceId {
        &self.resource.id
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            resource: self.resource.id.clone(),
            effect: self.effect.clone(),
        }
    }

    /// Whether both entries are the same logical choice.
    pub fn same_choice(&self, other: &Entry) -> bool {
        self.resource.id == other.resource.id && self.effect == other.effect
    }

    #[inline]
    pub fn restores_capacity(&self) -> bool {
        self.restores_capacity
    }

    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.resource.id == name
    }

    /// Checks the entry's invariants.
    pub fn validate(&self) -> Result<()> {
        if self.size < 0 && !self.restores_capacity {
            return Err(self.invalid(format!(
                "negative size {} on an entry that does not restore capacity",
                self.size
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() {
                return Err(self.invalid(format!("non-finite price {price}")));
            }
        }
        if !self.additional_value.is_finite() {
            return Err(self.invalid("non-finite additional value".to_string()));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> DietForgeError {
        DietForgeError::InvalidEntry {
            resource: self.resource.id.to_string(),
            reason,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.effect {
            Some(effect) => write!(f, "{} ({})", self.resource.id, effect),
            None => write!(f, "{}", self.resource.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranges() {
        assert_eq!(YieldRange::parse(" 2-4 "), Some(YieldRange::new(2, 4)));
        assert_eq!(YieldRange::parse("7"), Some(YieldRange::single(7)));
        assert_eq!(YieldRange::parse("-2"), Some(YieldRange::single(-2)));
        assert_eq!(YieldRange::parse(""), None);
        assert_eq!(YieldRange::parse("3-"), None);
        assert_eq!(YieldRange::parse("a-b"), None);
    }

    #[test]
    fn test_range_len() {
        assert_eq!(YieldRange::new(3, 5).len(), 3);
        assert_eq!(YieldRange::single(1).len(), 1);
        assert!(YieldRange::new(5, 3).is_empty());
        assert_eq!(YieldRange::new(5, 3).values().count(), 0);
    }

    #[test]
    fn test_same_choice_needs_effect_match() {
        let wish = Entry::helper("pocket wish").with_effect("Refined Palate");
        let other = Entry::helper("pocket wish").with_effect("Gar-ish");
        let plain = Entry::helper("pocket wish");

        assert!(wish.same_choice(&wish.clone()));
        assert!(!wish.same_choice(&other));
        assert!(!wish.same_choice(&plain));
        assert_ne!(wish.key(), other.key());
    }

    #[test]
    fn test_negative_size_needs_restoring() {
        let bad = Entry::new("mojo filter", Some(Organ::Spleen), -1);
        assert!(matches!(
            bad.validate(),
            Err(DietForgeError::InvalidEntry { .. })
        ));

        let good = Entry::restoring("mojo filter", Organ::Spleen, -1).with_maximum(3);
        assert!(good.validate().is_ok());
        assert!(good.restores_capacity());
    }

    #[test]
    fn test_display_includes_effect() {
        let wish = Entry::helper("pocket wish").with_effect("Gar-ish");
        assert_eq!(wish.to_string(), "pocket wish (Gar-ish)");
    }
}

//! Configuration system for DietForge.
//!
//! Load planner configuration from TOML or YAML files to control capacity
//! overrides, branch parallelism and extra interaction rules without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use dietforge_config::{CapacitySetting, DietConfig};
//! use dietforge_core::Organ;
//!
//! let config = DietConfig::from_toml_str(r#"
//!     value_per_adventure = 6000.0
//!     parallel_branches = true
//!
//!     [capacity]
//!     food = 12
//!     booze = "derive"
//!
//!     [[interactions]]
//!     resource = "lucky lindy"
//!     deltas = { booze = -1 }
//!     implies = ["garish"]
//! "#).unwrap();
//!
//! assert_eq!(config.value_per_adventure, Some(6000.0));
//! assert_eq!(config.capacity.get(Organ::Food), CapacitySetting::Fixed(12));
//! assert_eq!(config.capacity.get(Organ::Booze), CapacitySetting::derive());
//! assert_eq!(config.interactions.len(), 1);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use dietforge_config::DietConfig;
//!
//! let config = DietConfig::load("dietforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use dietforge_core::{ModifierFlag, Organ};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DietConfig {
    /// Value of one adventure, used when the caller does not supply one.
    #[serde(default)]
    pub value_per_adventure: Option<f64>,

    /// Per-organ capacity overrides.
    #[serde(default)]
    pub capacity: CapacityConfig,

    /// Evaluate the two branches of each interacting entry in parallel.
    #[serde(default)]
    pub parallel_branches: bool,

    /// Extra interaction rules merged into the built-in table.
    #[serde(default)]
    pub interactions: Vec<InteractionRuleConfig>,
}

impl DietConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the value of one adventure.
    pub fn with_value_per_adventure(mut self, mpa: f64) -> Self {
        self.value_per_adventure = Some(mpa);
        self
    }

    /// Fixes the capacity of one organ.
    pub fn with_capacity(mut self, organ: Organ, capacity: i64) -> Self {
        self.capacity.set(organ, CapacitySetting::Fixed(capacity));
        self
    }

    /// Enables or disables parallel branch evaluation.
    pub fn with_parallel_branches(mut self, parallel: bool) -> Self {
        self.parallel_branches = parallel;
        self
    }

    /// Adds an interaction rule.
    pub fn with_interaction(mut self, rule: InteractionRuleConfig) -> Self {
        self.interactions.push(rule);
        self
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(mpa) = self.value_per_adventure {
            if !mpa.is_finite() || mpa < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "value_per_adventure must be a finite non-negative number, got {mpa}"
                )));
            }
        }
        for (i, rule) in self.interactions.iter().enumerate() {
            if rule.resource.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "interaction rule {i} has an empty resource name"
                )));
            }
        }
        Ok(())
    }
}

/// The literal `"derive"` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveKeyword {
    Derive,
}

/// How one organ's capacity is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CapacitySetting {
    /// Use exactly this capacity.
    Fixed(i64),
    /// Derive from live usage and limit.
    Derive(DeriveKeyword),
}

impl CapacitySetting {
    pub const fn derive() -> Self {
        CapacitySetting::Derive(DeriveKeyword::Derive)
    }

    /// The fixed capacity, if one was configured.
    pub fn fixed(&self) -> Option<i64> {
        match self {
            CapacitySetting::Fixed(capacity) => Some(*capacity),
            CapacitySetting::Derive(_) => None,
        }
    }
}

impl Default for CapacitySetting {
    fn default() -> Self {
        Self::derive()
    }
}

/// Capacity settings for every organ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CapacityConfig {
    #[serde(default)]
    pub food: CapacitySetting,

    #[serde(default)]
    pub booze: CapacitySetting,

    #[serde(default)]
    pub spleen: CapacitySetting,
}

impl CapacityConfig {
    pub fn get(&self, organ: Organ) -> CapacitySetting {
        match organ {
            Organ::Food => self.food,
            Organ::Booze => self.booze,
            Organ::Spleen => self.spleen,
        }
    }

    pub fn set(&mut self, organ: Organ, setting: CapacitySetting) {
        match organ {
            Organ::Food => self.food = setting,
            Organ::Booze => self.booze = setting,
            Organ::Spleen => self.spleen = setting,
        }
    }
}

/// An interaction rule declared in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InteractionRuleConfig {
    /// Resource name the rule matches.
    pub resource: String,

    /// Effect variant the rule matches; `None` matches any variant.
    #[serde(default)]
    pub effect: Option<String>,

    /// Signed capacity change per organ; negative costs, positive frees.
    #[serde(default)]
    pub deltas: BTreeMap<Organ, i64>,

    /// Modifier flags switched on when the entry is used.
    #[serde(default)]
    pub implies: Vec<ModifierFlag>,
}

impl InteractionRuleConfig {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_delta(mut self, organ: Organ, delta: i64) -> Self {
        self.deltas.insert(organ, delta);
        self
    }

    pub fn with_implied(mut self, flag: ModifierFlag) -> Self {
        self.implies.push(flag);
        self
    }
}

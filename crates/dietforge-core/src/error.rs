//! Error types for DietForge

use thiserror::Error;

/// Main error type for DietForge operations
#[derive(Debug, Error)]
pub enum DietForgeError {
    /// Error in planner configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog entry violates its own invariants
    #[error("Invalid entry '{resource}': {reason}")]
    InvalidEntry { resource: String, reason: String },

    /// A contract precondition was violated by the caller
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

/// Result type alias for DietForge operations
pub type Result<T> = std::result::Result<T, DietForgeError>;

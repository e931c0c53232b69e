//! Configuration errors
//!
//! Handle lookups never fail (unknown handles resolve to neutral values), so
//! loading and validating a [`PhysicsConfig`](crate::PhysicsConfig) is the only
//! fallible path in this crate.

use std::fmt;

/// Why a physics configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(serde_json::Error),
    /// A value that must be strictly positive was zero, negative or not finite
    NotPositive { field: &'static str, value: f64 },
    /// A value that must be non-negative was negative or not finite
    Negative { field: &'static str, value: f64 },
    /// Solver iteration counts must be at least 1
    ZeroIterations { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid physics config JSON: {e}"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "`{field}` must be > 0 (got {value})")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "`{field}` must be >= 0 (got {value})")
            }
            ConfigError::ZeroIterations { field } => write!(f, "`{field}` must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

//! Core error types

use thiserror::Error;

/// Errors raised by the fallible construction paths of the core.
///
/// Event handling itself never fails; these only surface when converting
/// foreign data (state ids, configuration values) into core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    /// A numeric state id outside the known states
    #[error("Invalid sheet state id: {0}")]
    InvalidState(u32),

    /// A state name that does not match any known state
    #[error("Unknown sheet state name: {0}")]
    UnknownStateName(String),

    /// Configuration value out of range
    #[error("Invalid sheet config: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, SheetError>;

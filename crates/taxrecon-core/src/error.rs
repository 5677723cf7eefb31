//! Error types for taxrecon

use thiserror::Error;

/// Main error type for taxrecon operations.
///
/// Reconciliation arithmetic itself never fails; these variants cover the
/// surfaces around it: field lookups, presets and collaborators.
#[derive(Debug, Error)]
pub enum TaxReconError {
    /// A field key that is not part of the profile catalogue
    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    /// A value of the wrong kind was assigned to a profile field
    #[error("Field '{field}' expects {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// A life-event key with no preset
    #[error("Life event '{0}' not found")]
    UnknownLifeEvent(String),

    /// The external summarizer failed
    #[error("Summary unavailable: {0}")]
    Summary(String),
}

/// Result type alias for taxrecon operations
pub type Result<T> = std::result::Result<T, TaxReconError>;

//! Error types for the privilege model.
//!
//! The privilege record itself never validates anything; these errors are
//! raised at the persistence boundary ([`crate::store::PrivilegeStore`]) and
//! by the id sequence.

use thiserror::Error;

/// Errors that can occur while persisting or looking up privileges.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A persisted privilege would break one of the model's integrity rules.
    ///
    /// Raised when a mandatory relationship is unset or when the same
    /// principal/permission/resource triple is granted twice.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// No privilege is stored under the given id.
    #[error("Privilege not found: {0}")]
    PrivilegeNotFound(i32),

    /// The id sequence can't hand out another value.
    #[error("Sequence {0} is exhausted")]
    SequenceExhausted(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized Result type for privilege operations.
pub type Result<T> = std::result::Result<T, AuthzError>;

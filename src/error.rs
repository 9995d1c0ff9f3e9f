//! Error taxonomy for the optimizer and clustering cores.
//!
//! Each variant maps to one of the error kinds named in the design: domain
//! invariant violations are raised at construction time and never silently
//! clamped, catalog/store failures are surfaced rather than retried from
//! here, and cooperative cancellation returns a best-so-far result rather
//! than unwinding.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input for field `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("insufficient data: found {found}, required at least {required}")]
    InsufficientData { found: usize, required: usize },

    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("cancelled: {reason}")]
    Cancelled { reason: String },
}

impl DomainError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// One-method push notification collaborator failures are logged by the
/// caller, never retried from the core (see notifications.rs).
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

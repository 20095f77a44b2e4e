//! Error type shared by the polygon engine and the generators.
//!
//! Mutating operations (`rebuild`, `renovate`, `dualize`) return these instead of
//! leaving NaN or an empty vertex list behind; on error the polygon is unchanged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeomError {
    /// Input that has no well-defined polygon or map (empty point set,
    /// singular matrix, dual without the origin strictly inside).
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// A rejection-sampling or retry loop hit its configured cap.
    #[error("retry budget exceeded: {what} after {attempts} attempts")]
    RetryBudgetExceeded { what: &'static str, attempts: usize },

    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },
}

impl GeomError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn budget(what: &'static str, attempts: usize) -> Self {
        Self::RetryBudgetExceeded { what, attempts }
    }
}

pub type Result<T> = std::result::Result<T, GeomError>;

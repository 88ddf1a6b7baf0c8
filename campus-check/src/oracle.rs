//! Remote uniqueness oracle.
//!
//! The checker never talks to the network itself; it asks an
//! [`AvailabilityOracle`] and only cares about the shape of the answer.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why a check produced no answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    /// The request was abandoned on purpose. Never surfaced to the user.
    #[error("availability check cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("check rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("undecodable availability response: {0}")]
    Decode(String),
}

impl CheckError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, CheckError::Cancelled)
    }
}

/// Answers whether `code` already exists within `scope`.
///
/// `code` is always normalized before it reaches the oracle.
///
/// # Example
/// ```ignore
/// struct TakenCodes(HashSet<String>);
///
/// #[async_trait]
/// impl AvailabilityOracle<CodeScope> for TakenCodes {
///     async fn code_exists(&self, _scope: &CodeScope, code: &str) -> Result<bool, CheckError> {
///         Ok(self.0.contains(code))
///     }
/// }
/// ```
#[async_trait]
pub trait AvailabilityOracle<K: Sync>: Send + Sync {
    async fn code_exists(&self, scope: &K, code: &str) -> Result<bool, CheckError>;
}

#[async_trait]
impl<K, T> AvailabilityOracle<K> for Arc<T>
where
    K: Sync,
    T: AvailabilityOracle<K> + ?Sized,
{
    async fn code_exists(&self, scope: &K, code: &str) -> Result<bool, CheckError> {
        (**self).code_exists(scope, code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cancelled_is_cancellation() {
        assert!(CheckError::Cancelled.is_cancellation());
        assert!(!CheckError::Transport("reset".into()).is_cancellation());
        assert!(!CheckError::Rejected {
            status: 500,
            message: "boom".into()
        }
        .is_cancellation());
    }
}

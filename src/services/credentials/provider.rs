//! Credential provider interface used by the gate.
use async_trait::async_trait;
use thiserror::Error;

/// Result type for credential resolution.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Credential-layer errors.
///
/// Kept independent from `AppError` so callers decide how to surface them.
/// Both variants mean the same thing at the invocation boundary: there is
/// no well-formed challenge to issue, so the invocation fails instead of
/// answering 401.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential store error: {0}")]
    Store(String),
    #[error("credential parameter has no value: {0}")]
    Missing(String),
}

/// The expected username/password pair, immutable once resolved for an
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Resolves the expected pair, once per invocation.
///
/// Implementations must be cheap to share (`Arc<dyn CredentialProvider>`)
/// and must not retry: a resolution failure is fatal for the invocation
/// that triggered it.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    // Returns the source name (for logging).
    fn source_name(&self) -> &'static str;

    // Resolve the pair from the backing source.
    async fn resolve(&self) -> CredentialResult<Credentials>;
}

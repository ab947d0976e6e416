use async_trait::async_trait;

use crate::services::credentials::provider::{CredentialProvider, CredentialResult, Credentials};

/// Static strategy: a configuration-supplied pair, resolved without I/O.
///
/// The pair is injected at startup from the environment, never compiled in.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    credentials: Credentials,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

#[async_trait]
impl CredentialProvider for FixedCredentials {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn resolve(&self) -> CredentialResult<Credentials> {
        Ok(self.credentials.clone())
    }
}

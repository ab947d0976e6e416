use std::time::{Duration, Instant};

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use tokio::sync::Mutex;

use crate::services::credentials::provider::{
    CredentialError, CredentialProvider, CredentialResult, Credentials,
};

/// Remote strategy: both halves of the pair live as encrypted parameters
/// in SSM Parameter Store and are fetched with decryption on resolve.
///
/// The two lookups are independent and run concurrently. Neither is
/// retried; any failure surfaces as `CredentialError` and fails the
/// invocation that triggered it.
pub struct SsmCredentials {
    client: Client,
    username_param: String,
    password_param: String,
    // `None` disables caching: every invocation consults the store.
    // `Some(ttl)` bounds staleness to exactly `ttl`.
    cache_ttl: Option<Duration>,
    cached: Mutex<Option<CachedPair>>,
}

struct CachedPair {
    resolved_at: Instant,
    credentials: Credentials,
}

impl SsmCredentials {
    pub fn new(
        client: Client,
        username_param: impl Into<String>,
        password_param: impl Into<String>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            client,
            username_param: username_param.into(),
            password_param: password_param.into(),
            cache_ttl,
            cached: Mutex::new(None),
        }
    }

    async fn fetch_parameter(&self, name: &str) -> CredentialResult<String> {
        let resp = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| CredentialError::Store(format!("get_parameter {name}: {e}")))?;

        non_empty_value(name, resp.parameter().and_then(|p| p.value()))
    }
}

// A parameter that exists but holds an empty string is as unusable as a
// missing one.
fn non_empty_value(name: &str, value: Option<&str>) -> CredentialResult<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(CredentialError::Missing(name.to_string())),
    }
}

#[async_trait]
impl CredentialProvider for SsmCredentials {
    fn source_name(&self) -> &'static str {
        "ssm"
    }

    async fn resolve(&self) -> CredentialResult<Credentials> {
        if let Some(ttl) = self.cache_ttl {
            let cached = self.cached.lock().await;
            if let Some(pair) = cached.as_ref() {
                if pair.resolved_at.elapsed() < ttl {
                    return Ok(pair.credentials.clone());
                }
            }
        }

        let (username, password) = tokio::try_join!(
            self.fetch_parameter(&self.username_param),
            self.fetch_parameter(&self.password_param),
        )?;

        let credentials = Credentials { username, password };

        if self.cache_ttl.is_some() {
            let mut cached = self.cached.lock().await;
            *cached = Some(CachedPair {
                resolved_at: Instant::now(),
                credentials: credentials.clone(),
            });
        }

        Ok(credentials)
    }
}

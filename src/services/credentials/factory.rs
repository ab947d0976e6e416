/// Factory: build the configured `CredentialProvider` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use aws_config::BehaviorVersion;

use crate::config::CredentialConfig;
use crate::services::credentials::{CredentialProvider, FixedCredentials, SsmCredentials};

pub async fn build_credential_provider(config: &CredentialConfig) -> Arc<dyn CredentialProvider> {
    match config {
        CredentialConfig::Static { username, password } => {
            Arc::new(FixedCredentials::new(username.clone(), password.clone()))
        }
        CredentialConfig::Ssm {
            username_param,
            password_param,
            cache_ttl_seconds,
        } => {
            // One store client for the lifetime of the process; invocations
            // share it instead of reconnecting.
            let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let client = aws_sdk_ssm::Client::new(&shared_config);

            let cache_ttl = match *cache_ttl_seconds {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };

            Arc::new(SsmCredentials::new(
                client,
                username_param.clone(),
                password_param.clone(),
                cache_ttl,
            ))
        }
    }
}

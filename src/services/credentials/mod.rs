pub mod factory;
pub mod fixed;
pub mod provider;
pub mod ssm;

pub use factory::build_credential_provider;
pub use fixed::FixedCredentials;
pub use provider::{CredentialError, CredentialProvider, CredentialResult, Credentials};
pub use ssm::SsmCredentials;

/*
 * Responsibility
 * - Shared context handed to the Router (cheap to clone, Arc inside).
 */
use std::sync::Arc;

use crate::services::credentials::CredentialProvider;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialProvider>,
}

impl AppState {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { credentials }
    }
}

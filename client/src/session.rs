//! Bearer-token session shared by every request.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self { token: Arc::new(RwLock::new(token)) }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Drops the token after the API rejected it (401/403).
    pub fn expire(&self) {
        let previous = self.token.write().unwrap_or_else(PoisonError::into_inner).take();
        if previous.is_some() {
            tracing::warn!("Session expired, bearer token cleared");
        }
    }
}

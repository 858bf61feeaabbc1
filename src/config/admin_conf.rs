use std::env;
use tracing::warn;

/// The administrator credential pair.
///
/// There is exactly one admin identity and it is never persisted; it is
/// injected at startup so tests and deployments can override it.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("ADMIN_PASSWORD not set, using built-in default");
            "admin123".to_string()
        });
        AdminConfig { username, password }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

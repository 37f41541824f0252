//! Credentials and provider endpoint configuration.
//!
//! Credentials are always passed explicitly down the lookup chain.
//! `Credentials::from_env` is the one place that reads process configuration,
//! meant to be called once at the application boundary.

use std::env;
use std::fmt;

/// Base URL of the provider's food database API.
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/food-database";

pub const APP_ID_ENV: &str = "MYFRIDGE_APP_ID";
pub const APP_KEY_ENV: &str = "EDAMAM_FOOD_DATABASE_API_KEY";

pub const PLACEHOLDER_APP_ID: &str = "Get Your Own App Id";
pub const PLACEHOLDER_APP_KEY: &str = "Get your Own API Key!!!";

/// Application identifier and API key sent as query parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    /// Read credentials from the environment, falling back to placeholders
    /// that the provider will reject with a 401.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let app_id = lookup(APP_ID_ENV).unwrap_or_else(|| PLACEHOLDER_APP_ID.to_string());
        let app_key = lookup(APP_KEY_ENV).unwrap_or_else(|| PLACEHOLDER_APP_KEY.to_string());
        Self { app_id, app_key }
    }

    pub fn is_placeholder(&self) -> bool {
        self.app_id == PLACEHOLDER_APP_ID || self.app_key == PLACEHOLDER_APP_KEY
    }

    pub(crate) fn query_pairs(&self) -> [(String, String); 2] {
        [
            ("app_id".to_string(), self.app_id.clone()),
            ("app_key".to_string(), self.app_key.clone()),
        ]
    }
}

// The key never shows up in logs or panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

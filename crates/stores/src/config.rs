//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and defaulted:
//!
//! - `JUICEBAR_DATA_DIR` - Directory for the durable collection files
//!   (default: `./data`)
//! - `JUICEBAR_ADMIN_EMAIL` - The reserved address that signs up with the
//!   admin role (default: `admin@example.com`)
//! - `JUICEBAR_PLACEHOLDER_IMAGE` - Image URL assigned to products created
//!   without one (default: `https://placehold.co/600x400`)

use std::path::PathBuf;

use thiserror::Error;

use juicebar_core::Email;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store-layer configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one JSON document per collection.
    pub data_dir: PathBuf,
    /// Address that receives the admin role at signup.
    pub admin_email: Email,
    /// Image URL for products created without one.
    pub placeholder_image: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a provided variable fails validation
    /// (currently: `JUICEBAR_ADMIN_EMAIL` must parse as an email address).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::build(
            get_env_or_default("JUICEBAR_DATA_DIR", DEFAULT_DATA_DIR),
            get_env_or_default("JUICEBAR_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            get_env_or_default("JUICEBAR_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE),
        )
    }

    /// Build a configuration from raw values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `admin_email` is not a valid
    /// email address.
    pub fn build(
        data_dir: String,
        admin_email: String,
        placeholder_image: String,
    ) -> Result<Self, ConfigError> {
        let admin_email = Email::parse(&admin_email).map_err(|e| {
            ConfigError::InvalidEnvVar("JUICEBAR_ADMIN_EMAIL".to_owned(), e.to_string())
        })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            admin_email,
            placeholder_image,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin_email: Email::parse(DEFAULT_ADMIN_EMAIL).expect("default admin email parses"),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.admin_email.as_str(), "admin@example.com");
        assert_eq!(config.placeholder_image, "https://placehold.co/600x400");
    }

    #[test]
    fn test_build_valid() {
        let config = StoreConfig::build(
            "/tmp/juicebar".to_owned(),
            "ops@juicebar.test".to_owned(),
            "https://cdn.juicebar.test/placeholder.png".to_owned(),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/juicebar"));
        assert_eq!(config.admin_email.as_str(), "ops@juicebar.test");
    }

    #[test]
    fn test_build_rejects_bad_admin_email() {
        let result = StoreConfig::build(
            "./data".to_owned(),
            "not-an-email".to_owned(),
            DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}

//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::client::{Credentials, Environment};

/// Client configuration derived from environment variables, configuration
/// files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "LOOMPORT")]
pub struct ClientConfig {
    /// Access key issued in the Loomport portal. Required.
    pub access_key: String,
    /// Secret key paired with the access key. Required.
    pub secret_key: String,
    /// Named environment to target. Defaults to `staging` so integration
    /// tooling cannot accidentally order billable production services.
    #[ortho_config(default = "staging".to_owned())]
    pub environment: String,
    /// Optional custom base URL that overrides the named environment, for
    /// example a local mock server.
    pub base_url: Option<String>,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
    section: &'static str,
}

impl FieldMetadata {
    const fn new(
        description: &'static str,
        env_var: &'static str,
        toml_key: &'static str,
        section: &'static str,
    ) -> Self {
        Self {
            description,
            env_var,
            toml_key,
            section,
        }
    }
}

impl ClientConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [{}] in loomport.toml",
                metadata.description, metadata.env_var, metadata.toml_key, metadata.section
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags
    /// in that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments.
    /// Values still merge defaults, configuration files, and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("loomport")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation on required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.access_key,
            &FieldMetadata::new(
                "Loomport API access key",
                "LOOMPORT_ACCESS_KEY",
                "access_key",
                "loomport",
            ),
        )?;
        Self::require_field(
            &self.secret_key,
            &FieldMetadata::new(
                "Loomport API secret key",
                "LOOMPORT_SECRET_KEY",
                "secret_key",
                "loomport",
            ),
        )?;
        Self::require_field(
            &self.environment,
            &FieldMetadata::new(
                "target environment",
                "LOOMPORT_ENVIRONMENT",
                "environment",
                "loomport",
            ),
        )?;
        Ok(())
    }

    /// Resolves the target [`Environment`]. A custom base URL wins over the
    /// named environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] when the configured name
    /// is neither `production` nor `staging`.
    pub fn environment(&self) -> Result<Environment, ConfigError> {
        if let Some(url) = &self.base_url
            && !url.trim().is_empty()
        {
            return Ok(Environment::Custom(url.trim().to_owned()));
        }
        Environment::from_name(&self.environment)
            .ok_or_else(|| ConfigError::UnknownEnvironment(self.environment.clone()))
    }

    /// Builds validated [`Credentials`] from the configured key pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when either key is empty.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        self.validate()?;
        Ok(Credentials::new(&self.access_key, &self.secret_key))
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// Indicates an unrecognised environment name.
    #[error("unknown environment '{0}': expected 'production' or 'staging'")]
    UnknownEnvironment(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError};
    use crate::client::Environment;

    fn config() -> ClientConfig {
        ClientConfig {
            access_key: String::from("ak"),
            secret_key: String::from("sk"),
            environment: String::from("staging"),
            base_url: None,
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn validate_names_missing_secret_key() {
        let mut incomplete = config();
        incomplete.secret_key = String::from("  ");
        let err = incomplete.validate().expect_err("blank secret should fail");
        let ConfigError::MissingField(message) = err else {
            panic!("expected MissingField, got {err:?}");
        };
        assert!(
            message.contains("LOOMPORT_SECRET_KEY"),
            "message should name the env var: {message}"
        );
    }

    #[test]
    fn custom_base_url_overrides_named_environment() {
        let mut custom = config();
        custom.base_url = Some(String::from("http://localhost:9090/"));
        let environment = custom
            .environment()
            .unwrap_or_else(|err| panic!("resolve environment: {err}"));
        assert_eq!(
            environment,
            Environment::Custom(String::from("http://localhost:9090/"))
        );
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let mut bogus = config();
        bogus.environment = String::from("qa");
        let err = bogus.environment().expect_err("qa should be rejected");
        assert_eq!(err, ConfigError::UnknownEnvironment(String::from("qa")));
    }
}

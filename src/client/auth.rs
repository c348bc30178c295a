//! Credentials and session handling.
//!
//! Authentication state is modelled as two immutable values: the API key
//! pair ([`Credentials`]) and the bearer token it is exchanged for
//! ([`Session`]). Both are threaded explicitly through calls; there is no
//! process-wide token state.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{ApiEnvelope, Client, Environment, error_from_body};

/// API key pair issued in the Loomport portal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Constructs a key pair, trimming surrounding whitespace.
    #[must_use]
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into().trim().to_owned(),
            secret_key: secret_key.into().trim().to_owned(),
        }
    }

    /// Returns the access key.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

/// Immutable bearer session issued by the login endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    token: String,
    expires_at: Option<u64>,
}

impl Session {
    /// Wraps an existing bearer token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    /// Records the expiry reported by the login endpoint, as milliseconds
    /// since the Unix epoch.
    #[must_use]
    pub const fn with_expires_at(mut self, epoch_millis: u64) -> Self {
        self.expires_at = Some(epoch_millis);
        self
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the token expiry in milliseconds since the Unix epoch, when
    /// the server reported one.
    #[must_use]
    pub const fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    access_key: &'a str,
    secret_key: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    token: String,
    #[serde(default)]
    expires_at: Option<u64>,
}

impl Client {
    /// Exchanges API credentials for a session token and returns an
    /// authenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when the credentials are rejected or the
    /// login endpoint cannot be reached, and [`ApiError::Decode`] when its
    /// reply cannot be parsed.
    pub async fn login(
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<Self, ApiError> {
        let http = Self::http_client();
        let url = format!("{}/v2/auth/token", environment.base_url());
        let payload = LoginRequest {
            access_key: credentials.access_key(),
            secret_key: credentials.secret_key(),
        };

        let response = http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ApiError::Auth {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| ApiError::Auth {
            message: err.to_string(),
        })?;

        if !status.is_success() {
            let api_error = error_from_body(status.as_u16(), &body);
            return Err(match api_error {
                ApiError::Auth { message } | ApiError::Api { message, .. } => {
                    ApiError::Auth { message }
                }
                other => other,
            });
        }

        let envelope: ApiEnvelope<LoginData> =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
                path: String::from("/v2/auth/token"),
                message: err.to_string(),
            })?;

        let mut session = Session::new(envelope.data.token);
        if let Some(expiry) = envelope.data.expires_at {
            session = session.with_expires_at(expiry);
        }

        Ok(Self::with_session(environment, session))
    }

    /// Loads configuration-derived credentials and environment, then logs
    /// in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the configuration is invalid, and
    /// any [`ApiError`] produced by [`Client::login`].
    pub async fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ApiError> {
        let environment = config.environment()?;
        let credentials = config.credentials()?;
        Self::login(environment, &credentials).await
    }
}

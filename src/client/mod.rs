//! HTTP transport for the Loomport API.
//!
//! All SDK operations go through [`Client`], which owns the environment
//! base URL, the underlying HTTP client, and an immutable authenticated
//! [`Session`]. Resource modules contribute their typed operations through
//! `impl Client` blocks of their own.

mod auth;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use auth::{Credentials, Session};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const PRODUCTION_BASE: &str = "https://api.loomport.com";
const STAGING_BASE: &str = "https://api.staging.loomport.com";

/// Deployment environment the client talks to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Environment {
    /// The production API.
    Production,
    /// The staging API used for integration testing and throwaway users.
    Staging,
    /// A custom base URL, for example a local mock server.
    Custom(String),
}

impl Environment {
    /// Returns the base URL for this environment without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_BASE,
            Self::Staging => STAGING_BASE,
            Self::Custom(url) => url.trim_end_matches('/'),
        }
    }

    /// Resolves a named environment (`production` or `staging`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            _ => None,
        }
    }
}

/// Authenticated Loomport API client.
///
/// Cheap to clone and safe to share across concurrent wait loops; the
/// session token is immutable once issued, so no call mutates shared
/// client state.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    environment: Environment,
    session: Session,
}

/// Standard `{ message, data }` wrapper around API payloads.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

/// Error payload shape returned on non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

fn error_from_body(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    if status == 401 {
        ApiError::Auth { message }
    } else {
        ApiError::Api { status, message }
    }
}

impl Client {
    pub(crate) fn http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }

    /// Builds a client from an already-issued session, without a network
    /// round trip. Pair with [`crate::session_store::SessionStore`] to
    /// reuse tokens across invocations.
    #[must_use]
    pub fn with_session(environment: Environment, session: Session) -> Self {
        Self {
            http: Self::http_client(),
            environment,
            session,
        }
    }

    /// Returns the environment this client targets.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns the session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.environment.base_url())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(request).await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
                path: path.to_owned(),
                message: err.to_string(),
            })?;
        Ok(envelope.data)
    }

    async fn execute_raw(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|err| ApiError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| ApiError::Transport {
            message: err.to_string(),
        })?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path)), path).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.http.get(self.url(path)).query(query), path)
            .await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.http.post(self.url(path)).json(body), path)
            .await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.http.put(self.url(path)).json(body), path)
            .await
    }

    /// POST whose response body carries no payload of interest.
    pub(crate) async fn post_no_content<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute_raw(self.http.post(self.url(path)).json(body))
            .await
            .map(|_| ())
    }

    /// PUT whose response body carries no payload of interest.
    pub(crate) async fn put_no_content<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute_raw(self.http.put(self.url(path)).json(body))
            .await
            .map(|_| ())
    }

    /// Body-less POST used by product lifecycle actions.
    pub(crate) async fn post_action(&self, path: &str) -> Result<(), ApiError> {
        self.execute_raw(self.http.post(self.url(path)))
            .await
            .map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute_raw(self.http.delete(self.url(path)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests;

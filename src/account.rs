//! Company user management and throwaway test-user registration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::{Client, Environment, Session};
use crate::error::ApiError;

/// Role assigned to a company user.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full administrative access, including billing.
    CompanyAdmin,
    /// Can order and modify services.
    TechnicalAdmin,
    /// Can view services and receive notifications.
    TechnicalContact,
    /// Read-only access.
    ReadOnly,
}

/// Invitation for a new company user.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInvite {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address the invitation is sent to.
    pub email: String,
    /// Role granted on acceptance.
    pub role: UserRole,
}

impl UserInvite {
    /// Validates the invitation before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ApiError::Validation(String::from(
                "email must be a deliverable address",
            )));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ApiError::Validation(String::from(
                "first and last name must not be empty",
            )));
        }
        Ok(())
    }
}

/// A user attached to the company account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUser {
    /// Identifier used by update operations.
    #[serde(default)]
    pub person_id: Option<u64>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    pub email: String,
    /// Current role.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Whether the user can log in.
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleChange {
    role: UserRole,
}

/// Specification for a generated throwaway staging user.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestUserSpec {
    /// Given name; always `Test`.
    pub first_name: String,
    /// Family name; always `User`.
    pub last_name: String,
    /// Generated unique email address.
    pub email: String,
    /// Generated password.
    pub password: String,
    /// Generated company name the user is registered under.
    pub company_name: String,
}

impl TestUserSpec {
    /// Generates a spec with unique, random credentials. `email_domain` is
    /// the domain part of the generated address; `company_name` falls back
    /// to a generated one.
    #[must_use]
    pub fn generate(email_domain: &str, company_name: Option<String>) -> Self {
        let nonce = Uuid::new_v4().simple().to_string();
        Self {
            first_name: String::from("Test"),
            last_name: String::from("User"),
            email: format!("loomport-test-{nonce}@{email_domain}"),
            password: Uuid::new_v4().simple().to_string(),
            company_name: company_name.unwrap_or_else(|| format!("loomport-test-{nonce}")),
        }
    }
}

/// Result of registering a throwaway user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisteredTestUser {
    /// Email address of the new user.
    pub email: String,
    /// Password of the new user.
    pub password: String,
    /// Session issued at registration, usable without a separate login.
    pub session: Session,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationData {
    token: String,
}

#[derive(Deserialize)]
struct RegistrationEnvelope {
    data: RegistrationData,
}

impl Client {
    /// Invites a new user to the company account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// invitation is malformed, otherwise any transport or API error.
    pub async fn invite_user(&self, invite: &UserInvite) -> Result<(), ApiError> {
        invite.validate()?;
        self.post_no_content("/v2/employee/invite", invite).await
    }

    /// Lists every user attached to the company account.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn list_company_users(&self) -> Result<Vec<CompanyUser>, ApiError> {
        self.get("/v2/employment").await
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn update_user_role(&self, person_id: u64, role: UserRole) -> Result<(), ApiError> {
        let path = format!("/v2/employee/{person_id}");
        let body = RoleChange { role };
        self.put_no_content(&path, &body).await
    }

    /// Registers a throwaway user and company, returning the credentials
    /// and an authenticated session. Only available on staging; production
    /// rejects self-registration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when pointed at production, and
    /// any transport, API, or decode error otherwise.
    pub async fn register_test_user(
        environment: &Environment,
        spec: &TestUserSpec,
    ) -> Result<RegisteredTestUser, ApiError> {
        if *environment == Environment::Production {
            return Err(ApiError::Validation(String::from(
                "test users can only be registered on staging",
            )));
        }

        let http = Self::http_client();
        let url = format!("{}/v2/account/register", environment.base_url());
        let response = http
            .post(&url)
            .json(spec)
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
            let message = String::from_utf8_lossy(&body).into_owned();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: RegistrationEnvelope =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
                path: String::from("/v2/account/register"),
                message: err.to_string(),
            })?;

        Ok(RegisteredTestUser {
            email: spec.email.clone(),
            password: spec.password.clone(),
            session: Session::new(envelope.data.token),
        })
    }
}

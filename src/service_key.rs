//! Service keys for pre-authorised VXC ordering.
//!
//! A service key lets a third party order a VXC terminating on one of the
//! issuing account's ports without broader account access.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;

const SERVICE_KEY_PATH: &str = "/v2/service/key";

/// Request to mint a new service key.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceKeyOrder {
    /// Port the key authorises connections to.
    pub product_uid: String,
    /// Whether the key is consumed by its first use.
    pub single_use: bool,
    /// Highest rate limit a key holder may order, in Mbps.
    #[serde(rename = "maxSpeed", skip_serializing_if = "Option::is_none")]
    pub max_speed_mbps: Option<u32>,
    /// Free-form note shown to the key holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServiceKeyOrder {
    /// Validates the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.product_uid.trim().is_empty() {
            return Err(ApiError::Validation(String::from(
                "product_uid must name the port the key authorises",
            )));
        }
        if let Some(0) = self.max_speed_mbps {
            return Err(ApiError::Validation(String::from(
                "max speed must be greater than zero",
            )));
        }
        Ok(())
    }
}

/// A stored service key.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceKey {
    /// The key itself, handed to the third party.
    pub key: String,
    /// Port the key authorises connections to.
    #[serde(default)]
    pub product_uid: Option<String>,
    /// Whether the key is consumed by its first use.
    #[serde(default)]
    pub single_use: Option<bool>,
    /// Highest rate limit a key holder may order, in Mbps.
    #[serde(default, rename = "maxSpeed")]
    pub max_speed_mbps: Option<u32>,
    /// Whether the key can currently be redeemed.
    #[serde(default)]
    pub active: Option<bool>,
    /// Free-form note shown to the key holder.
    #[serde(default)]
    pub description: Option<String>,
}

/// Changes to an existing service key.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceKeyUpdate {
    /// Key being updated.
    pub key: String,
    /// New active state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize)]
struct ServiceKeyQuery<'a> {
    #[serde(rename = "productIdOrUid", skip_serializing_if = "Option::is_none")]
    product_uid: Option<&'a str>,
}

impl Client {
    /// Mints a new service key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// request is malformed, otherwise any transport, API, or decode error.
    pub async fn create_service_key(
        &self,
        order: &ServiceKeyOrder,
    ) -> Result<ServiceKey, ApiError> {
        order.validate()?;
        self.post(SERVICE_KEY_PATH, order).await
    }

    /// Lists service keys, optionally scoped to one port.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn list_service_keys(
        &self,
        product_uid: Option<&str>,
    ) -> Result<Vec<ServiceKey>, ApiError> {
        self.get_with_query(SERVICE_KEY_PATH, &ServiceKeyQuery { product_uid })
            .await
    }

    /// Updates a service key's active state or description.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_service_key(
        &self,
        update: &ServiceKeyUpdate,
    ) -> Result<ServiceKey, ApiError> {
        self.put(SERVICE_KEY_PATH, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceKey, ServiceKeyOrder};

    fn order() -> ServiceKeyOrder {
        ServiceKeyOrder {
            product_uid: String::from("port-a"),
            single_use: true,
            max_speed_mbps: Some(1_000),
            description: Some(String::from("for acme")),
        }
    }

    #[test]
    fn valid_order_passes_validation() {
        assert!(order().validate().is_ok());
    }

    #[test]
    fn zero_max_speed_is_rejected() {
        let mut invalid = order();
        invalid.max_speed_mbps = Some(0);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn blank_product_uid_is_rejected() {
        let mut invalid = order();
        invalid.product_uid = String::from("  ");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn order_serializes_wire_field_names() {
        let json = serde_json::to_value(order()).unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(
            json.get("maxSpeed").and_then(serde_json::Value::as_u64),
            Some(1_000)
        );
        assert_eq!(
            json.get("singleUse").and_then(serde_json::Value::as_bool),
            Some(true)
        );
    }

    #[test]
    fn stored_key_decodes_sparse_records() {
        let key: ServiceKey = serde_json::from_str(r#"{"key":"9f8d"}"#)
            .unwrap_or_else(|err| panic!("decode key: {err}"));
        assert_eq!(key.key, "9f8d");
        assert_eq!(key.active, None);
    }
}

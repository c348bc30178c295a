//! Request and response shapes for internet exchange services.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

/// Order request for an internet exchange service on an existing port.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IxOrder {
    /// Display name for the service.
    #[serde(rename = "productName")]
    pub name: String,
    /// Identifier of the port the service attaches to.
    pub port_uid: String,
    /// Name of the exchange to peer at.
    pub network_service_type: String,
    /// Committed rate limit in Mbps.
    #[serde(rename = "rateLimit")]
    pub rate_limit_mbps: u32,
    /// Peering BGP ASN.
    pub asn: u32,
    /// VLAN tag for the service; omitted to let the provider assign one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    /// MAC address registered with the exchange's route servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl IxOrder {
    /// Validates the order before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation(String::from("name must not be empty")));
        }
        if self.port_uid.trim().is_empty() {
            return Err(ApiError::Validation(String::from(
                "port_uid must name the attachment port",
            )));
        }
        if self.network_service_type.trim().is_empty() {
            return Err(ApiError::Validation(String::from(
                "network_service_type must name an exchange",
            )));
        }
        if self.rate_limit_mbps == 0 {
            return Err(ApiError::Validation(String::from(
                "rate limit must be greater than zero",
            )));
        }
        if self.asn == 0 {
            return Err(ApiError::Validation(String::from(
                "asn must be a valid BGP ASN",
            )));
        }
        Ok(())
    }
}

/// Point-in-time view of an IX service.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ix {
    /// Unique product identifier.
    pub product_uid: String,
    /// Display name.
    #[serde(default)]
    pub product_name: String,
    /// Current lifecycle status.
    #[serde(default)]
    pub provisioning_status: ProvisioningStatus,
    /// Committed rate limit in Mbps.
    #[serde(default, rename = "rateLimit")]
    pub rate_limit_mbps: Option<u32>,
    /// VLAN tag assigned to the service.
    #[serde(default)]
    pub vlan: Option<u16>,
    /// Peering BGP ASN.
    #[serde(default)]
    pub asn: Option<u32>,
}

/// Requested changes to an IX service.
///
/// `None` fields are left untouched and accepted as-is by
/// [`IxUpdate::is_applied`].
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IxUpdate {
    /// New display name.
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New committed rate limit in Mbps.
    #[serde(rename = "rateLimit", skip_serializing_if = "Option::is_none")]
    pub rate_limit_mbps: Option<u32>,
    /// New VLAN tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
}

impl IxUpdate {
    /// True when every requested field matches the snapshot; `None` fields
    /// accept whatever the snapshot reports.
    #[must_use]
    pub fn is_applied(&self, ix: &Ix) -> bool {
        let name_ok = self
            .name
            .as_ref()
            .is_none_or(|name| *name == ix.product_name);
        let rate_ok = self
            .rate_limit_mbps
            .is_none_or(|rate| ix.rate_limit_mbps == Some(rate));
        let vlan_ok = self.vlan.is_none_or(|vlan| ix.vlan == Some(vlan));
        name_ok && rate_ok && vlan_ok
    }
}

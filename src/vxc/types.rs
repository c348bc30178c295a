//! Request and response shapes for virtual cross-connects.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::product::ProvisioningStatus;
use crate::vxc::partner::PartnerConfig;

/// Order request for a VXC between two ends.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VxcOrder {
    /// Display name for the connection.
    #[serde(rename = "productName")]
    pub name: String,
    /// Committed rate limit in Mbps.
    #[serde(rename = "rateLimit")]
    pub rate_limit_mbps: u32,
    /// Contract term in months.
    #[serde(rename = "term")]
    pub term_months: u32,
    /// Configuration for the A end, always one of the account's own ports.
    pub a_end: VxcOrderEnd,
    /// Configuration for the B end: one of the account's ports, or a
    /// partner interconnect.
    pub b_end: VxcOrderEnd,
}

/// One end of a VXC order.
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VxcOrderEnd {
    /// Identifier of the port, MCR, or MVE terminating this end. Omitted
    /// when a partner configuration selects the far port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_uid: Option<String>,
    /// VLAN tag for this end; omitted to let the provider assign one (or
    /// deliver untagged, depending on the product).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    /// Inner VLAN tag for Q-in-Q handoffs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_vlan: Option<u16>,
    /// Cloud-provider interconnect configuration for partner ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_config: Option<PartnerConfig>,
}

impl VxcOrder {
    /// Validates the order before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation(String::from("name must not be empty")));
        }
        if self.rate_limit_mbps == 0 {
            return Err(ApiError::Validation(String::from(
                "rate limit must be greater than zero",
            )));
        }
        if self.a_end.product_uid.is_none() {
            return Err(ApiError::Validation(String::from(
                "a_end must name one of the account's products",
            )));
        }
        if self.b_end.product_uid.is_none() && self.b_end.partner_config.is_none() {
            return Err(ApiError::Validation(String::from(
                "b_end needs a product or a partner configuration",
            )));
        }
        Ok(())
    }
}

/// Point-in-time view of a VXC as reported by the API.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vxc {
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
    /// A-end attachment details.
    #[serde(default)]
    pub a_end: VxcEnd,
    /// B-end attachment details.
    #[serde(default)]
    pub b_end: VxcEnd,
}

/// One end of a provisioned VXC.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VxcEnd {
    /// Identifier of the product terminating this end.
    #[serde(default)]
    pub product_uid: Option<String>,
    /// VLAN tag assigned to this end.
    #[serde(default)]
    pub vlan: Option<u16>,
    /// Inner VLAN tag for Q-in-Q handoffs.
    #[serde(default)]
    pub inner_vlan: Option<u16>,
    /// Location of the terminating port.
    #[serde(default)]
    pub location_id: Option<u32>,
}

/// Requested changes to a VXC.
///
/// `None` means "leave this field alone": it is omitted from the update
/// request and [`VxcUpdate::is_applied`] accepts whatever the snapshot
/// reports for it. There is no sentinel value; an explicit
/// `Some(vlan)` always compares for equality, so VLAN 0 cannot be
/// conflated with "unspecified".
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VxcUpdate {
    /// New display name.
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New committed rate limit in Mbps.
    #[serde(rename = "rateLimit", skip_serializing_if = "Option::is_none")]
    pub rate_limit_mbps: Option<u32>,
    /// New A-end VLAN tag.
    #[serde(rename = "aEndVlan", skip_serializing_if = "Option::is_none")]
    pub a_end_vlan: Option<u16>,
    /// New B-end VLAN tag.
    #[serde(rename = "bEndVlan", skip_serializing_if = "Option::is_none")]
    pub b_end_vlan: Option<u16>,
}

impl VxcUpdate {
    /// True when every requested field matches the snapshot; `None` fields
    /// accept whatever the snapshot reports.
    #[must_use]
    pub fn is_applied(&self, vxc: &Vxc) -> bool {
        let name_ok = self
            .name
            .as_ref()
            .is_none_or(|name| *name == vxc.product_name);
        let rate_ok = self
            .rate_limit_mbps
            .is_none_or(|rate| vxc.rate_limit_mbps == Some(rate));
        let a_vlan_ok = self
            .a_end_vlan
            .is_none_or(|vlan| vxc.a_end.vlan == Some(vlan));
        let b_vlan_ok = self
            .b_end_vlan
            .is_none_or(|vlan| vxc.b_end.vlan == Some(vlan));
        name_ok && rate_ok && a_vlan_ok && b_vlan_ok
    }
}

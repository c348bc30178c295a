//! Request and response shapes for port products.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

pub(crate) const VALID_SPEEDS_MBPS: [u32; 3] = [1_000, 10_000, 100_000];
pub(crate) const VALID_TERMS_MONTHS: [u32; 4] = [1, 12, 24, 36];
const MAX_LAG_COUNT: u32 = 8;

/// Order request for a new port, or for a LAG when `lag_count` is set.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortOrder {
    /// Display name for the port.
    #[serde(rename = "productName")]
    pub name: String,
    /// Identifier of the data centre location to provision in.
    pub location_id: u32,
    /// Port speed in Mbps; one of 1000, 10000, or 100000.
    #[serde(rename = "portSpeed")]
    pub speed_mbps: u32,
    /// Contract term in months; one of 1, 12, 24, or 36.
    #[serde(rename = "term")]
    pub term_months: u32,
    /// Whether the port is discoverable by other customers.
    pub marketplace_visibility: bool,
    /// Number of member ports for a link aggregation group order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_count: Option<u32>,
    /// Preferred diversity zone within the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity_zone: Option<String>,
    /// Cost centre recorded against the product for billing reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<String>,
}

impl PortOrder {
    /// Validates the order before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation(String::from("name must not be empty")));
        }
        if !VALID_SPEEDS_MBPS.contains(&self.speed_mbps) {
            return Err(ApiError::Validation(format!(
                "unsupported port speed {} Mbps (expected one of 1000, 10000, 100000)",
                self.speed_mbps
            )));
        }
        if !VALID_TERMS_MONTHS.contains(&self.term_months) {
            return Err(ApiError::Validation(format!(
                "unsupported contract term {} months (expected one of 1, 12, 24, 36)",
                self.term_months
            )));
        }
        if let Some(count) = self.lag_count
            && !(1..=MAX_LAG_COUNT).contains(&count)
        {
            return Err(ApiError::Validation(format!(
                "lag count {count} out of range (expected 1 to {MAX_LAG_COUNT})"
            )));
        }
        Ok(())
    }
}

/// Point-in-time view of a port as reported by the API.
///
/// Records fetched immediately after ordering can be sparse; every field
/// other than the identifier is optional or defaulted so early snapshots
/// still decode.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Unique product identifier.
    pub product_uid: String,
    /// Display name.
    #[serde(default)]
    pub product_name: String,
    /// Current lifecycle status.
    #[serde(default)]
    pub provisioning_status: ProvisioningStatus,
    /// Port speed in Mbps.
    #[serde(default, rename = "portSpeed")]
    pub speed_mbps: Option<u32>,
    /// Data centre location identifier.
    #[serde(default)]
    pub location_id: Option<u32>,
    /// Whether this port is the primary member of a LAG.
    #[serde(default)]
    pub lag_primary: Option<bool>,
    /// Marketplace visibility flag.
    #[serde(default)]
    pub marketplace_visibility: Option<bool>,
    /// Cost centre recorded against the product.
    #[serde(default)]
    pub cost_centre: Option<String>,
}

/// Requested changes to a port. `None` fields are left untouched by the
/// API and accepted as-is by [`PortUpdate::is_applied`].
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortUpdate {
    /// New display name.
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New marketplace visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_visibility: Option<bool>,
    /// New cost centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<String>,
}

impl PortUpdate {
    /// True when every requested field matches the snapshot; `None` fields
    /// accept whatever the snapshot reports.
    #[must_use]
    pub fn is_applied(&self, port: &Port) -> bool {
        let name_ok = self
            .name
            .as_ref()
            .is_none_or(|name| *name == port.product_name);
        let visibility_ok = self
            .marketplace_visibility
            .is_none_or(|visible| port.marketplace_visibility == Some(visible));
        let cost_centre_ok = self
            .cost_centre
            .as_ref()
            .is_none_or(|centre| port.cost_centre.as_ref() == Some(centre));
        name_ok && visibility_ok && cost_centre_ok
    }
}

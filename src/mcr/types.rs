//! Request and response shapes for cloud routers and their prefix filter
//! lists.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

pub(crate) const VALID_SPEEDS_MBPS: [u32; 4] = [1_000, 2_500, 5_000, 10_000];

/// Order request for a new cloud router.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McrOrder {
    /// Display name for the router.
    #[serde(rename = "productName")]
    pub name: String,
    /// Identifier of the data centre location.
    pub location_id: u32,
    /// Router throughput in Mbps; one of 1000, 2500, 5000, or 10000.
    #[serde(rename = "portSpeed")]
    pub speed_mbps: u32,
    /// Contract term in months.
    #[serde(rename = "term")]
    pub term_months: u32,
    /// BGP ASN for the router; omitted to accept the provider default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
}

impl McrOrder {
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
                "unsupported MCR speed {} Mbps (expected one of 1000, 2500, 5000, 10000)",
                self.speed_mbps
            )));
        }
        Ok(())
    }
}

/// Point-in-time view of a cloud router.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mcr {
    /// Unique product identifier.
    pub product_uid: String,
    /// Display name.
    #[serde(default)]
    pub product_name: String,
    /// Current lifecycle status.
    #[serde(default)]
    pub provisioning_status: ProvisioningStatus,
    /// Router throughput in Mbps.
    #[serde(default, rename = "portSpeed")]
    pub speed_mbps: Option<u32>,
    /// BGP ASN assigned to the router.
    #[serde(default)]
    pub asn: Option<u32>,
    /// Data centre location identifier.
    #[serde(default)]
    pub location_id: Option<u32>,
}

/// Requested changes to a cloud router.
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McrUpdate {
    /// New display name.
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New cost centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<String>,
}

/// Address family a prefix filter list applies to.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub enum AddressFamily {
    /// IPv4 prefixes.
    #[serde(rename = "IPv4")]
    Ipv4,
    /// IPv6 prefixes.
    #[serde(rename = "IPv6")]
    Ipv6,
}

impl AddressFamily {
    /// Longest prefix length valid for this family.
    #[must_use]
    pub const fn max_prefix_length(self) -> u8 {
        match self {
            Self::Ipv4 => 32,
            Self::Ipv6 => 128,
        }
    }
}

/// Whether a matching prefix is accepted or rejected.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PrefixAction {
    /// Accept routes matching the entry.
    Permit,
    /// Reject routes matching the entry.
    Deny,
}

/// One route-filtering rule in a prefix filter list.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrefixListEntry {
    /// Whether matching routes are permitted or denied.
    pub action: PrefixAction,
    /// CIDR prefix the entry matches.
    pub prefix: String,
    /// Minimum prefix length matched, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<u8>,
    /// Maximum prefix length matched, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<u8>,
}

/// Payload for creating or replacing a prefix filter list.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPrefixFilterList {
    /// Human-readable description of the list.
    pub description: String,
    /// Address family the list applies to.
    pub address_family: AddressFamily,
    /// Filtering rules, evaluated in order.
    pub entries: Vec<PrefixListEntry>,
}

impl NewPrefixFilterList {
    /// Validates the list before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation(String::from(
                "description must not be empty",
            )));
        }
        if self.entries.is_empty() {
            return Err(ApiError::Validation(String::from(
                "a prefix filter list needs at least one entry",
            )));
        }
        let max_length = self.address_family.max_prefix_length();
        for entry in &self.entries {
            if entry.prefix.trim().is_empty() {
                return Err(ApiError::Validation(String::from(
                    "entry prefix must not be empty",
                )));
            }
            let ge = entry.ge.unwrap_or(0);
            let le = entry.le.unwrap_or(max_length);
            if le > max_length || ge > le {
                return Err(ApiError::Validation(format!(
                    "entry '{}' has an invalid ge/le range for {:?}",
                    entry.prefix, self.address_family
                )));
            }
        }
        Ok(())
    }
}

/// A stored prefix filter list, as returned by the API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrefixFilterList {
    /// Identifier unique within the owning router.
    pub id: u64,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Address family the list applies to.
    pub address_family: AddressFamily,
    /// Filtering rules; omitted in listing responses.
    #[serde(default)]
    pub entries: Vec<PrefixListEntry>,
}

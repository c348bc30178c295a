//! Request and response shapes for virtual network edges.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

/// Compute footprint of an MVE instance.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MveSize {
    /// 2 vCPU footprint.
    Small,
    /// 4 vCPU footprint.
    Medium,
    /// 8 vCPU footprint.
    Large,
}

/// Vendor image configuration for an MVE, discriminated on the wire by the
/// `vendor` field.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(tag = "vendor")]
pub enum MveVendorConfig {
    /// Cisco Catalyst 8000V edge router.
    #[serde(rename = "cisco", rename_all = "camelCase")]
    Cisco {
        /// Catalogue identifier of the software image.
        image_id: u32,
        /// SSH public key installed for the admin account.
        admin_ssh_public_key: String,
    },
    /// Fortinet FortiGate-VM firewall.
    #[serde(rename = "fortinet", rename_all = "camelCase")]
    Fortinet {
        /// Catalogue identifier of the software image.
        image_id: u32,
        /// License blob; omitted for on-demand licensing.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        license_data: Option<String>,
    },
    /// Palo Alto VM-Series firewall.
    #[serde(rename = "palo_alto", rename_all = "camelCase")]
    PaloAlto {
        /// Catalogue identifier of the software image.
        image_id: u32,
        /// Hash of the initial admin password.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        admin_password_hash: Option<String>,
    },
    /// Aruba EdgeConnect SD-WAN gateway.
    #[serde(rename = "aruba", rename_all = "camelCase")]
    Aruba {
        /// Catalogue identifier of the software image.
        image_id: u32,
        /// Aruba orchestrator account name.
        account_name: String,
    },
}

impl MveVendorConfig {
    /// Returns the wire discriminator for this configuration.
    #[must_use]
    pub const fn vendor(&self) -> &'static str {
        match self {
            Self::Cisco { .. } => "cisco",
            Self::Fortinet { .. } => "fortinet",
            Self::PaloAlto { .. } => "palo_alto",
            Self::Aruba { .. } => "aruba",
        }
    }
}

/// Order request for a new MVE.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MveOrder {
    /// Display name for the edge instance.
    #[serde(rename = "productName")]
    pub name: String,
    /// Identifier of the data centre location.
    pub location_id: u32,
    /// Contract term in months.
    #[serde(rename = "term")]
    pub term_months: u32,
    /// Compute footprint.
    pub mve_size: MveSize,
    /// Vendor image to boot.
    pub vendor_config: MveVendorConfig,
}

impl MveOrder {
    /// Validates the order before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation(String::from("name must not be empty")));
        }
        match &self.vendor_config {
            MveVendorConfig::Cisco {
                admin_ssh_public_key,
                ..
            } if admin_ssh_public_key.trim().is_empty() => Err(ApiError::Validation(
                String::from("cisco images need an admin SSH public key"),
            )),
            MveVendorConfig::Aruba { account_name, .. } if account_name.trim().is_empty() => Err(
                ApiError::Validation(String::from("aruba images need an account name")),
            ),
            _ => Ok(()),
        }
    }
}

/// Point-in-time view of an MVE.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mve {
    /// Unique product identifier.
    pub product_uid: String,
    /// Display name.
    #[serde(default)]
    pub product_name: String,
    /// Current lifecycle status.
    #[serde(default)]
    pub provisioning_status: ProvisioningStatus,
    /// Vendor of the running image.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Compute footprint.
    #[serde(default)]
    pub mve_size: Option<MveSize>,
    /// Data centre location identifier.
    #[serde(default)]
    pub location_id: Option<u32>,
}

/// Requested changes to an MVE.
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MveUpdate {
    /// New display name.
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New cost centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<String>,
}

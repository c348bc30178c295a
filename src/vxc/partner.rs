//! Cloud-provider interconnect configurations for VXC ends.
//!
//! The API models partner ends as one of several alternative record shapes
//! selected by the `connectType` field. Each shape is a variant here so a
//! response can never decode into a config the caller then has to probe
//! field-by-field.

use serde::{Deserialize, Serialize};

/// Vendor-specific configuration attached to the far end of a VXC,
/// discriminated on the wire by `connectType`.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(tag = "connectType")]
pub enum PartnerConfig {
    /// AWS Direct Connect virtual interface.
    #[serde(rename = "AWS", rename_all = "camelCase")]
    Aws {
        /// AWS account that owns the virtual interface.
        owner_account: String,
        /// BGP ASN presented to AWS; omitted to accept the default.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customer_asn: Option<u32>,
        /// BGP MD5 auth key; omitted to let AWS generate one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth_key: Option<String>,
        /// Name shown in the AWS console.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        connection_name: Option<String>,
    },
    /// AWS hosted connection (dedicated bandwidth, no VIF negotiation).
    #[serde(rename = "AWSHC", rename_all = "camelCase")]
    AwsHostedConnection {
        /// AWS account that accepts the hosted connection.
        owner_account: String,
        /// Name shown in the AWS console.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        connection_name: Option<String>,
    },
    /// Azure ExpressRoute circuit.
    #[serde(rename = "AZURE", rename_all = "camelCase")]
    Azure {
        /// ExpressRoute service key identifying the circuit.
        service_key: String,
    },
    /// Google Cloud Partner Interconnect attachment.
    #[serde(rename = "GOOGLE", rename_all = "camelCase")]
    Google {
        /// Pairing key issued by the Google Cloud console.
        pairing_key: String,
    },
    /// Oracle Cloud FastConnect virtual circuit.
    #[serde(rename = "ORACLE", rename_all = "camelCase")]
    Oracle {
        /// OCID of the virtual circuit to attach to.
        virtual_circuit_id: String,
    },
    /// Transit gateway handoff to the provider's internet egress.
    #[serde(rename = "TRANSIT")]
    Transit,
}

impl PartnerConfig {
    /// Returns the wire discriminator for this configuration.
    #[must_use]
    pub const fn connect_type(&self) -> &'static str {
        match self {
            Self::Aws { .. } => "AWS",
            Self::AwsHostedConnection { .. } => "AWSHC",
            Self::Azure { .. } => "AZURE",
            Self::Google { .. } => "GOOGLE",
            Self::Oracle { .. } => "ORACLE",
            Self::Transit => "TRANSIT",
        }
    }
}

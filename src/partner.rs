//! Partner port discovery.
//!
//! Partner ports are the cloud- and exchange-provider ports available as
//! the far end of a VXC. The API exposes one listing endpoint; filtering
//! happens client-side.

use serde::Deserialize;

use crate::client::Client;
use crate::error::ApiError;

/// A partner port available for VXC termination.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPort {
    /// Unique product identifier to use as a VXC B-end.
    pub product_uid: String,
    /// Name of the company operating the port.
    #[serde(default)]
    pub company_name: String,
    /// Connect type the port accepts (for example `AWS` or `TRANSIT`).
    #[serde(default)]
    pub connect_type: String,
    /// Data centre location identifier.
    #[serde(default)]
    pub location_id: Option<u32>,
    /// Port speed in Mbps.
    #[serde(default, rename = "portSpeed")]
    pub speed_mbps: Option<u32>,
    /// Diversity zone the port belongs to.
    #[serde(default)]
    pub diversity_zone: Option<String>,
}

/// Client-side filter over the partner port listing. Empty filters match
/// everything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartnerPortFilter {
    /// Required connect type, matched exactly.
    pub connect_type: Option<String>,
    /// Required location identifier.
    pub location_id: Option<u32>,
    /// Required operating company, matched case-insensitively.
    pub company_name: Option<String>,
}

impl PartnerPortFilter {
    /// True when the port satisfies every populated criterion.
    #[must_use]
    pub fn matches(&self, port: &PartnerPort) -> bool {
        let connect_ok = self
            .connect_type
            .as_ref()
            .is_none_or(|connect| *connect == port.connect_type);
        let location_ok = self
            .location_id
            .is_none_or(|location| port.location_id == Some(location));
        let company_ok = self
            .company_name
            .as_ref()
            .is_none_or(|company| company.eq_ignore_ascii_case(&port.company_name));
        connect_ok && location_ok && company_ok
    }
}

impl Client {
    /// Lists every partner port visible to the account.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn list_partner_ports(&self) -> Result<Vec<PartnerPort>, ApiError> {
        self.get("/v2/partner/ports").await
    }

    /// Lists partner ports matching the filter.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn find_partner_ports(
        &self,
        filter: &PartnerPortFilter,
    ) -> Result<Vec<PartnerPort>, ApiError> {
        let mut ports = self.list_partner_ports().await?;
        ports.retain(|port| filter.matches(port));
        Ok(ports)
    }
}

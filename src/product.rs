//! Shared order, status, and action plumbing for billable products.
//!
//! Every product family (port, VXC, MCR, MVE, IX) is ordered through the
//! same `/v3/networkdesign/buy` endpoint and managed through the same
//! `/v3/product/{uid}` surface; the per-family modules layer their typed
//! requests on top of the helpers here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;

/// Lifecycle status the API reports for a provisioned product.
///
/// Unknown values decode as [`ProvisioningStatus::Other`] so new remote
/// states never fail deserialization.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum ProvisioningStatus {
    /// Order accepted but not yet actionable.
    New,
    /// Resources allocated; deployment has not started.
    Deployable,
    /// Deployed and configured; traffic-ready on some product families.
    Configured,
    /// Fully provisioned and carrying traffic.
    Live,
    /// Scheduled for cancellation at end of term.
    Cancelled,
    /// Torn down and billing stopped.
    Decommissioned,
    /// A status this client does not recognise.
    Other(String),
}

impl ProvisioningStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "NEW",
            Self::Deployable => "DEPLOYABLE",
            Self::Configured => "CONFIGURED",
            Self::Live => "LIVE",
            Self::Cancelled => "CANCELLED",
            Self::Decommissioned => "DECOMMISSIONED",
            Self::Other(value) => value.as_str(),
        }
    }

    /// True once provisioning has reached a traffic-ready state.
    #[must_use]
    pub const fn is_provisioned(&self) -> bool {
        matches!(self, Self::Live | Self::Configured)
    }
}

impl Default for ProvisioningStatus {
    fn default() -> Self {
        Self::New
    }
}

impl From<String> for ProvisioningStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NEW" => Self::New,
            "DEPLOYABLE" => Self::Deployable,
            "CONFIGURED" => Self::Configured,
            "LIVE" => Self::Live,
            "CANCELLED" => Self::Cancelled,
            "DECOMMISSIONED" => Self::Decommissioned,
            _ => Self::Other(value),
        }
    }
}

impl From<ProvisioningStatus> for String {
    fn from(value: ProvisioningStatus) -> Self {
        value.as_str().to_owned()
    }
}

impl std::fmt::Display for ProvisioningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions accepted by the `/v3/product/{uid}/action/{action}` endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProductAction {
    /// Cancel at the end of the current billing term.
    Cancel,
    /// Cancel immediately and begin decommissioning.
    CancelNow,
    /// Revert a pending end-of-term cancellation.
    UnCancel,
}

impl ProductAction {
    /// Returns the path segment for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cancel => "CANCEL",
            Self::CancelNow => "CANCEL_NOW",
            Self::UnCancel => "UN_CANCEL",
        }
    }
}

/// Identifier assigned to one product by a successful order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct OrderedProduct {
    /// Unique identifier of the newly created product.
    #[serde(rename = "technicalServiceUid")]
    pub product_uid: String,
}

impl Client {
    /// Places an order for one or more products and returns the assigned
    /// identifiers, one per ordered product.
    pub(crate) async fn place_order<B>(&self, items: &[B]) -> Result<Vec<OrderedProduct>, ApiError>
    where
        B: Serialize,
    {
        self.post("/v3/networkdesign/buy", items).await
    }

    /// Places an order expected to produce exactly one product.
    pub(crate) async fn place_single_order<B>(&self, item: &B) -> Result<OrderedProduct, ApiError>
    where
        B: Serialize,
    {
        let ordered = self.place_order(std::slice::from_ref(item)).await?;
        ordered
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode {
                path: String::from("/v3/networkdesign/buy"),
                message: String::from("order response contained no products"),
            })
    }

    /// Fetches one product record decoded as `T`.
    pub(crate) async fn get_product<T: DeserializeOwned>(&self, uid: &str) -> Result<T, ApiError> {
        self.get(&format!("/v2/product/{uid}")).await
    }

    /// Applies a modification to a product and returns the updated record.
    pub(crate) async fn modify_product<T, B>(&self, uid: &str, update: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put(&format!("/v3/product/{uid}"), update).await
    }

    /// Runs a lifecycle action against a product.
    pub(crate) async fn product_action(
        &self,
        uid: &str,
        action: ProductAction,
    ) -> Result<(), ApiError> {
        self.post_action(&format!("/v3/product/{uid}/action/{}", action.as_str()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ProductAction, ProvisioningStatus};

    #[rstest]
    #[case("NEW", ProvisioningStatus::New)]
    #[case("DEPLOYABLE", ProvisioningStatus::Deployable)]
    #[case("CONFIGURED", ProvisioningStatus::Configured)]
    #[case("LIVE", ProvisioningStatus::Live)]
    #[case("CANCELLED", ProvisioningStatus::Cancelled)]
    #[case("DECOMMISSIONED", ProvisioningStatus::Decommissioned)]
    fn status_round_trips_known_values(
        #[case] wire: &str,
        #[case] expected: ProvisioningStatus,
    ) {
        let decoded = ProvisioningStatus::from(wire.to_owned());
        assert_eq!(decoded, expected);
        assert_eq!(decoded.as_str(), wire);
    }

    #[test]
    fn status_preserves_unknown_values() {
        let decoded = ProvisioningStatus::from(String::from("DESIGN_DEPLOYED"));
        assert_eq!(
            decoded,
            ProvisioningStatus::Other(String::from("DESIGN_DEPLOYED"))
        );
        assert_eq!(decoded.as_str(), "DESIGN_DEPLOYED");
        assert!(!decoded.is_provisioned());
    }

    #[rstest]
    #[case(ProvisioningStatus::Live, true)]
    #[case(ProvisioningStatus::Configured, true)]
    #[case(ProvisioningStatus::Deployable, false)]
    #[case(ProvisioningStatus::Cancelled, false)]
    #[case(ProvisioningStatus::Decommissioned, false)]
    fn provisioned_statuses(#[case] status: ProvisioningStatus, #[case] expected: bool) {
        assert_eq!(status.is_provisioned(), expected);
    }

    #[test]
    fn status_deserializes_from_json_string() {
        let status: ProvisioningStatus =
            serde_json::from_str("\"LIVE\"").unwrap_or_else(|err| panic!("decode status: {err}"));
        assert_eq!(status, ProvisioningStatus::Live);
    }

    #[test]
    fn action_path_segments() {
        assert_eq!(ProductAction::Cancel.as_str(), "CANCEL");
        assert_eq!(ProductAction::CancelNow.as_str(), "CANCEL_NOW");
        assert_eq!(ProductAction::UnCancel.as_str(), "UN_CANCEL");
    }
}

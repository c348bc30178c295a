//! Port ordering, modification, and lifecycle waits.

mod types;

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::ApiError;
use crate::product::{OrderedProduct, ProductAction, ProvisioningStatus};
use crate::wait::{WaitOptions, wait_until};

pub use types::{Port, PortOrder, PortUpdate};

const RESOURCE: &str = "port";

impl Client {
    /// Orders a new port (or LAG) and returns the assigned identifiers,
    /// one per member port.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// order is malformed, otherwise any transport or API error.
    pub async fn buy_port(&self, order: &PortOrder) -> Result<Vec<OrderedProduct>, ApiError> {
        order.validate()?;
        self.place_order(std::slice::from_ref(order)).await
    }

    /// Fetches the current snapshot of a port.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_port(&self, uid: &str) -> Result<Port, ApiError> {
        self.get_product(uid).await
    }

    /// Lists every port-family product visible to the account.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn list_ports(&self) -> Result<Vec<Port>, ApiError> {
        self.get("/v2/products").await
    }

    /// Applies a modification and returns the updated record. The remote
    /// side applies changes asynchronously; use
    /// [`Client::wait_for_port_update`] to block until they are visible.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_port(&self, uid: &str, update: &PortUpdate) -> Result<Port, ApiError> {
        self.modify_product(uid, update).await
    }

    /// Cancels the port at the end of its billing term.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_port(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::Cancel).await
    }

    /// Cancels the port immediately and begins decommissioning.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_port_now(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::CancelNow).await
    }

    /// Reverts a pending end-of-term cancellation.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn restore_port(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::UnCancel).await
    }

    /// Blocks until the port reaches a traffic-ready status (`LIVE` or
    /// `CONFIGURED`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`], [`ApiError::WaitCanceled`], or a
    /// fetch error surfaced by the configured policy.
    pub async fn wait_for_port_provisioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Port, ApiError> {
        wait_until(options, cancel, || self.get_port(uid), |port: &Port| {
            port.provisioning_status.is_provisioned()
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an end-of-term cancellation is acknowledged
    /// (`CANCELLED`).
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_port_provisioned`].
    pub async fn wait_for_port_cancelled(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Port, ApiError> {
        wait_until(options, cancel, || self.get_port(uid), |port: &Port| {
            port.provisioning_status == ProvisioningStatus::Cancelled
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an immediate cancellation has fully torn the port down
    /// (`DECOMMISSIONED`).
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_port_provisioned`].
    pub async fn wait_for_port_decommissioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Port, ApiError> {
        wait_until(options, cancel, || self.get_port(uid), |port: &Port| {
            port.provisioning_status == ProvisioningStatus::Decommissioned
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until every field requested by `update` is visible in the
    /// port's snapshot.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_port_provisioned`].
    pub async fn wait_for_port_update(
        &self,
        uid: &str,
        update: &PortUpdate,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Port, ApiError> {
        wait_until(options, cancel, || self.get_port(uid), |port: &Port| {
            update.is_applied(port)
        })
        .await
        .into_result(RESOURCE, uid)
    }
}

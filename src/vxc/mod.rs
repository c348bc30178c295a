//! Virtual cross-connect ordering, modification, and lifecycle waits.

pub mod partner;
mod types;

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::ApiError;
use crate::product::{OrderedProduct, ProductAction, ProvisioningStatus};
use crate::wait::{WaitOptions, wait_until};

pub use partner::PartnerConfig;
pub use types::{Vxc, VxcEnd, VxcOrder, VxcOrderEnd, VxcUpdate};

const RESOURCE: &str = "vxc";

impl Client {
    /// Orders a new VXC and returns the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// order is malformed, otherwise any transport or API error.
    pub async fn buy_vxc(&self, order: &VxcOrder) -> Result<OrderedProduct, ApiError> {
        order.validate()?;
        self.place_single_order(order).await
    }

    /// Fetches the current snapshot of a VXC.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_vxc(&self, uid: &str) -> Result<Vxc, ApiError> {
        self.get_product(uid).await
    }

    /// Applies a modification and returns the updated record. Rate-limit
    /// and VLAN changes propagate asynchronously; use
    /// [`Client::wait_for_vxc_update`] to block until they are visible.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_vxc(&self, uid: &str, update: &VxcUpdate) -> Result<Vxc, ApiError> {
        self.modify_product(uid, update).await
    }

    /// Cancels the VXC at the end of its billing term.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_vxc(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::Cancel).await
    }

    /// Cancels the VXC immediately and begins decommissioning.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_vxc_now(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::CancelNow).await
    }

    /// Blocks until the VXC reaches a traffic-ready status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`], [`ApiError::WaitCanceled`], or a
    /// fetch error surfaced by the configured policy.
    pub async fn wait_for_vxc_provisioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Vxc, ApiError> {
        wait_until(options, cancel, || self.get_vxc(uid), |vxc: &Vxc| {
            vxc.provisioning_status.is_provisioned()
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an end-of-term cancellation is acknowledged.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_vxc_provisioned`].
    pub async fn wait_for_vxc_cancelled(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Vxc, ApiError> {
        wait_until(options, cancel, || self.get_vxc(uid), |vxc: &Vxc| {
            vxc.provisioning_status == ProvisioningStatus::Cancelled
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an immediate cancellation has fully torn the VXC down.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_vxc_provisioned`].
    pub async fn wait_for_vxc_decommissioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Vxc, ApiError> {
        wait_until(options, cancel, || self.get_vxc(uid), |vxc: &Vxc| {
            vxc.provisioning_status == ProvisioningStatus::Decommissioned
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until every field requested by `update` is visible in the
    /// VXC's snapshot. `None` fields are not compared.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_vxc_provisioned`].
    pub async fn wait_for_vxc_update(
        &self,
        uid: &str,
        update: &VxcUpdate,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Vxc, ApiError> {
        wait_until(options, cancel, || self.get_vxc(uid), |vxc: &Vxc| {
            update.is_applied(vxc)
        })
        .await
        .into_result(RESOURCE, uid)
    }
}

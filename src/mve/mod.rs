//! Virtual network edge (MVE) ordering and lifecycle waits.

mod types;

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::ApiError;
use crate::product::{OrderedProduct, ProductAction, ProvisioningStatus};
use crate::wait::{WaitOptions, wait_until};

pub use types::{Mve, MveOrder, MveSize, MveUpdate, MveVendorConfig};

const RESOURCE: &str = "mve";

impl Client {
    /// Orders a new MVE and returns the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// order is malformed, otherwise any transport or API error.
    pub async fn buy_mve(&self, order: &MveOrder) -> Result<OrderedProduct, ApiError> {
        order.validate()?;
        self.place_single_order(order).await
    }

    /// Fetches the current snapshot of an MVE.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_mve(&self, uid: &str) -> Result<Mve, ApiError> {
        self.get_product(uid).await
    }

    /// Applies a modification and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_mve(&self, uid: &str, update: &MveUpdate) -> Result<Mve, ApiError> {
        self.modify_product(uid, update).await
    }

    /// Cancels the MVE at the end of its billing term.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_mve(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::Cancel).await
    }

    /// Cancels the MVE immediately and begins decommissioning.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_mve_now(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::CancelNow).await
    }

    /// Blocks until the MVE reaches a traffic-ready status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`], [`ApiError::WaitCanceled`], or a
    /// fetch error surfaced by the configured policy.
    pub async fn wait_for_mve_provisioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Mve, ApiError> {
        wait_until(options, cancel, || self.get_mve(uid), |mve: &Mve| {
            mve.provisioning_status.is_provisioned()
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an immediate cancellation has fully torn the MVE down.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_mve_provisioned`].
    pub async fn wait_for_mve_decommissioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Mve, ApiError> {
        wait_until(options, cancel, || self.get_mve(uid), |mve: &Mve| {
            mve.provisioning_status == ProvisioningStatus::Decommissioned
        })
        .await
        .into_result(RESOURCE, uid)
    }
}

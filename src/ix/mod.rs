//! Internet exchange (IX) ordering, modification, and lifecycle waits.

mod types;

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::ApiError;
use crate::product::{OrderedProduct, ProductAction, ProvisioningStatus};
use crate::wait::{WaitOptions, wait_until};

pub use types::{Ix, IxOrder, IxUpdate};

const RESOURCE: &str = "ix";

impl Client {
    /// Orders a new IX service and returns the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// order is malformed, otherwise any transport or API error.
    pub async fn buy_ix(&self, order: &IxOrder) -> Result<OrderedProduct, ApiError> {
        order.validate()?;
        self.place_single_order(order).await
    }

    /// Fetches the current snapshot of an IX service.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_ix(&self, uid: &str) -> Result<Ix, ApiError> {
        self.get_product(uid).await
    }

    /// Applies a modification and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_ix(&self, uid: &str, update: &IxUpdate) -> Result<Ix, ApiError> {
        self.modify_product(uid, update).await
    }

    /// Cancels the service at the end of its billing term.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_ix(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::Cancel).await
    }

    /// Cancels the service immediately and begins decommissioning.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_ix_now(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::CancelNow).await
    }

    /// Blocks until the service reaches a traffic-ready status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`], [`ApiError::WaitCanceled`], or a
    /// fetch error surfaced by the configured policy.
    pub async fn wait_for_ix_provisioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Ix, ApiError> {
        wait_until(options, cancel, || self.get_ix(uid), |ix: &Ix| {
            ix.provisioning_status.is_provisioned()
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an immediate cancellation has fully torn the service
    /// down.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_ix_provisioned`].
    pub async fn wait_for_ix_decommissioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Ix, ApiError> {
        wait_until(options, cancel, || self.get_ix(uid), |ix: &Ix| {
            ix.provisioning_status == ProvisioningStatus::Decommissioned
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until every field requested by `update` is visible in the
    /// service's snapshot.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_ix_provisioned`].
    pub async fn wait_for_ix_update(
        &self,
        uid: &str,
        update: &IxUpdate,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Ix, ApiError> {
        wait_until(options, cancel, || self.get_ix(uid), |ix: &Ix| {
            update.is_applied(ix)
        })
        .await
        .into_result(RESOURCE, uid)
    }
}

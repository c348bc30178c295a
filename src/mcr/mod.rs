//! Cloud router (MCR) ordering, prefix filter lists, and lifecycle waits.

mod types;

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::ApiError;
use crate::product::{OrderedProduct, ProductAction, ProvisioningStatus};
use crate::wait::{WaitOptions, wait_until};

pub use types::{
    AddressFamily, Mcr, McrOrder, McrUpdate, NewPrefixFilterList, PrefixAction, PrefixFilterList,
    PrefixListEntry,
};

const RESOURCE: &str = "mcr";

fn prefix_lists_path(mcr_uid: &str) -> String {
    format!("/v2/product/mcr2/{mcr_uid}/prefixLists")
}

fn prefix_list_path(mcr_uid: &str, list_id: u64) -> String {
    format!("/v2/product/mcr2/{mcr_uid}/prefixLists/{list_id}")
}

impl Client {
    /// Orders a new cloud router and returns the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any network call when the
    /// order is malformed, otherwise any transport or API error.
    pub async fn buy_mcr(&self, order: &McrOrder) -> Result<OrderedProduct, ApiError> {
        order.validate()?;
        self.place_single_order(order).await
    }

    /// Fetches the current snapshot of a cloud router.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_mcr(&self, uid: &str) -> Result<Mcr, ApiError> {
        self.get_product(uid).await
    }

    /// Applies a modification and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn update_mcr(&self, uid: &str, update: &McrUpdate) -> Result<Mcr, ApiError> {
        self.modify_product(uid, update).await
    }

    /// Cancels the router at the end of its billing term.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_mcr(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::Cancel).await
    }

    /// Cancels the router immediately and begins decommissioning.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn cancel_mcr_now(&self, uid: &str) -> Result<(), ApiError> {
        self.product_action(uid, ProductAction::CancelNow).await
    }

    /// Creates a prefix filter list on a router and returns the stored
    /// list, including its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the list is malformed,
    /// otherwise any transport, API, or decode error.
    pub async fn create_prefix_filter_list(
        &self,
        mcr_uid: &str,
        list: &NewPrefixFilterList,
    ) -> Result<PrefixFilterList, ApiError> {
        list.validate()?;
        self.post(&prefix_lists_path(mcr_uid), list).await
    }

    /// Lists the prefix filter lists defined on a router. Entries are not
    /// populated by the listing endpoint; fetch an individual list for
    /// them.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn list_prefix_filter_lists(
        &self,
        mcr_uid: &str,
    ) -> Result<Vec<PrefixFilterList>, ApiError> {
        self.get(&prefix_lists_path(mcr_uid)).await
    }

    /// Fetches a single prefix filter list with its entries.
    ///
    /// # Errors
    ///
    /// Returns any transport, API, or decode error.
    pub async fn get_prefix_filter_list(
        &self,
        mcr_uid: &str,
        list_id: u64,
    ) -> Result<PrefixFilterList, ApiError> {
        self.get(&prefix_list_path(mcr_uid, list_id)).await
    }

    /// Replaces the description, family, and entries of a stored list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the replacement is malformed,
    /// otherwise any transport, API, or decode error.
    pub async fn update_prefix_filter_list(
        &self,
        mcr_uid: &str,
        list_id: u64,
        list: &NewPrefixFilterList,
    ) -> Result<PrefixFilterList, ApiError> {
        list.validate()?;
        self.put(&prefix_list_path(mcr_uid, list_id), list).await
    }

    /// Deletes a prefix filter list.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn delete_prefix_filter_list(
        &self,
        mcr_uid: &str,
        list_id: u64,
    ) -> Result<(), ApiError> {
        self.delete(&prefix_list_path(mcr_uid, list_id)).await
    }

    /// Blocks until the router reaches a traffic-ready status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`], [`ApiError::WaitCanceled`], or a
    /// fetch error surfaced by the configured policy.
    pub async fn wait_for_mcr_provisioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Mcr, ApiError> {
        wait_until(options, cancel, || self.get_mcr(uid), |mcr: &Mcr| {
            mcr.provisioning_status.is_provisioned()
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until an immediate cancellation has fully torn the router
    /// down.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_mcr_provisioned`].
    pub async fn wait_for_mcr_decommissioned(
        &self,
        uid: &str,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Mcr, ApiError> {
        wait_until(options, cancel, || self.get_mcr(uid), |mcr: &Mcr| {
            mcr.provisioning_status == ProvisioningStatus::Decommissioned
        })
        .await
        .into_result(RESOURCE, uid)
    }

    /// Blocks until a prefix filter list with the given identifier appears
    /// in the router's listing. Lists become visible shortly after
    /// creation; several of these waits may run concurrently against the
    /// same router.
    ///
    /// # Errors
    ///
    /// As [`Client::wait_for_mcr_provisioned`].
    pub async fn wait_for_prefix_filter_list(
        &self,
        mcr_uid: &str,
        list_id: u64,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<PrefixFilterList>, ApiError> {
        wait_until(
            options,
            cancel,
            || self.list_prefix_filter_lists(mcr_uid),
            |lists: &Vec<PrefixFilterList>| lists.iter().any(|list| list.id == list_id),
        )
        .await
        .into_result("prefix filter list", mcr_uid)
    }
}

#[cfg(test)]
mod tests;

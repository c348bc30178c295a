//! Client SDK for the Loomport network-fabric API.
//!
//! The crate wraps the provider's versioned REST endpoints with typed
//! operations — ports, virtual cross-connects (VXCs), cloud routers
//! (MCRs), virtual network edges (MVEs), internet exchanges (IXs),
//! partner port discovery, service keys, and user management — and a
//! single convergence engine ([`wait::wait_until`]) that blocks until an
//! asynchronously provisioned resource reaches a target state.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod ix;
pub mod mcr;
pub mod mve;
pub mod partner;
pub mod port;
pub mod product;
pub mod service_key;
pub mod session_store;
pub mod vxc;
pub mod wait;

pub use account::{CompanyUser, RegisteredTestUser, TestUserSpec, UserInvite, UserRole};
pub use client::{Client, Credentials, Environment, Session};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use ix::{Ix, IxOrder, IxUpdate};
pub use mcr::{
    AddressFamily, Mcr, McrOrder, McrUpdate, NewPrefixFilterList, PrefixAction, PrefixFilterList,
    PrefixListEntry,
};
pub use mve::{Mve, MveOrder, MveSize, MveUpdate, MveVendorConfig};
pub use partner::{PartnerPort, PartnerPortFilter};
pub use port::{Port, PortOrder, PortUpdate};
pub use product::{OrderedProduct, ProductAction, ProvisioningStatus};
pub use service_key::{ServiceKey, ServiceKeyOrder, ServiceKeyUpdate};
pub use session_store::{SessionStore, SessionStoreError};
pub use vxc::{PartnerConfig, Vxc, VxcEnd, VxcOrder, VxcOrderEnd, VxcUpdate};
pub use wait::{FetchErrorPolicy, WaitOptions, WaitOutcome, wait_until};

pub use tokio_util::sync::CancellationToken;

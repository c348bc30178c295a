//! Command-line interface definitions for the `loomport-testuser` binary.
//!
//! This module centralises the clap parser structure so both the binary
//! and the build script can reuse it when generating the manual page.

use clap::Parser;

/// CLI for the `loomport-testuser` binary.
#[derive(Debug, Parser)]
#[command(
    name = "loomport-testuser",
    about = "Register a throwaway Loomport staging user and print its credentials"
)]
pub(crate) struct Cli {
    /// Environment to register against: `staging`, or a custom base URL
    /// such as a local mock. Production is rejected.
    #[arg(long, env = "LOOMPORT_ENVIRONMENT", default_value = "staging")]
    pub(crate) environment: String,
    /// Domain part of the generated email address.
    #[arg(long, default_value = "example.net")]
    pub(crate) email_domain: String,
    /// Company name to register the user under; generated when omitted.
    #[arg(long)]
    pub(crate) company_name: Option<String>,
    /// Skip caching the issued session token in loomport.toml.
    #[arg(long)]
    pub(crate) no_store: bool,
}

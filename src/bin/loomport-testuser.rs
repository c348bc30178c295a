//! Binary entry point for registering throwaway Loomport staging users.
//!
//! Integration suites need disposable accounts that can order and tear
//! down real staging services. This binary registers one, prints its
//! credentials, and caches the issued session token so follow-up tooling
//! can skip the login round trip.

#[path = "../cli/mod.rs"]
mod cli;

use std::io::{self, Write as _};
use std::process;

use clap::Parser;
use loomport::{Client, Environment, SessionStore, TestUserSpec};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn resolve_environment(name: &str) -> Result<Environment, String> {
    if let Some(environment) = Environment::from_name(name) {
        return Ok(environment);
    }
    if name.starts_with("http://") || name.starts_with("https://") {
        return Ok(Environment::Custom(name.to_owned()));
    }
    Err(format!(
        "unrecognised environment '{name}': expected 'staging' or a base URL"
    ))
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = cli::Cli::parse();
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(message) => {
            writeln!(io::stderr(), "{message}").ok();
            1
        }
    };

    process::exit(exit_code);
}

async fn run(cli: cli::Cli) -> Result<(), String> {
    let environment = resolve_environment(&cli.environment)?;
    let spec = TestUserSpec::generate(&cli.email_domain, cli.company_name);
    let registered = Client::register_test_user(&environment, &spec)
        .await
        .map_err(|err| err.to_string())?;

    if !cli.no_store {
        let path = SessionStore::new()
            .write_token(registered.session.token())
            .map_err(|err| err.to_string())?;
        tracing::info!(%path, "cached session token");
    }

    writeln!(
        io::stdout(),
        "email={}\npassword={}\ncompany={}",
        registered.email,
        registered.password,
        spec.company_name
    )
    .map_err(|err| err.to_string())?;
    Ok(())
}

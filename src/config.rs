//! Process configuration: command-line flags plus the metadata endpoint taken from
//! the environment.

use std::time::Duration;

use clap::Parser;

use crate::metadata::{self, ENDPOINT_ENV};

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Prometheus exporter for Amazon ECS task metadata")]
pub struct Args {
    /// The address to listen on for HTTP requests. A bare `:port` listens on all
    /// interfaces.
    #[arg(long, default_value = ":9779")]
    pub addr: String,

    /// Deadline in seconds for retrieving task metadata and stats on each scrape.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolves the configuration from `args` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`metadata::Error::MissingEndpoint`] if [`ENDPOINT_ENV`] is unset or empty.
    pub fn from_env(args: Args) -> metadata::Result<Self> {
        Self::new(args, std::env::var(ENDPOINT_ENV).ok())
    }

    fn new(args: Args, endpoint: Option<String>) -> metadata::Result<Self> {
        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .ok_or(metadata::Error::MissingEndpoint(ENDPOINT_ENV))?;

        Ok(Self {
            addr: listen_addr(args.addr),
            endpoint,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

/// Fills in the unspecified host for addresses given as `:port`.
fn listen_addr(addr: String) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr,
    }
}

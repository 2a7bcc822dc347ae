//! ECS Exporter: republishes Amazon ECS task metadata and container stats as
//! Prometheus gauges.
//!
//! On every scrape the exporter fetches the task metadata and task stats documents
//! from the ECS task metadata endpoint (v4), joins containers with their stats and
//! renders the result in the Prometheus text format. Nothing is cached between
//! scrapes.
use clap::Parser;

pub mod api;
pub mod collector;
pub mod config;
pub mod container;
pub mod error;
pub mod exposition;
pub mod metadata;

#[cfg(test)]
mod testutil;

/// Runs the exporter until the HTTP server stops.
///
/// # Errors
///
/// Possible errors include:
/// - Missing `ECS_CONTAINER_METADATA_URI_V4` environment variable.
/// - An invalid metadata endpoint URL.
/// - Failure to bind the listen address.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env(config::Args::parse())?;

    let client = metadata::Client::new(&config.endpoint, config.timeout)?;
    log::info!("Using task metadata endpoint {}", client.endpoint());

    let retriever = metadata::SnapshotRetriever::new(client, config.timeout);
    let server = api::APIServer::new(collector::Collector::new(retriever));
    server.listen(config.addr).await?;

    Ok(())
}

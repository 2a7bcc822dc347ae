//! Access to the ECS task metadata endpoint (v4).
//!
//! The endpoint exposes two documents that are fetched on every scrape:
//!
//! - `<endpoint>/task` — task identity, placement and the list of containers.
//! - `<endpoint>/task/stats` — runtime stats keyed by container id.
//!
//! [`SnapshotRetriever`] fetches both under one deadline and hands back a [`Snapshot`]
//! or an error, never a partial result.
mod client;
mod error;
pub mod models;
mod snapshot;

pub use client::Client;
pub use error::{Error, Result};
pub use models::{ContainerStats, ContainerStatsMap, NetworkStats};
pub use snapshot::{ContainerMeta, Snapshot, SnapshotRetriever, TaskSnapshot, normalize_cluster};

/// Environment variable holding the metadata endpoint base URL.
pub const ENDPOINT_ENV: &str = "ECS_CONTAINER_METADATA_URI_V4";

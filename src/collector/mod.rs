//! Turns metadata snapshots into labeled gauge samples.
//!
//! # Key Components
//!
//! - [`MetricDescriptor`] — static name, help text and label schema of an exported metric.
//! - [`flatten`] — joins task containers with their stats and emits [`MetricSample`]s.
//! - [`Collector`] — runs one retrieve-then-flatten cycle per scrape.
//!
//! # Exported Metrics
//!
//! Container-level metrics carry the labels in [`BASE_LABELS`]:
//!
//! - `ecs_num_procs`
//! - `ecs_cpu_total`, `ecs_cpu_user`, `ecs_cpu_kernel`, `ecs_cpu_system`, `ecs_cpu_num_online`
//! - `ecs_mem_total`, `ecs_mem_usage`, `ecs_mem_limit`
//! - `ecs_network_rx_rate`, `ecs_network_tx_rate`
//!
//! Interface-level metrics carry the labels in [`NETWORK_LABELS`]:
//!
//! - `ecs_network_{rx,tx}_{bytes,packets,dropped,errors}`
mod descriptors;
mod flatten;

pub use descriptors::{BASE_LABELS, MetricDescriptor, NETWORK_LABELS, descriptors};
pub use flatten::{MetricSample, flatten};

use crate::error::ResultOkLogExt;
use crate::metadata::SnapshotRetriever;

/// Produces the current metric set on demand. Holds no state between scrapes.
#[derive(Debug, Clone)]
pub struct Collector {
    retriever: SnapshotRetriever,
}

impl Collector {
    pub fn new(retriever: SnapshotRetriever) -> Self {
        Self { retriever }
    }

    /// Runs one collection cycle.
    ///
    /// A failed retrieval is logged and yields no samples.
    pub async fn collect(&self) -> Vec<MetricSample> {
        let snapshot = self
            .retriever
            .retrieve()
            .await
            .ok_log("failed to retrieve snapshot");
        match snapshot {
            Some(snapshot) => flatten(&snapshot.task, &snapshot.stats),
            None => Vec::new(),
        }
    }
}

//! Wire shapes of the task metadata (`/task`) and task stats (`/task/stats`) documents.
//!
//! Numeric fields are decoded as `f64` since they end up as gauge values. Stats
//! fields and sub-records missing from the document (or reported as `null`) decode
//! to zero.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::container::ContainerId;

/// Task stats keyed by container id.
///
/// The endpoint reports `null` for containers that have no stats (e.g. stopped ones),
/// hence the `Option`. Use [`ContainerStatsMap::get`] to treat both cases alike.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ContainerStatsMap(HashMap<ContainerId, Option<ContainerStats>>);

impl ContainerStatsMap {
    /// Returns the stats of a container, or `None` if they are absent or `null`.
    pub fn get(&self, id: &str) -> Option<&ContainerStats> {
        self.0.get(id).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ContainerId, ContainerStats)> for ContainerStatsMap {
    fn from_iter<I: IntoIterator<Item = (ContainerId, ContainerStats)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, stats)| (id, Some(stats))).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskMetadata {
    pub cluster: String,
    #[serde(rename = "TaskARN", default)]
    pub task_arn: String,
    pub family: String,
    pub revision: String,
    #[serde(default)]
    pub desired_status: String,
    #[serde(default)]
    pub known_status: String,
    #[serde(default)]
    pub availability_zone: String,
    #[serde(default)]
    pub launch_type: String,
    pub containers: Vec<ContainerMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerMetadata {
    #[serde(rename = "DockerId")]
    pub docker_id: ContainerId,
    pub name: String,
    #[serde(default)]
    pub docker_name: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "ImageID", default)]
    pub image_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub desired_status: String,
    #[serde(default)]
    pub known_status: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(rename = "ContainerARN", default)]
    pub container_arn: String,
}

/// Point-in-time resource usage of a single container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerStats {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_procs: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_stats: CpuStats,
    #[serde(deserialize_with = "null_as_default")]
    pub precpu_stats: CpuStats,
    #[serde(deserialize_with = "null_as_default")]
    pub memory_stats: MemoryStats,
    #[serde(deserialize_with = "null_as_default")]
    pub networks: HashMap<String, NetworkStats>,
    #[serde(deserialize_with = "null_as_default")]
    pub network_rate_stats: NetworkRateStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpuStats {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_usage: CpuUsage,
    #[serde(deserialize_with = "null_as_default")]
    pub system_cpu_usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub online_cpus: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub throttling_data: ThrottlingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpuUsage {
    #[serde(deserialize_with = "null_as_default")]
    pub total_usage: f64,
    #[serde(deserialize_with = "null_items_as_zero")]
    pub percpu_usage: Vec<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub usage_in_kernelmode: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage_in_usermode: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThrottlingData {
    #[serde(deserialize_with = "null_as_default")]
    pub periods: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub throttled_periods: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub throttled_time: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemoryStats {
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub max_usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: f64,
    /// Raw `memory.stat` counters (`cache`, `rss`, `total_pgfault`, ...).
    #[serde(deserialize_with = "null_values_as_zero")]
    pub stats: HashMap<String, f64>,
}

/// Counters of a single network interface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkStats {
    #[serde(deserialize_with = "null_as_default")]
    pub rx_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rx_packets: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rx_errors: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rx_dropped: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_packets: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_errors: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_dropped: f64,
}

/// Aggregate network throughput, computed by the platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkRateStats {
    #[serde(deserialize_with = "null_as_default")]
    pub rx_bytes_per_sec: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_bytes_per_sec: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_items_as_zero<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<Option<f64>> = null_as_default(deserializer)?;
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

fn null_values_as_zero<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: HashMap<String, Option<f64>> = null_as_default(deserializer)?;
    Ok(values
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

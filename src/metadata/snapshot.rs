use std::time::Duration;

use crate::container::ContainerId;

use super::client::Client;
use super::models::{ContainerStatsMap, TaskMetadata};
use super::{Error, Result};

const CLUSTER_SEPARATOR: char = '/';

/// Reduces a cluster ARN to the short cluster name.
///
/// Everything after the last `/` is kept. Values without a separator, or whose only
/// separator is the first character, are returned unchanged.
///
/// # Examples
///
/// ```
/// # use ecs_exporter::metadata::normalize_cluster;
/// assert_eq!(normalize_cluster("arn:aws:ecs:us-east-1:123:cluster/prod"), "prod");
/// assert_eq!(normalize_cluster("prod"), "prod");
/// assert_eq!(normalize_cluster("/leading"), "/leading");
/// ```
pub fn normalize_cluster(cluster: &str) -> String {
    match cluster.rfind(CLUSTER_SEPARATOR) {
        Some(idx) if idx > 0 => cluster[idx + CLUSTER_SEPARATOR.len_utf8()..].to_owned(),
        _ => cluster.to_owned(),
    }
}

/// A container as listed in the task metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMeta {
    pub id: ContainerId,
    pub name: String,
}

/// The subset of the task metadata used to label metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Short cluster name, see [`normalize_cluster`].
    pub cluster: String,
    pub availability_zone: String,
    pub family: String,
    pub revision: String,
    /// Containers in the order reported by the endpoint.
    pub containers: Vec<ContainerMeta>,
}

impl From<TaskMetadata> for TaskSnapshot {
    fn from(value: TaskMetadata) -> Self {
        Self {
            cluster: normalize_cluster(&value.cluster),
            availability_zone: value.availability_zone,
            family: value.family,
            revision: value.revision,
            containers: value
                .containers
                .into_iter()
                .map(|c| ContainerMeta {
                    id: c.docker_id,
                    name: c.name,
                })
                .collect(),
        }
    }
}

/// Result of one successful retrieval: both documents, fetched under the same deadline.
#[derive(Debug)]
pub struct Snapshot {
    pub task: TaskSnapshot,
    pub stats: ContainerStatsMap,
}

/// Fetches consistent [`Snapshot`]s from the metadata endpoint.
#[derive(Debug, Clone)]
pub struct SnapshotRetriever {
    client: Client,
    deadline: Duration,
}

impl SnapshotRetriever {
    pub fn new(client: Client, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Fetches task metadata and task stats concurrently.
    ///
    /// Both requests share one deadline. Either both documents are returned or none:
    /// the first failure is reported and the other request is dropped. Dropping the
    /// returned future cancels both requests.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode error, or [`Error::DeadlineExceeded`] if the
    /// documents were not retrieved in time.
    pub async fn retrieve(&self) -> Result<Snapshot> {
        let fetch = async {
            tokio::try_join!(self.client.task_metadata(), self.client.task_stats())
        };
        let (task, stats) = tokio::time::timeout(self.deadline, fetch)
            .await
            .map_err(|_| Error::DeadlineExceeded(self.deadline))??;

        Ok(Snapshot {
            task: task.into(),
            stats,
        })
    }
}

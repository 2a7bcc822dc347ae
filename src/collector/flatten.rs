use crate::metadata::{ContainerStatsMap, TaskSnapshot};

use super::descriptors::{CONTAINER_METRICS, INTERFACE_METRICS, MetricDescriptor};

/// A single gauge value ready for exposition.
///
/// `label_values` is positionally aligned with `descriptor.label_names`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub descriptor: &'static MetricDescriptor,
    pub label_values: Vec<String>,
    pub value: f64,
}

/// Joins the task's containers with their stats and flattens them into samples.
///
/// Containers are visited in task order. A container without stats is skipped and
/// logged. Every other container yields one sample per container-level metric plus
/// one sample per interface-level metric for each of its network interfaces.
pub fn flatten(task: &TaskSnapshot, stats: &ContainerStatsMap) -> Vec<MetricSample> {
    let mut out = Vec::new();

    for container in &task.containers {
        let Some(container_stats) = stats.get(container.id.as_ref()) else {
            log::warn!(
                target: "collector",
                "no stats for container, skipping: container_id={}, name={}",
                container.id,
                container.name
            );
            continue;
        };

        let labels = vec![
            task.cluster.clone(),
            task.availability_zone.clone(),
            task.family.clone(),
            task.revision.clone(),
            container.name.clone(),
        ];

        out.extend(
            CONTAINER_METRICS
                .iter()
                .map(|&(descriptor, value)| MetricSample {
                    descriptor,
                    label_values: labels.clone(),
                    value: value(container_stats),
                }),
        );

        for (iface, net) in &container_stats.networks {
            let mut iface_labels = labels.clone();
            iface_labels.push(iface.clone());

            out.extend(
                INTERFACE_METRICS
                    .iter()
                    .map(|&(descriptor, value)| MetricSample {
                        descriptor,
                        label_values: iface_labels.clone(),
                        value: value(net),
                    }),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::collector::descriptors::{self, NETWORK_RX_BYTES, NUM_PROCS};
    use crate::container::ContainerId;
    use crate::metadata::models::TaskMetadata;
    use crate::metadata::{ContainerMeta, ContainerStats, NetworkStats};
    use crate::testutil::{TASK, TASK_STATS, capture_logs};

    fn task(containers: &[(&str, &str)]) -> TaskSnapshot {
        TaskSnapshot {
            cluster: "prod".to_owned(),
            availability_zone: "us-east-1a".to_owned(),
            family: "web-app".to_owned(),
            revision: "7".to_owned(),
            containers: containers
                .iter()
                .map(|(id, name)| ContainerMeta {
                    id: ContainerId::from(*id),
                    name: (*name).to_owned(),
                })
                .collect(),
        }
    }

    fn stats_with_procs(num_procs: f64) -> ContainerStats {
        ContainerStats {
            num_procs,
            ..Default::default()
        }
    }

    fn samples_for<'a>(samples: &'a [MetricSample], container: &str) -> Vec<&'a MetricSample> {
        samples
            .iter()
            .filter(|s| s.label_values[4] == container)
            .collect()
    }

    #[test]
    fn test_single_container_without_networks() {
        let task = task(&[("c1", "web")]);
        let stats: ContainerStatsMap = [(ContainerId::new("c1"), stats_with_procs(3.0))]
            .into_iter()
            .collect();

        let samples = flatten(&task, &stats);
        assert_eq!(samples.len(), 11);

        let procs: Vec<_> = samples
            .iter()
            .filter(|s| s.descriptor == &NUM_PROCS)
            .collect();
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].value, 3.0);
        assert_eq!(
            procs[0].label_values,
            ["prod", "us-east-1a", "web-app", "7", "web"]
        );
    }

    #[test]
    fn test_every_base_metric_emitted_once_even_if_zero() {
        let task = task(&[("c1", "web")]);
        let stats: ContainerStatsMap = [(ContainerId::new("c1"), ContainerStats::default())]
            .into_iter()
            .collect();

        let samples = flatten(&task, &stats);
        let names: Vec<_> = samples.iter().map(|s| s.descriptor.name).collect();
        let expected: Vec<_> = descriptors::descriptors()
            .filter(|d| d.label_names.len() == descriptors::BASE_LABELS.len())
            .map(|d| d.name)
            .collect();
        assert_eq!(names, expected);
        assert!(samples.iter().all(|s| s.value == 0.0));
    }

    #[test]
    fn test_container_missing_from_stats_is_skipped() {
        let task = task(&[("c1", "web"), ("c2", "sidecar")]);
        let stats: ContainerStatsMap = [(ContainerId::new("c1"), stats_with_procs(1.0))]
            .into_iter()
            .collect();

        let (samples, logs) = capture_logs(|| flatten(&task, &stats));
        assert_eq!(samples.len(), 11);
        assert_eq!(samples_for(&samples, "web").len(), 11);
        assert!(samples_for(&samples, "sidecar").is_empty());

        let warnings: Vec<_> = logs
            .iter()
            .filter(|l| l.level == log::Level::Warn && l.target == "collector")
            .collect();
        assert_eq!(warnings.len(), 1, "{logs:?}");
        assert!(warnings[0].message.contains("container_id=c2"));
        assert!(warnings[0].message.contains("name=sidecar"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(flatten(&task(&[]), &ContainerStatsMap::default()).is_empty());
        assert!(flatten(&task(&[("c1", "web")]), &ContainerStatsMap::default()).is_empty());
    }

    #[test]
    fn test_network_interfaces_fan_out() {
        let task = task(&[("c1", "web")]);
        let mut container_stats = stats_with_procs(2.0);
        container_stats.networks = HashMap::from([
            (
                "eth0".to_owned(),
                NetworkStats {
                    rx_bytes: 100.0,
                    tx_errors: 2.0,
                    ..Default::default()
                },
            ),
            (
                "eth1".to_owned(),
                NetworkStats {
                    rx_bytes: 5.0,
                    ..Default::default()
                },
            ),
        ]);
        let stats: ContainerStatsMap = [(ContainerId::new("c1"), container_stats)]
            .into_iter()
            .collect();

        let samples = flatten(&task, &stats);
        assert_eq!(samples.len(), 11 + 2 * 8);

        for iface in ["eth0", "eth1"] {
            let iface_samples: Vec<_> = samples
                .iter()
                .filter(|s| s.label_values.get(5).map(String::as_str) == Some(iface))
                .collect();
            assert_eq!(iface_samples.len(), 8, "{iface}");
            for sample in &iface_samples {
                assert_eq!(
                    sample.label_values,
                    ["prod", "us-east-1a", "web-app", "7", "web", iface]
                );
            }
        }

        let eth0_rx = samples
            .iter()
            .find(|s| s.descriptor == &NETWORK_RX_BYTES && s.label_values[5] == "eth0")
            .unwrap();
        assert_eq!(eth0_rx.value, 100.0);
    }

    #[test]
    fn test_label_values_align_with_descriptor() {
        let task: TaskSnapshot = serde_json::from_str::<TaskMetadata>(TASK).unwrap().into();
        let stats: ContainerStatsMap = serde_json::from_str(TASK_STATS).unwrap();

        let samples = flatten(&task, &stats);
        // pause container: 11, curl container: 11 + 8 for eth0
        assert_eq!(samples.len(), 30);
        for sample in &samples {
            assert_eq!(
                sample.label_values.len(),
                sample.descriptor.label_names.len(),
                "{}",
                sample.descriptor.name
            );
            assert_eq!(sample.label_values[0], "default");
        }
    }

    #[test]
    fn test_preserves_container_order() {
        let task = task(&[("c2", "second"), ("c1", "first")]);
        let stats: ContainerStatsMap = [
            (ContainerId::new("c1"), stats_with_procs(1.0)),
            (ContainerId::new("c2"), stats_with_procs(2.0)),
        ]
        .into_iter()
        .collect();

        let samples = flatten(&task, &stats);
        assert_eq!(samples[0].label_values[4], "second");
        assert_eq!(samples[11].label_values[4], "first");
    }
}

use crate::metadata::{ContainerStats, NetworkStats};

/// Labels attached to every container-level metric, in label-value order.
pub const BASE_LABELS: [&str; 5] = [
    "cluster",
    "availability_zone",
    "family",
    "revision",
    "container",
];

/// [`BASE_LABELS`] followed by the interface name.
pub const NETWORK_LABELS: [&str; 6] = [
    "cluster",
    "availability_zone",
    "family",
    "revision",
    "container",
    "network_interface",
];

/// Static description of an exported metric. Every value is exported as a gauge.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub label_names: &'static [&'static str],
}

impl MetricDescriptor {
    const fn base(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            label_names: &BASE_LABELS,
        }
    }

    const fn network(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            label_names: &NETWORK_LABELS,
        }
    }
}

pub static NUM_PROCS: MetricDescriptor =
    MetricDescriptor::base("ecs_num_procs", "Number of processes.");
pub static CPU_TOTAL: MetricDescriptor =
    MetricDescriptor::base("ecs_cpu_total", "Total CPU usage.");
pub static CPU_USER: MetricDescriptor =
    MetricDescriptor::base("ecs_cpu_user", "Total CPU usage by user space.");
pub static CPU_KERNEL: MetricDescriptor =
    MetricDescriptor::base("ecs_cpu_kernel", "Total CPU usage by kernel space.");
pub static CPU_SYSTEM: MetricDescriptor =
    MetricDescriptor::base("ecs_cpu_system", "Total system CPU usage.");
pub static CPU_NUM_ONLINE: MetricDescriptor =
    MetricDescriptor::base("ecs_cpu_num_online", "Number of online CPUs.");
pub static MEM_TOTAL: MetricDescriptor =
    MetricDescriptor::base("ecs_mem_total", "Total memory usage.");
pub static MEM_USAGE: MetricDescriptor =
    MetricDescriptor::base("ecs_mem_usage", "Maximum memory usage.");
pub static MEM_LIMIT: MetricDescriptor = MetricDescriptor::base("ecs_mem_limit", "Memory limit.");
pub static NETWORK_RX_RATE: MetricDescriptor =
    MetricDescriptor::base("ecs_network_rx_rate", "Network received rate per second.");
pub static NETWORK_TX_RATE: MetricDescriptor =
    MetricDescriptor::base("ecs_network_tx_rate", "Network transmitted rate per second.");

pub static NETWORK_RX_BYTES: MetricDescriptor =
    MetricDescriptor::network("ecs_network_rx_bytes", "Network received in bytes.");
pub static NETWORK_RX_PACKETS: MetricDescriptor =
    MetricDescriptor::network("ecs_network_rx_packets", "Network packets received.");
pub static NETWORK_RX_DROPPED: MetricDescriptor = MetricDescriptor::network(
    "ecs_network_rx_dropped",
    "Network packets dropped in receiving.",
);
pub static NETWORK_RX_ERRORS: MetricDescriptor =
    MetricDescriptor::network("ecs_network_rx_errors", "Network errors in receiving.");
pub static NETWORK_TX_BYTES: MetricDescriptor =
    MetricDescriptor::network("ecs_network_tx_bytes", "Network transmitted in bytes.");
pub static NETWORK_TX_PACKETS: MetricDescriptor =
    MetricDescriptor::network("ecs_network_tx_packets", "Network packets transmitted.");
pub static NETWORK_TX_DROPPED: MetricDescriptor = MetricDescriptor::network(
    "ecs_network_tx_dropped",
    "Network packets dropped in transmit.",
);
pub static NETWORK_TX_ERRORS: MetricDescriptor =
    MetricDescriptor::network("ecs_network_tx_errors", "Network errors in transmit.");

/// Container-level metrics and the stats field each one reads.
pub(super) static CONTAINER_METRICS: [(&MetricDescriptor, fn(&ContainerStats) -> f64); 11] = [
    (&NUM_PROCS, |s| s.num_procs),
    (&CPU_TOTAL, |s| s.cpu_stats.cpu_usage.total_usage),
    (&CPU_USER, |s| s.cpu_stats.cpu_usage.usage_in_usermode),
    (&CPU_KERNEL, |s| s.cpu_stats.cpu_usage.usage_in_kernelmode),
    (&CPU_SYSTEM, |s| s.cpu_stats.system_cpu_usage),
    (&CPU_NUM_ONLINE, |s| s.cpu_stats.online_cpus),
    (&MEM_TOTAL, |s| s.memory_stats.usage),
    (&MEM_USAGE, |s| s.memory_stats.max_usage),
    (&MEM_LIMIT, |s| s.memory_stats.limit),
    (&NETWORK_RX_RATE, |s| s.network_rate_stats.rx_bytes_per_sec),
    (&NETWORK_TX_RATE, |s| s.network_rate_stats.tx_bytes_per_sec),
];

/// Per-interface metrics and the counter each one reads.
pub(super) static INTERFACE_METRICS: [(&MetricDescriptor, fn(&NetworkStats) -> f64); 8] = [
    (&NETWORK_RX_BYTES, |n| n.rx_bytes),
    (&NETWORK_RX_PACKETS, |n| n.rx_packets),
    (&NETWORK_RX_DROPPED, |n| n.rx_dropped),
    (&NETWORK_RX_ERRORS, |n| n.rx_errors),
    (&NETWORK_TX_BYTES, |n| n.tx_bytes),
    (&NETWORK_TX_PACKETS, |n| n.tx_packets),
    (&NETWORK_TX_DROPPED, |n| n.tx_dropped),
    (&NETWORK_TX_ERRORS, |n| n.tx_errors),
];

/// Every descriptor this exporter may emit.
pub fn descriptors() -> impl Iterator<Item = &'static MetricDescriptor> {
    CONTAINER_METRICS
        .iter()
        .map(|(desc, _)| *desc)
        .chain(INTERFACE_METRICS.iter().map(|(desc, _)| *desc))
}

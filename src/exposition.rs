//! Prometheus text exposition of [`MetricSample`]s.

use std::collections::HashMap;

use prometheus::{GaugeVec, Opts, Registry, TextEncoder};

use crate::collector::{self, MetricSample};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Renders `samples` in the Prometheus text format.
///
/// A fresh registry is built for every call, so nothing carries over between scrapes.
///
/// # Errors
///
/// Returns an error if a sample's label values do not match its descriptor or if the
/// encoder fails.
pub fn encode_text(samples: &[MetricSample]) -> prometheus::Result<String> {
    let registry = Registry::new();
    let mut gauges = HashMap::new();
    for descriptor in collector::descriptors() {
        let gauge = GaugeVec::new(
            Opts::new(descriptor.name, descriptor.help),
            descriptor.label_names,
        )?;
        registry.register(Box::new(gauge.clone()))?;
        gauges.insert(descriptor.name, gauge);
    }

    for sample in samples {
        let Some(gauge) = gauges.get(sample.descriptor.name) else {
            continue;
        };
        let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        gauge
            .get_metric_with_label_values(values.as_slice())?
            .set(sample.value);
    }

    TextEncoder::new().encode_to_string(&registry.gather())
}

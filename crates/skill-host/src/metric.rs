//! Metric reporting through the `metrics` facade

use crate::message::DataMap;
use crate::services::MetricReporter;
use crate::HostError;
use serde_json::Value;
use tracing::debug;

/// Counter name incremented once per reported metric
pub const SKILL_METRIC_COUNTER: &str = "skill_metric_total";

/// Reports skill metrics as labelled counters on the installed recorder
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterMetricReporter;

impl MetricReporter for CounterMetricReporter {
    fn report_metric(&self, name: &str, data: &DataMap) -> Result<(), HostError> {
        let device = data
            .get("device")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        debug!("Metric {} ({} fields, device {})", name, data.len(), device);
        ::metrics::counter!(SKILL_METRIC_COUNTER, "name" => name.to_string(), "device" => device)
            .increment(1);

        Ok(())
    }
}

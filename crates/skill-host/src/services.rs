//! Host service traits consumed by skills

use crate::message::DataMap;
use crate::HostError;
use serde_json::Value;

/// Renders and speaks a named dialog
pub trait DialogSpeaker: Send + Sync {
    /// Speak `dialog` with template variables from `data`
    fn speak_dialog(&self, dialog: &str, data: &DataMap) -> Result<(), HostError>;
}

/// Skill-owned GUI namespace on the host display
pub trait GuiSurface: Send + Sync {
    /// Set a page variable
    fn set_value(&self, key: &str, value: Value) -> Result<(), HostError>;

    /// Show a page from the skill's UI resources
    fn show_page(&self, page: &str) -> Result<(), HostError>;
}

/// Usage metric sink
pub trait MetricReporter: Send + Sync {
    /// Report a named metric with its data
    fn report_metric(&self, name: &str, data: &DataMap) -> Result<(), HostError>;
}

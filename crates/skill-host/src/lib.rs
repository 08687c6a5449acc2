//! Skill Host Interfaces
//!
//! Everything a skill consumes from the voice-assistant host framework:
//! - Bus messages and the message bus
//! - Dialog speech, GUI paging, and metric reporting
//! - Addressing heuristics ("was the assistant spoken to?")
//! - Skill settings, core device config, and runtime requirements

pub mod address;
pub mod bus;
pub mod console;
pub mod message;
pub mod metric;
pub mod services;
pub mod settings;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use address::{AddressPolicy, ContextAddressPolicy};
pub use bus::{ChannelBus, MessageBus};
pub use console::{LogGui, LogSpeaker};
pub use message::{DataMap, Message};
pub use metric::CounterMetricReporter;
pub use services::{DialogSpeaker, GuiSurface, MetricReporter};
pub use settings::{CoreConfig, RuntimeRequirements, SkillSettings};

use thiserror::Error;

/// Errors raised by host services
#[derive(Error, Debug)]
pub enum HostError {
    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Metric reporting failed: {0}")]
    Metric(String),
}

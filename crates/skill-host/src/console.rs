//! Log-only speech and GUI services for headless runs

use crate::message::DataMap;
use crate::services::{DialogSpeaker, GuiSurface};
use crate::HostError;
use serde_json::Value;
use tracing::info;

/// Logs dialogs instead of speaking them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

impl DialogSpeaker for LogSpeaker {
    fn speak_dialog(&self, dialog: &str, data: &DataMap) -> Result<(), HostError> {
        let data = serde_json::Value::Object(data.clone());
        info!(dialog, %data, "speak");
        Ok(())
    }
}

/// Logs GUI updates instead of rendering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogGui;

impl GuiSurface for LogGui {
    fn set_value(&self, key: &str, value: Value) -> Result<(), HostError> {
        info!(key, %value, "gui value");
        Ok(())
    }

    fn show_page(&self, page: &str) -> Result<(), HostError> {
        info!(page, "gui page");
        Ok(())
    }
}

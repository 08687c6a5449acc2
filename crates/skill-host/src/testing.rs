//! Recording host services for tests

use crate::bus::MessageBus;
use crate::message::{DataMap, Message};
use crate::services::{DialogSpeaker, GuiSurface, MetricReporter};
use crate::HostError;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Bus that keeps every emitted message
#[derive(Debug, Default)]
pub struct RecordingBus {
    emitted: Mutex<Vec<Message>>,
}

impl RecordingBus {
    pub fn emitted(&self) -> Vec<Message> {
        lock(&self.emitted).clone()
    }
}

impl MessageBus for RecordingBus {
    fn emit(&self, message: Message) {
        lock(&self.emitted).push(message);
    }
}

/// Speaker that keeps every `(dialog, data)` pair
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<(String, DataMap)>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<(String, DataMap)> {
        lock(&self.spoken).clone()
    }

    /// Dialog names only, in speaking order
    pub fn dialogs(&self) -> Vec<String> {
        lock(&self.spoken).iter().map(|(d, _)| d.clone()).collect()
    }
}

impl DialogSpeaker for RecordingSpeaker {
    fn speak_dialog(&self, dialog: &str, data: &DataMap) -> Result<(), HostError> {
        lock(&self.spoken).push((dialog.to_string(), data.clone()));
        Ok(())
    }
}

/// GUI that keeps values and shown pages, optionally failing every call
#[derive(Debug, Default)]
pub struct RecordingGui {
    values: Mutex<Vec<(String, Value)>>,
    pages: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingGui {
    pub fn failing() -> Self {
        let gui = Self::default();
        gui.fail.store(true, Ordering::SeqCst);
        gui
    }

    pub fn values(&self) -> Vec<(String, Value)> {
        lock(&self.values).clone()
    }

    pub fn pages(&self) -> Vec<String> {
        lock(&self.pages).clone()
    }
}

impl GuiSurface for RecordingGui {
    fn set_value(&self, key: &str, value: Value) -> Result<(), HostError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(HostError::Gui("display disconnected".to_string()));
        }
        lock(&self.values).push((key.to_string(), value));
        Ok(())
    }

    fn show_page(&self, page: &str) -> Result<(), HostError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(HostError::Gui("display disconnected".to_string()));
        }
        lock(&self.pages).push(page.to_string());
        Ok(())
    }
}

/// Metric sink that records attempts and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    reports: Mutex<Vec<(String, DataMap)>>,
    fail: AtomicBool,
}

impl RecordingMetrics {
    pub fn failing() -> Self {
        let metrics = Self::default();
        metrics.fail.store(true, Ordering::SeqCst);
        metrics
    }

    /// Every attempted report, including failed ones
    pub fn reports(&self) -> Vec<(String, DataMap)> {
        lock(&self.reports).clone()
    }
}

impl MetricReporter for RecordingMetrics {
    fn report_metric(&self, name: &str, data: &DataMap) -> Result<(), HostError> {
        lock(&self.reports).push((name.to_string(), data.clone()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(HostError::Metric("metrics server unreachable".to_string()));
        }
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! Skill settings, core config, and runtime requirements

use serde::{Deserialize, Serialize};

/// Per-skill settings owned by the host settings store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSettings {
    /// Blink the LED ring when the fallback is reached
    pub emit_led: bool,
    /// Show the unmatched utterance on the GUI
    pub show_utterances: bool,
}

/// Host device configuration visible to skills
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Device type reported with metrics (e.g. `pi`, `server`)
    pub dev_type: Option<String>,
}

/// Conditions a skill needs before loading and while running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequirements {
    pub network_before_load: bool,
    pub internet_before_load: bool,
    pub gui_before_load: bool,
    pub requires_internet: bool,
    pub requires_network: bool,
    pub requires_gui: bool,
    /// Stay loaded when the internet drops
    pub no_internet_fallback: bool,
    /// Stay loaded when the network drops
    pub no_network_fallback: bool,
    /// Stay loaded without a GUI
    pub no_gui_fallback: bool,
}

//! Layered configuration (TOML file, then environment)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use skill_host::{CoreConfig, SkillSettings};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "unknown-fallback";
/// Environment prefix, e.g. `UNKNOWN_FALLBACK__SKILL__EMIT_LED=true`
pub const ENV_PREFIX: &str = "UNKNOWN_FALLBACK";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Max log level (`trace`..`error`)
    pub log_level: String,
    /// Skill resource root; defaults to the resources shipped with the fallback crate
    pub resource_root: Option<PathBuf>,
    /// Resource language
    pub lang: String,
    /// Names that mark an utterance as addressed to the assistant
    pub assistant_names: Vec<String>,
    /// Treat every stdin line as addressed
    pub assume_addressed: bool,
    /// Print Prometheus metrics on exit
    pub print_metrics: bool,
    pub skill: SkillSettings,
    pub core: CoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            resource_root: None,
            lang: "en-us".to_string(),
            assistant_names: vec!["neon".to_string()],
            assume_addressed: true,
            print_metrics: false,
            skill: SkillSettings::default(),
            core: CoreConfig::default(),
        }
    }
}

/// Environment source; `ASSISTANT_NAMES` takes a comma-separated list
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("assistant_names")
}

impl AppConfig {
    /// Load from `path` (required) or the default file (optional), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Resource root to read vocabulary from
    pub fn resource_root(&self) -> PathBuf {
        self.resource_root
            .clone()
            .unwrap_or_else(fallback::resource_dir)
    }
}

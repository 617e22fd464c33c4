#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
};

use tracing::Level;

/// File name of the fixture inside the data directory.
pub const FIXTURE_FILE: &str = "release.json";

/// Parses the optional log level environment value, defaulting to
/// `Level::INFO` when unset or unrecognised.
fn parse_log_level(val: Option<String>) -> Level {
    match val
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
        .unwrap_or("info")
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Parses a boolean environment value, falling back to `default` when the
/// variable is missing or not a recognised boolean.
fn read_bool(env: &str, default: bool) -> bool {
    match std::env::var(env)
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        Ok("1" | "true" | "yes") => true,
        Ok("0" | "false" | "no") => false,
        _ => default,
    }
}

/// Runtime configuration shared across the crate.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Directory holding the fixture file.
    data_dir:     PathBuf,
    /// Whether grade indicators are colored.
    color:        bool,
    /// Log level for the CLI.
    log_level:    Level,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn new() -> Self {
        let data_dir = std::env::var("MANUAL_GRADING_DATA_DIR")
            .map(|value| PathBuf::from(value.trim()))
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            data_dir,
            color: read_bool("MANUAL_GRADING_COLOR", true),
            log_level: parse_log_level(std::env::var("MANUAL_GRADING_LOG").ok()),
        }
    }

    /// Returns the path of the fixture file inside the data directory.
    pub fn fixture_path(&self) -> PathBuf {
        self.data_dir.join(FIXTURE_FILE)
    }

    /// Returns whether grade indicators are colored.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Returns the configured log level.
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    /// Returns a copy with the data directory replaced.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Returns a copy with coloring switched on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Returns the active configuration, reading the environment on first use.
pub fn get() -> ConfigHandle {
    let mut guard = slot().lock().expect("config slot poisoned");
    if let Some(cfg) = guard.as_ref() {
        return ConfigHandle(Arc::clone(cfg));
    }

    let cfg = Arc::new(ConfigState::new());
    *guard = Some(Arc::clone(&cfg));
    ConfigHandle(cfg)
}

/// Replaces the active configuration, e.g. after command line overrides.
pub fn set(state: ConfigState) {
    *slot().lock().expect("config slot poisoned") = Some(Arc::new(state));
}

/// Returns the configured fixture path.
pub fn fixture_path() -> PathBuf {
    get().fixture_path()
}

/// Returns whether grade indicators are colored.
pub fn color() -> bool {
    get().color()
}

/// Returns the configured log level.
pub fn log_level() -> Level {
    get().log_level()
}

//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulated backend behaviour.
    pub simulation: SimulationConfig,
    /// Continuous control settings.
    pub controls: ControlsConfig,
    /// Notification tray settings.
    pub notifications: NotificationsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Simulated command transport and device source.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Probability in `0.0..=1.0` that a command is rejected.
    pub failure_rate: f64,
    /// Delay before the device registry is served.
    pub load_delay_ms: u64,
    /// Make the initial load fail.
    pub fail_load: bool,
}

/// Slider behaviour.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Idle window before a slider value is sent.
    pub debounce_ms: u64,
}

/// Notification tray behaviour.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Time a notification stays visible.
    pub ttl_ms: u64,
    /// Events buffered per stream subscriber.
    pub capacity: usize,
}

impl Config {
    /// Load configuration from `homedash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homedash.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMEDASH_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("HOMEDASH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOMEDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("HOMEDASH_FAILURE_RATE") {
            if let Ok(rate) = val.parse() {
                self.simulation.failure_rate = rate;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.simulation.min_latency_ms > self.simulation.max_latency_ms {
            return Err(ConfigError::Validation(
                "min_latency_ms must not exceed max_latency_ms".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.simulation.failure_rate) {
            return Err(ConfigError::Validation(
                "failure_rate must be within 0.0..=1.0".to_string(),
            ));
        }
        if self.notifications.capacity == 0 {
            return Err(ConfigError::Validation(
                "notification capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn min_latency(&self) -> Duration {
        Duration::from_millis(self.min_latency_ms)
    }

    #[must_use]
    pub fn max_latency(&self) -> Duration {
        Duration::from_millis(self.max_latency_ms)
    }

    #[must_use]
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

impl ControlsConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl NotificationsConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedashd=info,homedash_app=info,homedash_adapter_simulated=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: 300,
            max_latency_ms: 800,
            failure_rate: 0.05,
            load_delay_ms: 1500,
            fail_load: false,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 3000,
            capacity: 64,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

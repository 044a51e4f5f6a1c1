//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Main client configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub readiness: ReadinessConfig,
    pub storage: StorageConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Backend API settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://localhost:8080/api`
    pub base_url: Url,
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout_secs: default_request_timeout(),
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of an endpoint. Paths are appended, not resolved, so a base
    /// path such as `/api` is kept.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Origin that serves uploaded media: the base URL without its `/api` segment
    #[must_use]
    pub fn asset_base(&self) -> String {
        self.base_url
            .as_str()
            .trim_end_matches('/')
            .replacen("/api", "", 1)
    }
}

/// Readiness gate timings
#[derive(Debug, Clone)]
pub struct ReadinessConfig {
    pub health_interval_secs: u64,
    pub countdown_secs: u32,
    pub ready_delay_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            health_interval_secs: default_health_interval(),
            countdown_secs: default_countdown(),
            ready_delay_ms: default_ready_delay(),
        }
    }
}

impl ReadinessConfig {
    #[must_use]
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    #[must_use]
    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }
}

/// Local persistence settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub session_file: PathBuf,
}

// Default value functions
fn default_app_name() -> String {
    "blog-client".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_health_interval() -> u64 {
    5
}

fn default_countdown() -> u32 {
    120
}

fn default_ready_delay() -> u64 {
    2000
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./.blog-session.json")
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BLOG_API_BASE_URL").ok_or(ConfigError::MissingVar("BLOG_API_BASE_URL"))?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidValue("BLOG_API_BASE_URL", e.to_string()))?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ApiConfig {
                base_url,
                request_timeout_secs: parse_or(
                    &lookup,
                    "BLOG_REQUEST_TIMEOUT_SECS",
                    default_request_timeout,
                )?,
            },
            readiness: ReadinessConfig {
                health_interval_secs: parse_or(
                    &lookup,
                    "BLOG_HEALTH_INTERVAL_SECS",
                    default_health_interval,
                )?,
                countdown_secs: parse_or(&lookup, "BLOG_COUNTDOWN_SECS", default_countdown)?,
                ready_delay_ms: parse_or(&lookup, "BLOG_READY_DELAY_MS", default_ready_delay)?,
            },
            storage: StorageConfig {
                session_file: lookup("BLOG_SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_session_file),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

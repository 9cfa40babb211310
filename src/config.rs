//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
///
/// Read once at startup and handed to the services that need it; nothing
/// reads the environment after this point.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Provider Credentials ===
    /// Serper search API key. Without it every AQI reading is a fallback.
    #[serde(default)]
    pub serper_api_key: Option<String>,

    /// Gemini API key. Without it advisory text is an error message.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    // === Provider Endpoints ===
    /// Serper search endpoint.
    #[serde(default = "default_serper_url")]
    pub serper_url: String,

    /// Gemini REST base URL.
    #[serde(default = "default_gemini_url")]
    pub gemini_url: String,

    /// Gemini model name.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Timeout applied to every outbound provider call.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Live Feed ===
    /// Seconds between pushes on a pollution stream.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// City used when a request names none.
    #[serde(default = "default_city")]
    pub default_city: String,

    // === Server Configuration ===
    /// Directory holding the static dashboard.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_serper_url() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_city() -> String {
    "Mumbai".to_string()
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serper_api_key: None,
            gemini_api_key: None,
            serper_url: default_serper_url(),
            gemini_url: default_gemini_url(),
            gemini_model: default_gemini_model(),
            http_timeout_ms: default_http_timeout_ms(),
            poll_interval_secs: default_poll_interval_secs(),
            default_city: default_city(),
            frontend_dir: default_frontend_dir(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if matches!(self.serper_api_key.as_deref(), Some(k) if k.trim().is_empty()) {
            return Err("SERPER_API_KEY cannot be empty if provided".to_string());
        }

        if matches!(self.gemini_api_key.as_deref(), Some(k) if k.trim().is_empty()) {
            return Err("GEMINI_API_KEY cannot be empty if provided".to_string());
        }

        for (name, value) in [("SERPER_URL", &self.serper_url), ("GEMINI_URL", &self.gemini_url)] {
            let url = Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(format!("{name} must be an HTTP or HTTPS URL"));
            }
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.poll_interval_secs == 0 {
            return Err("POLL_INTERVAL_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Validate, converting failures into [`AppError::InvalidConfig`].
    pub fn ensure_valid(&self) -> crate::Result<()> {
        self.validate().map_err(AppError::InvalidConfig)
    }

    /// Outbound request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Interval between pushes on a live stream.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Whether live AQI lookups are possible.
    pub fn has_search_key(&self) -> bool {
        self.serper_api_key.is_some()
    }

    /// Whether advisory text generation is possible.
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.default_city, "Mumbai");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert!(!config.has_search_key());
        assert!(!config.has_gemini_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_search_key() {
        let config = Config {
            serper_api_key: Some("   ".to_string()),
            ..Config::default()
        };

        assert!(config.validate().is_err());
        assert!(matches!(config.ensure_valid(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = Config {
            gemini_url: "ftp://example.com".to_string(),
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("GEMINI_URL"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_from_env_pairs() {
        let vars = vec![
            ("SERPER_API_KEY".to_string(), "serper-key".to_string()),
            ("POLL_INTERVAL_SECS".to_string(), "60".to_string()),
            ("PORT".to_string(), "9000".to_string()),
        ];

        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.serper_api_key.as_deref(), Some("serper-key"));
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.port, 9000);
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.serper_url, "https://google.serper.dev/search");
    }
}

//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log lines
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "perflib-exporter".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: perflib-exporter)
    /// - `PERFLIB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `PERFLIB_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `PERFLIB_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "perflib-exporter".to_string()),

            log_level: lookup("PERFLIB_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("PERFLIB_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("PERFLIB_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "perflib-exporter");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_level_prefers_perflib_variable() {
        let config = TelemetryConfig::from_vars(|key| match key {
            "PERFLIB_LOG_LEVEL" => Some("debug".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_container_defaults_to_json() {
        let config = TelemetryConfig::from_vars(|key| {
            (key == "KUBERNETES_SERVICE_HOST").then(|| "10.0.0.1".to_string())
        });
        assert!(config.json_logs);

        let config = TelemetryConfig::from_vars(|key| match key {
            "DOCKER_CONTAINER" => Some("1".to_string()),
            "PERFLIB_JSON_LOGS" => Some("false".to_string()),
            "PERFLIB_CONSOLE_OUTPUT" => Some("0".to_string()),
            _ => None,
        });
        assert!(!config.json_logs);
        assert!(!config.console_output);
    }
}

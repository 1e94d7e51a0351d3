//! Reduction configuration
//!
//! The disallowed-ID list and strict flag are owned by whatever loads the
//! exporter configuration. This module reads them from the environment or
//! a TOML file and shares them with guarded queries through
//! [`ReductionPolicy`].
//!
//! # Config File Format
//!
//! ```toml
//! strict = true
//! disallowed_ids = [238, 2]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PERFLIB_STRICT` | `true` | Apply the disallowed list to query results |
//! | `PERFLIB_DISALLOWED_IDS` | unset | Comma or whitespace separated name indices |

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConfigError;

/// Environment variable holding the strict flag
pub const STRICT_ENV: &str = "PERFLIB_STRICT";

/// Environment variable holding the disallowed name indices
pub const DISALLOWED_IDS_ENV: &str = "PERFLIB_DISALLOWED_IDS";

/// Reduction settings for one collector.
///
/// `disallowed_ids` distinguishes "not configured" (`None`) from
/// "configured but empty" (`Some(vec![])`). Both remove nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionConfig {
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default)]
    pub disallowed_ids: Option<Vec<u32>>,
}

fn default_strict() -> bool {
    true
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            disallowed_ids: None,
        }
    }
}

impl ReductionConfig {
    /// Create a configuration from explicit values
    pub fn new(strict: bool, disallowed_ids: Option<Vec<u32>>) -> Self {
        Self {
            strict,
            disallowed_ids,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Malformed values never fail: an unparsable strict flag keeps the
    /// default and unparsable IDs are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let strict = match lookup(STRICT_ENV) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Ignoring malformed {}", STRICT_ENV);
                default_strict()
            }),
            None => default_strict(),
        };

        let disallowed_ids = lookup(DISALLOWED_IDS_ENV).map(|raw| parse_id_list(&raw));

        Self {
            strict,
            disallowed_ids,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Disallowed IDs as a borrowed slice, if configured
    pub fn disallowed(&self) -> Option<&[u32]> {
        self.disallowed_ids.as_deref()
    }
}

/// Parse a list such as `"238, 2 4"` into name indices.
///
/// Tokens that are not `u32` are logged and skipped.
pub fn parse_id_list(raw: &str) -> Vec<u32> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<u32>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(token, error = %e, "Skipping malformed disallowed object id");
                None
            }
        })
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for ReductionConfig
#[derive(Default)]
pub struct ReductionConfigBuilder {
    strict: Option<bool>,
    disallowed_ids: Option<Vec<u32>>,
}

impl ReductionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strict flag
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Add one disallowed name index
    pub fn disallow(mut self, id: u32) -> Self {
        self.disallowed_ids.get_or_insert_with(Vec::new).push(id);
        self
    }

    /// Replace the disallowed list
    pub fn disallowed_ids(mut self, ids: Vec<u32>) -> Self {
        self.disallowed_ids = Some(ids);
        self
    }

    pub fn build(self) -> ReductionConfig {
        ReductionConfig {
            strict: self.strict.unwrap_or_else(default_strict),
            disallowed_ids: self.disallowed_ids,
        }
    }
}

/// Shared, live-updatable reduction settings.
///
/// Cloning shares the same settings. Guarded queries hold the read lock
/// while filtering, so updates made by the configuration loader wait for
/// any in-flight reduction and apply from the next query on.
#[derive(Clone, Debug, Default)]
pub struct ReductionPolicy {
    inner: Arc<RwLock<ReductionConfig>>,
}

impl ReductionPolicy {
    pub fn new(config: ReductionConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> ReductionConfig {
        self.inner.read().clone()
    }

    pub fn is_strict(&self) -> bool {
        self.inner.read().strict
    }

    pub fn set_strict(&self, strict: bool) {
        self.inner.write().strict = strict;
    }

    /// Replace the disallowed list; `None` means not configured.
    pub fn set_disallowed_ids(&self, ids: Option<Vec<u32>>) {
        tracing::info!(count = ids.as_ref().map(Vec::len), "Disallowed object ids updated");
        self.inner.write().disallowed_ids = ids;
    }

    pub fn clear_disallowed_ids(&self) {
        self.set_disallowed_ids(None);
    }

    /// Run `f` against the current settings under the read lock.
    pub fn with_config<R>(&self, f: impl FnOnce(&ReductionConfig) -> R) -> R {
        f(&*self.inner.read())
    }
}

impl From<ReductionConfig> for ReductionPolicy {
    fn from(config: ReductionConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ReductionConfig::default();
        assert!(config.strict);
        assert_eq!(config.disallowed_ids, None);
    }

    #[test]
    fn test_from_vars_unset() {
        let config = ReductionConfig::from_vars(vars(&[]));
        assert_eq!(config, ReductionConfig::default());
    }

    #[test]
    fn test_from_vars_empty_list_is_configured() {
        let config = ReductionConfig::from_vars(vars(&[(DISALLOWED_IDS_ENV, "")]));
        assert_eq!(config.disallowed_ids, Some(vec![]));
    }

    #[test]
    fn test_from_vars_parses_values() {
        let config = ReductionConfig::from_vars(vars(&[
            (STRICT_ENV, "false"),
            (DISALLOWED_IDS_ENV, "238, 2 4"),
        ]));
        assert!(!config.strict);
        assert_eq!(config.disallowed_ids, Some(vec![238, 2, 4]));
    }

    #[test]
    fn test_from_vars_malformed_degrades() {
        let config = ReductionConfig::from_vars(vars(&[
            (STRICT_ENV, "maybe"),
            (DISALLOWED_IDS_ENV, "12,abc,-1,99999999999,7"),
        ]));
        assert!(config.strict);
        assert_eq!(config.disallowed_ids, Some(vec![12, 7]));
    }

    #[test]
    fn test_from_toml() {
        let config = ReductionConfig::from_toml_str("strict = false\ndisallowed_ids = [238, 2]\n")
            .expect("valid toml");
        assert!(!config.strict);
        assert_eq!(config.disallowed(), Some(&[238, 2][..]));
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = ReductionConfig::from_toml_str("").expect("empty toml");
        assert_eq!(config, ReductionConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let result = ReductionConfig::from_toml_str("disallowed_ids = \"238\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_builder() {
        let config = ReductionConfigBuilder::new()
            .strict(false)
            .disallow(1)
            .disallow(2)
            .build();
        assert!(!config.strict);
        assert_eq!(config.disallowed_ids, Some(vec![1, 2]));

        assert_eq!(ReductionConfigBuilder::new().build(), ReductionConfig::default());
    }

    #[test]
    fn test_policy_updates_are_shared() {
        let policy = ReductionPolicy::new(ReductionConfig::default());
        let other = policy.clone();

        other.set_strict(false);
        other.set_disallowed_ids(Some(vec![9]));

        assert!(!policy.is_strict());
        assert_eq!(policy.snapshot().disallowed_ids, Some(vec![9]));

        policy.clear_disallowed_ids();
        assert_eq!(other.with_config(|c| c.disallowed_ids.clone()), None);
    }
}

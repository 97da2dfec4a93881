//! Dispatcher configuration, validation, and error types.
//!
//! [`ManagerConfig`] is the construction input for a
//! [`Manager`](crate::Manager). It can be built in code, parsed from
//! camelCase JSON, or seeded from the environment.

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that turns on mutation checking in
/// [`ManagerConfig::from_env`].
pub const CHECK_MUTATIONS_ENV: &str = "RIPPLE_CHECK_MUTATIONS";

/// Default bound on undo history.
pub const DEFAULT_ACTION_QUEUE_SIZE: usize = 100;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a [`ManagerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// History capacity must be at least one entry.
    #[error("actionQueueSize must be at least 1")]
    ZeroQueueSize,
    /// The JSON form could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── ManagerConfig ──────────────────────────────────────────────────

/// Configuration for a [`Manager`](crate::Manager).
///
/// # Examples
///
/// ```
/// use ripple_engine::ManagerConfig;
///
/// let config = ManagerConfig::from_json(r#"{"actionQueueSize": 25}"#).unwrap();
/// assert_eq!(config.action_queue_size, 25);
/// assert!(!config.check_mutations);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Maximum number of actions kept for undo. Default: 100.
    pub action_queue_size: usize,
    /// Snapshot the graph after every dispatch and verify it before the
    /// next one. O(state size) per dispatch; meant for debug and test
    /// builds. Default: false.
    pub check_mutations: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            action_queue_size: DEFAULT_ACTION_QUEUE_SIZE,
            check_mutations: false,
        }
    }
}

impl ManagerConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_queue_size == 0 {
            return Err(ConfigError::ZeroQueueSize);
        }
        Ok(())
    }

    /// Parse and validate a camelCase JSON object. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, with mutation checking enabled when
    /// [`CHECK_MUTATIONS_ENV`] is `1`, `true` or `yes`.
    pub fn from_env() -> Self {
        let flag = std::env::var(CHECK_MUTATIONS_ENV).ok();
        Self {
            check_mutations: flag.as_deref().is_some_and(is_truthy),
            ..Self::default()
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

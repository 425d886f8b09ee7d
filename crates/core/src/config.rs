//! Gate configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default freshness window for cached verification decisions.
pub const DEFAULT_VERIFY_TTL_SECS: u64 = 300;

/// Default XP credited per kill.
pub const DEFAULT_XP_PER_KILL: u32 = 10;

/// Configuration for the log-webhook gate service.
///
/// The deployment path is environment variables (the service historically
/// ran entirely env-driven); a JSON file is supported for local runs and
/// tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Base URL of the backend persistence/RPC service.
    pub backend_url: String,
    /// Bearer token for backend calls.
    #[serde(default)]
    pub backend_token: Option<String>,
    /// Shared secret expected in the webhook's `token` query parameter.
    /// When unset, the admission check is skipped.
    #[serde(default)]
    pub shared_token: Option<String>,
    /// URL shown to kicked players in the "verify at ..." message.
    pub verify_url: String,
    /// One-shot console endpoint used to eject players.
    #[serde(default)]
    pub console_url: Option<String>,
    /// Password for the console endpoint.
    #[serde(default)]
    pub console_password: Option<String>,
    /// Verification fallback when the backend is unreachable:
    /// true allows, false (default) denies.
    #[serde(default)]
    pub fail_open: bool,
    /// Freshness window for cached verification decisions, in seconds.
    #[serde(default = "default_verify_ttl")]
    pub verify_ttl_secs: u64,
    /// XP credited to the killer per kill line.
    #[serde(default = "default_xp_per_kill")]
    pub xp_per_kill: u32,
    /// Timeout applied to backend and console calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Optional cap on cached verification entries; unset keeps the cache
    /// unbounded for the process lifetime.
    #[serde(default)]
    pub max_cache_entries: Option<usize>,
    /// Match identifier forwarded with XP and kill records.
    #[serde(default)]
    pub match_id: u64,
}

fn default_verify_ttl() -> u64 {
    DEFAULT_VERIFY_TTL_SECS
}

fn default_xp_per_kill() -> u32 {
    DEFAULT_XP_PER_KILL
}

fn default_request_timeout() -> u64 {
    5
}

impl GateConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Build configuration from process environment variables.
    ///
    /// Recognized: `BACKEND_URL`, `BACKEND_TOKEN`, `SHARED_TOKEN`,
    /// `VERIFY_URL`, `CONSOLE_URL`, `CONSOLE_PASSWORD`, `FAIL_OPEN`,
    /// `VERIFY_TTL_SECS`, `XP_PER_KILL`, `REQUEST_TIMEOUT_SECS`,
    /// `MAX_CACHE_ENTRIES`, `MATCH_ID`. Unset variables keep defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("BACKEND_URL") {
            config.backend_url = v;
        }
        if let Ok(v) = std::env::var("BACKEND_TOKEN") {
            config.backend_token = Some(v);
        }
        if let Ok(v) = std::env::var("SHARED_TOKEN") {
            config.shared_token = Some(v);
        }
        if let Ok(v) = std::env::var("VERIFY_URL") {
            config.verify_url = v;
        }
        if let Ok(v) = std::env::var("CONSOLE_URL") {
            config.console_url = Some(v);
        }
        if let Ok(v) = std::env::var("CONSOLE_PASSWORD") {
            config.console_password = Some(v);
        }
        if let Ok(v) = std::env::var("FAIL_OPEN") {
            config.fail_open = matches!(v.as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = env_parse("VERIFY_TTL_SECS") {
            config.verify_ttl_secs = v;
        }
        if let Some(v) = env_parse("XP_PER_KILL") {
            config.xp_per_kill = v;
        }
        if let Some(v) = env_parse("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = v;
        }
        if let Some(v) = env_parse("MAX_CACHE_ENTRIES") {
            config.max_cache_entries = Some(v);
        }
        if let Some(v) = env_parse("MATCH_ID") {
            config.match_id = v;
        }
        config
    }

    /// Set the shared webhook token
    pub fn with_shared_token(mut self, token: impl Into<String>) -> Self {
        self.shared_token = Some(token.into());
        self
    }

    /// Set the verification fallback policy
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }

    /// Set the freshness window
    pub fn with_verify_ttl(mut self, secs: u64) -> Self {
        self.verify_ttl_secs = secs;
        self
    }

    /// Cap the verification cache
    pub fn with_max_cache_entries(mut self, max: usize) -> Self {
        self.max_cache_entries = Some(max);
        self
    }

    /// Freshness window as a `Duration`
    pub fn verify_ttl(&self) -> Duration {
        Duration::from_secs(self.verify_ttl_secs)
    }

    /// Backend/console call timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8080".to_string(),
            backend_token: None,
            shared_token: None,
            verify_url: "https://example.invalid/verify".to_string(),
            console_url: None,
            console_password: None,
            fail_open: false,
            verify_ttl_secs: DEFAULT_VERIFY_TTL_SECS,
            xp_per_kill: DEFAULT_XP_PER_KILL,
            request_timeout_secs: default_request_timeout(),
            max_cache_entries: None,
            match_id: 0,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

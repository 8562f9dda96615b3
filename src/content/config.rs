//! Client configuration
//!
//! `ConfigOverrides` carries the values a caller chooses explicitly; anything
//! left as `None` is resolved from the `UMBRACO_*` environment variables, then
//! from built-in defaults. Resolution happens once, producing an immutable
//! `ClientConfig` that the client never re-reads.

use tracing::warn;

/// Default content delivery host
pub const DEFAULT_API_URL: &str = "https://cdn.umbraco.io";

/// Default freshness window for cached records, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

pub const ENV_PROJECT_ALIAS: &str = "UMBRACO_PROJECT_ALIAS";
pub const ENV_API_KEY: &str = "UMBRACO_API_KEY";
pub const ENV_API_URL: &str = "UMBRACO_API_URL";
pub const ENV_ENABLED: &str = "UMBRACO_ENABLED";
pub const ENV_CACHE_TTL: &str = "UMBRACO_CACHE_TTL";
pub const ENV_FALLBACK_ENABLED: &str = "UMBRACO_FALLBACK_ENABLED";

/// Explicitly supplied configuration values; `None` means "use the default"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub project_alias: Option<String>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub enabled: Option<bool>,
    pub cache_ttl_secs: Option<u64>,
    pub fallback_enabled: Option<bool>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Heartcore project alias, sent as `Umb-Project-Alias`
    pub project_alias: String,
    /// Delivery API key, sent as `Api-Key`
    pub api_key: String,
    /// API host without a trailing slash
    pub api_url: String,
    /// When false every fetch fails before touching the network
    pub enabled: bool,
    /// How long a cached record is served without refetching
    pub cache_ttl_secs: u64,
    /// Serve stale cache entries when the upstream request fails
    pub fallback_enabled: bool,
}

impl ClientConfig {
    /// Creates a configuration with explicit credentials and default settings
    ///
    /// Does not consult the environment.
    pub fn new(project_alias: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_alias: project_alias.into(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            enabled: true,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fallback_enabled: true,
        }
    }

    /// Override the API host
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = normalize_url(api_url.into());
        self
    }

    /// Override the cache TTL in seconds
    pub fn with_cache_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.cache_ttl_secs = ttl_secs;
        self
    }

    /// Enable or disable the client
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable or disable stale-cache fallback
    pub fn with_fallback_enabled(mut self, fallback_enabled: bool) -> Self {
        self.fallback_enabled = fallback_enabled;
        self
    }

    /// Resolves overrides against the process environment
    pub fn from_env(overrides: ConfigOverrides) -> Self {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves overrides against an arbitrary variable lookup
    ///
    /// Explicit values always win. Boolean flags are only turned off by the
    /// literal `false` (any case); the TTL falls back to the default when the
    /// variable is not a non-negative integer.
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_alias = overrides
            .project_alias
            .or_else(|| lookup(ENV_PROJECT_ALIAS))
            .unwrap_or_default();

        let api_key = overrides
            .api_key
            .or_else(|| lookup(ENV_API_KEY))
            .unwrap_or_default();

        let api_url = overrides
            .api_url
            .or_else(|| lookup(ENV_API_URL))
            .map(normalize_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let enabled = overrides
            .enabled
            .unwrap_or_else(|| flag_enabled(lookup(ENV_ENABLED)));

        let cache_ttl_secs = overrides
            .cache_ttl_secs
            .unwrap_or_else(|| parse_ttl(lookup(ENV_CACHE_TTL)));

        let fallback_enabled = overrides
            .fallback_enabled
            .unwrap_or_else(|| flag_enabled(lookup(ENV_FALLBACK_ENABLED)));

        Self {
            project_alias,
            api_key,
            api_url,
            enabled,
            cache_ttl_secs,
            fallback_enabled,
        }
    }

    /// True when both the project alias and API key are non-empty
    pub fn has_credentials(&self) -> bool {
        !self.project_alias.is_empty() && !self.api_key.is_empty()
    }
}

fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn flag_enabled(value: Option<String>) -> bool {
    !matches!(value, Some(v) if v.trim().eq_ignore_ascii_case("false"))
}

fn parse_ttl(value: Option<String>) -> u64 {
    match value {
        None => DEFAULT_CACHE_TTL_SECS,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(
                value = %raw,
                default = DEFAULT_CACHE_TTL_SECS,
                "Invalid {}, using default",
                ENV_CACHE_TTL
            );
            DEFAULT_CACHE_TTL_SECS
        }),
    }
}

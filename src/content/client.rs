//! Heartcore Content Delivery API client
//!
//! Fetches content records by content type, caches single-record lookups in
//! memory, and serves stale cache entries when the API is unavailable.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::{ClientConfig, ConfigOverrides};
use super::defaults::{default_home_page, HOME_PAGE_TYPE};
use super::{ContentRecord, QueryOptions};
use crate::cache::CacheManager;

/// Upper bound on a single API request, including reading the body
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Content type alias of the platform configuration documents
pub const PLATFORM_CONFIG_TYPE: &str = "platformConfig";

const PROJECT_ALIAS_HEADER: &str = "Umb-Project-Alias";
const API_KEY_HEADER: &str = "Api-Key";

/// Broad classification of a `ContentError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client is disabled or missing credentials
    Configuration,
    /// The request failed or the API answered with something unusable
    Fetch,
    /// The API answered, but had no record of the requested type
    NotFound,
}

/// Errors that can occur when fetching content
#[derive(Debug, Error)]
pub enum ContentError {
    /// The client was configured as disabled
    #[error("Content client is disabled")]
    Disabled,

    /// Project alias or API key is empty
    #[error("Project alias and API key are required")]
    MissingCredentials,

    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response contained no content record
    #[error("No content found for type: {0}")]
    NotFound(String),
}

impl ContentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Disabled | ContentError::MissingCredentials => ErrorKind::Configuration,
            ContentError::RequestFailed(_)
            | ContentError::HttpStatus { .. }
            | ContentError::ParseError(_) => ErrorKind::Fetch,
            ContentError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Whether a stale cache entry may be served in place of this error
    pub fn allows_fallback(&self) -> bool {
        self.kind() == ErrorKind::Fetch
    }

    /// The upstream HTTP status, when the API answered with one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ContentError::HttpStatus { status, .. } => Some(*status),
            ContentError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }
}

/// Builds the cache key for a content type and its query options
///
/// The options are rendered as a compact JSON object in key order, so the
/// same type and options always yield the same key.
pub fn cache_key(content_type: &str, options: &QueryOptions) -> String {
    let encoded: serde_json::Map<String, Value> = options
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    format!("{}:{}", content_type, Value::Object(encoded))
}

/// Response envelope of the content delivery API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
}

/// The `_embedded` object; `content` is kept loose so a non-array is not a parse error
#[derive(Debug, Default, Deserialize)]
struct Embedded {
    #[serde(default)]
    content: Value,
}

impl ApiResponse {
    fn content(&self) -> Option<&Vec<Value>> {
        self.embedded.as_ref().and_then(|e| e.content.as_array())
    }

    /// Returns the first record of `_embedded.content`, if it is an object
    fn first_record(&self) -> Option<ContentRecord> {
        self.content()
            .and_then(|items| items.first())
            .and_then(Value::as_object)
            .cloned()
    }

    /// Returns every object in `_embedded.content`
    ///
    /// A missing or non-array field yields an empty list.
    fn into_records(self) -> Vec<ContentRecord> {
        match self.embedded.map(|e| e.content) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Client for fetching content from the Heartcore Content Delivery API
#[derive(Debug)]
pub struct ContentClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Resolved configuration, fixed at construction
    config: ClientConfig,
    /// Single-record lookups keyed by `cache_key`
    cache: CacheManager<ContentRecord>,
}

impl ContentClient {
    /// Creates a client with a 5 second request timeout
    pub fn new(config: ClientConfig) -> Result<Self, ContentError> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(config, http_client))
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(config: ClientConfig, http_client: Client) -> Self {
        let cache = CacheManager::with_ttl_secs(config.cache_ttl_secs);
        Self {
            http_client,
            config,
            cache,
        }
    }

    /// Creates a client configured entirely from `UMBRACO_*` variables
    pub fn from_env() -> Result<Self, ContentError> {
        Self::new(ClientConfig::from_env(ConfigOverrides::default()))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn ensure_ready(&self) -> Result<(), ContentError> {
        if !self.config.enabled {
            return Err(ContentError::Disabled);
        }
        if !self.config.has_credentials() {
            return Err(ContentError::MissingCredentials);
        }
        Ok(())
    }

    fn content_url(&self, content_type: &str) -> String {
        format!(
            "{}/{}/content/type/{}",
            self.config.api_url, self.config.project_alias, content_type
        )
    }

    /// Fetches the first record of a content type
    ///
    /// # Arguments
    /// * `content_type` - Content type alias, e.g. `homePage`
    /// * `options` - Query parameters forwarded to the API
    ///
    /// # Behavior
    /// - Fails with a configuration error if the client is disabled or has no credentials
    /// - Returns a fresh cache entry without touching the network
    /// - Otherwise requests the API and caches the first record
    /// - On a failed request, returns the cached record even if expired, when fallback is enabled
    /// - An empty response is `NotFound` and is never replaced by cached data
    pub async fn fetch_content(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> Result<ContentRecord, ContentError> {
        self.ensure_ready()?;

        let key = cache_key(content_type, options);
        let cached = self.cache.read(&key);

        if let Some(ref entry) = cached {
            if !entry.is_expired {
                debug!(content_type, "Serving content from cache");
                return Ok(entry.data.clone());
            }
        }

        let body = match self.request(content_type, options).await {
            Ok(body) => body,
            Err(err) => {
                if self.config.fallback_enabled {
                    if let Some(entry) = cached {
                        warn!(
                            content_type,
                            error = %err,
                            cached_at = %entry.cached_at,
                            "Content API unavailable, serving expired cache"
                        );
                        return Ok(entry.data);
                    }
                }
                return Err(err);
            }
        };

        let record = body
            .first_record()
            .ok_or_else(|| ContentError::NotFound(content_type.to_string()))?;

        self.cache.write(&key, record.clone());
        Ok(record)
    }

    /// Fetches every record of a content type
    ///
    /// List results are neither cached nor replaced by cached data.
    pub async fn fetch_content_list(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> Result<Vec<ContentRecord>, ContentError> {
        self.ensure_ready()?;

        let body = self.request(content_type, options).await?;
        Ok(body.into_records())
    }

    /// Fetches the home page record
    pub async fn fetch_home_page(&self) -> Result<ContentRecord, ContentError> {
        self.fetch_content(HOME_PAGE_TYPE, &QueryOptions::new()).await
    }

    /// Fetches the home page, substituting the built-in default on any error
    pub async fn fetch_home_page_or_default(&self) -> ContentRecord {
        match self.fetch_home_page().await {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "Using default home page content");
                default_home_page()
            }
        }
    }

    /// Fetches platform configurations in ascending sort order
    pub async fn fetch_platform_configs(&self) -> Result<Vec<ContentRecord>, ContentError> {
        let mut options = QueryOptions::new();
        options.insert("sort".to_string(), "sortOrder:asc".to_string());
        self.fetch_content_list(PLATFORM_CONFIG_TYPE, &options).await
    }

    /// Removes every cached record
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached records, fresh or expired
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Sends one GET request and parses the JSON body
    async fn request(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> Result<ApiResponse, ContentError> {
        let url = self.content_url(content_type);
        debug!(url = %url, ?options, "Requesting content");

        let mut request = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(PROJECT_ALIAS_HEADER, self.config.project_alias.as_str())
            .header(API_KEY_HEADER, self.config.api_key.as_str());

        if !options.is_empty() {
            request = request.query(options);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ContentError::HttpStatus { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

//! Command-line interface parsing for the Heartcore client
//!
//! This module handles parsing of CLI arguments using clap, mapping global
//! flags onto `ConfigOverrides` and dispatching subcommands to the client.

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::content::{ConfigOverrides, ContentClient, ContentError, QueryOptions};

/// Error types for CLI argument parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// A `--query` value was not of the form KEY=VALUE
    #[error("Invalid query: '{0}'. Expected KEY=VALUE")]
    InvalidQuery(String),
}

/// Heartcore - fetch content from the Umbraco Heartcore delivery API
///
/// Settings not given on the command line are read from UMBRACO_PROJECT_ALIAS,
/// UMBRACO_API_KEY, UMBRACO_API_URL, UMBRACO_ENABLED, UMBRACO_CACHE_TTL and
/// UMBRACO_FALLBACK_ENABLED.
#[derive(Parser, Debug)]
#[command(name = "heartcore")]
#[command(about = "Fetch content from the Umbraco Heartcore delivery API")]
#[command(version)]
pub struct Cli {
    /// Heartcore project alias
    #[arg(long, global = true, value_name = "ALIAS")]
    pub project_alias: Option<String>,

    /// Content Delivery API key
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API host, e.g. https://cdn.umbraco.io
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds a fetched record is served from cache
    #[arg(long, global = true, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Fail instead of serving stale cached content when the API errors
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Disable the client; every fetch fails without a request
    #[arg(long, global = true)]
    pub disabled: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to fetch
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the first record of a content type
    Get {
        /// Content type alias
        content_type: String,
        /// Query parameter, repeatable
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_query_arg)]
        query: Vec<(String, String)>,
    },
    /// Print every record of a content type
    List {
        /// Content type alias
        content_type: String,
        /// Query parameter, repeatable
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_query_arg)]
        query: Vec<(String, String)>,
    },
    /// Print the home page, or the built-in default if it cannot be fetched
    Home,
    /// Print the platform configurations
    Platforms,
}

/// Parses a `KEY=VALUE` query argument
///
/// The value may be empty and may itself contain `=`; the key may not be empty.
pub fn parse_query_arg(s: &str) -> Result<(String, String), CliError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidQuery(s.to_string())),
    }
}

impl Cli {
    /// Configuration values given explicitly on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            project_alias: self.project_alias.clone(),
            api_key: self.api_key.clone(),
            api_url: self.api_url.clone(),
            enabled: self.disabled.then_some(false),
            cache_ttl_secs: self.cache_ttl,
            fallback_enabled: self.no_fallback.then_some(false),
        }
    }
}

impl Command {
    /// Query parameters of the subcommand; later duplicates win
    pub fn query_options(&self) -> QueryOptions {
        match self {
            Command::Get { query, .. } | Command::List { query, .. } => {
                query.iter().cloned().collect()
            }
            Command::Home | Command::Platforms => QueryOptions::new(),
        }
    }
}

/// Runs a subcommand against the client and returns the JSON to print
pub async fn execute(client: &ContentClient, command: &Command) -> Result<Value, ContentError> {
    let value = match command {
        Command::Get { content_type, .. } => {
            Value::Object(client.fetch_content(content_type, &command.query_options()).await?)
        }
        Command::List { content_type, .. } => {
            let records = client
                .fetch_content_list(content_type, &command.query_options())
                .await?;
            Value::Array(records.into_iter().map(Value::Object).collect())
        }
        Command::Home => Value::Object(client.fetch_home_page_or_default().await),
        Command::Platforms => {
            let records = client.fetch_platform_configs().await?;
            Value::Array(records.into_iter().map(Value::Object).collect())
        }
    };
    Ok(value)
}

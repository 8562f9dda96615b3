//! Heartcore client library
//!
//! A cached, fallback-aware client for the Umbraco Heartcore Content Delivery
//! API, plus the CLI pieces used by the `heartcore` binary.

pub mod cache;
pub mod cli;
pub mod content;
pub mod logging;

pub use content::{
    default_home_page, ClientConfig, ConfigOverrides, ContentClient, ContentError, ContentRecord,
    ErrorKind, QueryOptions,
};

//! Heartcore content delivery client
//!
//! This module contains the client used to fetch content records from the
//! Umbraco Heartcore Content Delivery API, its configuration, and the built-in
//! default content served when the API cannot be reached.

pub mod client;
pub mod config;
pub mod defaults;

use std::collections::BTreeMap;

pub use client::{cache_key, ContentClient, ContentError, ErrorKind};
pub use config::{ClientConfig, ConfigOverrides};
pub use defaults::default_home_page;

/// A single content document as returned by the API
///
/// Content types are defined per project, so records are kept as open JSON
/// objects rather than mapped onto fixed structs.
pub type ContentRecord = serde_json::Map<String, serde_json::Value>;

/// Query parameters sent with a content request
///
/// A sorted map, so that equal option sets always serialize identically.
pub type QueryOptions = BTreeMap<String, String>;

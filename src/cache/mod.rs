//! Cache module for holding API responses in memory
//!
//! This module provides a cache manager that keeps fetched content in a
//! process-local map with a configurable TTL (time-to-live). It supports
//! graceful degradation by returning expired entries with an `is_expired`
//! flag, allowing the client to serve stale data when the API is unavailable.

mod manager;

pub use manager::{CacheManager, CachedData};

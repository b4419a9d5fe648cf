#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Structured `Cache-Control` directives for requests and responses.
pub mod cache_control;
/// Freshness lifetime and age math.
pub mod freshness;
/// Lenient header value parsing.
pub mod parse;
/// The request as the cache sees it.
pub mod request;
/// The stored response record.
pub mod response;
/// The decision engine.
pub mod strategy;
/// Validator snapshots and conditional requests.
pub mod validators;

pub use cache_control::{CacheControl, CacheControlBuilder};
pub use request::{CacheRequest, CacheRequestBuilder};
pub use response::{CachedResponse, CachedResponseBuilder};
pub use strategy::{CacheStrategy, StrategyFactory, is_cacheable};
pub use validators::{Validators, conditional_request};

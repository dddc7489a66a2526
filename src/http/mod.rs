//! HTTP client module
//!
//! Provides the HTTP client used for every backend call.
//!
//! # Features
//!
//! - **Base URL**: relative paths are joined onto the configured API root
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Static bearer token from the auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

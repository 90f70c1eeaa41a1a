//! Middleware modules for rate limiting

pub mod rate_limit;

pub use rate_limit::{RateLimitConfig, RateLimitLayer};

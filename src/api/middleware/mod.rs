//! HTTP middleware applied to every route.
//!
//! Provides per-IP rate limiting and request tracing.

pub mod rate_limit;
pub mod tracing;

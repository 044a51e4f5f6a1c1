//! # blog-api
//!
//! HTTP client for the blog backend. `ApiClient` implements the gateway
//! traits from blog-core, so services never see reqwest or status codes.

pub mod client;
pub mod dto;
pub mod endpoints;

pub use client::{ApiClient, RequestOptions};
pub use endpoints::{display_url, HEALTH_UNAVAILABLE, NO_FILES_PROVIDED};

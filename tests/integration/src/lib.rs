//! Integration test utilities for the blog client
//!
//! This crate provides a mocked backend and helpers for running the services
//! end to end over real HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

//! Core traits, types, and error handling for stashbot-tools.
//!
//! This crate provides the foundational abstractions used across all stashbot components.

pub mod error;
pub mod executor;

pub use error::{Error, Result};
pub use executor::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse};

//! Bitbucket Server provider implementation for stashbot-tools.
//!
//! This crate provides integration with the Bitbucket Server (Stash)
//! REST API v1.0 for pull requests, comments, and review tasks.

mod client;
mod executor;
mod types;

pub use client::BitbucketClient;
pub use executor::ReqwestExecutor;
pub use types::*;

/// Path prefix shared by every Bitbucket Server REST v1.0 endpoint.
pub const API_PREFIX: &str = "/rest/api/1.0";

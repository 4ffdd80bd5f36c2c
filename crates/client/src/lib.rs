//! HTTP client for the profile backend.
//!
//! Provides [`ProfilesApi`], a thin [`reqwest`]-based wrapper around
//! the REST contract, and [`ClientConfig`] for resolving the base URL
//! from the environment.

pub mod api;
pub mod config;

pub use api::ProfilesApi;
pub use config::ClientConfig;

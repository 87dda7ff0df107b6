//! HTTP client for the hosted-database control-plane API.

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::{ApiError, Result};

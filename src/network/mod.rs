//! HTTP networking module
//!
//! Provides HTTP client functionality for talking to the knowledge-base API.

mod client;

pub use client::{ApiRequest, ApiResponse, HttpClient, HttpMethod};

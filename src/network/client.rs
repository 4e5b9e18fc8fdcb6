//! HTTP client for making requests to the knowledge-base API

use crate::config::{ApiSettings, OutgoingSettings};
use crate::error::ApiError;
use anyhow::Result;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP request to be issued against the knowledge-base API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// JSON body
    pub json: Option<serde_json::Value>,
    /// Read timeout override for this request
    pub read_timeout: Option<Duration>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            params: HashMap::new(),
            json: None,
            read_timeout: None,
        }
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            params: HashMap::new(),
            json: None,
            read_timeout: None,
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Set the read timeout for this request
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP response from an API request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ApiResponse {
    /// Parse response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx response into its status error
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }
}

/// HTTP client wrapper carrying the bearer token and timeout defaults
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    bearer_token: String,
    default_read_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client from settings
    pub fn with_settings(outgoing: &OutgoingSettings, api: &ApiSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(outgoing.connect_timeout())
            .gzip(true);

        if !outgoing.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            bearer_token: api.api_key.clone(),
            default_read_timeout: outgoing.read_timeout(),
        })
    }

    /// Execute an API request
    ///
    /// The bearer token is attached to every request. Any non-2xx status is
    /// still returned as `Ok`; use [`ApiResponse::error_for_status`] to turn
    /// it into an error.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(request.read_timeout.unwrap_or(self.default_read_timeout))
            .bearer_auth(&self.bearer_token);

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(ref body) = request.json {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Read the response into an [`ApiResponse`]
    async fn parse_response(response: Response) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ApiResponse { status, text, url })
    }
}

//! Request execution and outcome normalization

use super::models::{DocumentRequest, SearchRequest};
use crate::config::Settings;
use crate::envelope::{CollectionsEnvelope, DocumentEnvelope, SearchEnvelope};
use crate::error::ApiError;
use crate::network::{ApiRequest, HttpClient};
use crate::retry::{with_backoff, RetrySchedule};
use anyhow::Result;
use serde_json::Value;
use tracing::{error, info};

/// Executor for the knowledge-base tool operations
///
/// Owns the HTTP client and configuration; each operation is stateless and
/// independent, so one instance can serve concurrent invocations.
pub struct KnowledgeBase {
    /// HTTP client for making requests
    client: HttpClient,
    /// Injected configuration
    settings: Settings,
    /// Backoff schedule for the search operation
    schedule: RetrySchedule,
}

impl KnowledgeBase {
    /// Create a new executor from settings
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let client = HttpClient::with_settings(&settings.outgoing, &settings.api)?;
        let schedule = settings.retry.schedule();

        Ok(Self {
            client,
            settings,
            schedule,
        })
    }

    /// Search the knowledge base for documents relevant to a query
    ///
    /// Transient failures (timeouts, HTTP 5xx/408/429) are retried on the
    /// configured backoff schedule; any other failure aborts immediately.
    /// Every outcome, success or failure, is returned as an envelope.
    pub async fn search(&self, request: SearchRequest) -> SearchEnvelope {
        if let Err(err) = request.validate() {
            return SearchEnvelope::failure(request.query, None, err.to_string());
        }

        info!(
            "Searching '{}' in collection '{}' (top_k={}, score_threshold={})",
            request.query,
            request.collection_name,
            request.effective_top_k(),
            request.effective_score_threshold()
        );

        let body = request.body();
        let url = self.settings.api.endpoint("api/search");

        let outcome = with_backoff(&self.schedule, "search", || {
            let api_request = ApiRequest::post(url.as_str())
                .json(body.clone())
                .read_timeout(self.settings.outgoing.read_timeout());
            async move { self.client.execute(api_request).await?.error_for_status() }
        })
        .await;

        match outcome.and_then(|response| response.json::<Value>()) {
            Ok(data) => {
                let documents = data
                    .get("documents")
                    .and_then(|d| d.as_array())
                    .cloned()
                    .unwrap_or_default();

                info!("Search returned {} results", documents.len());

                SearchEnvelope::success(request.query, request.collection_name, documents)
            }
            Err(err) => {
                error!("Search failed: {}", err);
                SearchEnvelope::failure(
                    request.query,
                    Some(request.collection_name),
                    err.to_string(),
                )
            }
        }
    }

    /// Fetch a single document by id
    ///
    /// Single attempt; transient failures are not retried here.
    pub async fn get_document(&self, request: DocumentRequest) -> DocumentEnvelope {
        if let Err(err) = request.validate() {
            return DocumentEnvelope::invalid(err.to_string());
        }

        info!(
            "Fetching document '{}' from collection '{}'",
            request.document_id, request.collection_name
        );

        let api_request = ApiRequest::get(self.settings.api.endpoint(&format!(
            "api/document/{}",
            urlencoding::encode(&request.document_id)
        )))
        .param("collection", &request.collection_name)
        .read_timeout(self.settings.outgoing.read_timeout());

        match self.fetch_json(api_request).await {
            Ok(document) => {
                info!("Fetched document '{}'", request.document_id);
                DocumentEnvelope::success(document)
            }
            Err(err) => {
                error!("Document fetch failed: {}", err);
                DocumentEnvelope::failure(
                    request.document_id,
                    request.collection_name,
                    err.to_string(),
                )
            }
        }
    }

    /// List the available knowledge-base collections
    pub async fn list_collections(&self) -> CollectionsEnvelope {
        info!("Listing collections");

        let api_request = ApiRequest::get(self.settings.api.endpoint("api/collections"))
            .read_timeout(self.settings.outgoing.list_timeout());

        match self.fetch_json(api_request).await {
            Ok(data) => {
                let collections = data
                    .get("collections")
                    .and_then(|c| c.as_array())
                    .cloned()
                    .unwrap_or_default();

                info!("Found {} collections", collections.len());

                CollectionsEnvelope::success(collections)
            }
            Err(err) => {
                error!("Collection listing failed: {}", err);
                CollectionsEnvelope::failure(err.to_string())
            }
        }
    }

    /// Issue a single request and parse the body as JSON
    async fn fetch_json(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let response = self.client.execute(request).await?.error_for_status()?;
        response.json()
    }
}

//! Request parameter models with validation and clamping

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Collection searched when the caller does not name one
pub const DEFAULT_COLLECTION: &str = "default";

/// Smallest number of results a search may request
pub const MIN_TOP_K: i64 = 1;

/// Largest number of results a search may request
pub const MAX_TOP_K: i64 = 20;

/// Parameters for a knowledge-base search
///
/// Out-of-range `top_k` and `score_threshold` values are coerced into their
/// valid bounds when the outbound body is built, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query
    pub query: String,
    /// Collection to search
    pub collection_name: String,
    /// Maximum number of results to return
    pub top_k: i64,
    /// Minimum relevance score, 0 to 1
    pub score_threshold: f64,
}

impl SearchRequest {
    /// Create a search request with default collection and limits
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            collection_name: DEFAULT_COLLECTION.to_string(),
            top_k: 5,
            score_threshold: 0.7,
        }
    }

    /// Set the collection to search
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    /// Set the maximum number of results
    pub fn top_k(mut self, top_k: i64) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the minimum relevance score
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Reject queries that are empty after trimming whitespace
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.query.trim().is_empty() {
            return Err(ApiError::InvalidInput("Query cannot be empty"));
        }
        Ok(())
    }

    /// `top_k` coerced into its valid range
    pub fn effective_top_k(&self) -> i64 {
        self.top_k.clamp(MIN_TOP_K, MAX_TOP_K)
    }

    /// `score_threshold` coerced into its valid range
    pub fn effective_score_threshold(&self) -> f64 {
        self.score_threshold.clamp(0.0, 1.0)
    }

    /// JSON body for the outbound search call, with clamped values
    pub fn body(&self) -> serde_json::Value {
        json!({
            "query": self.query,
            "collection_name": self.collection_name,
            "top_k": self.effective_top_k(),
            "score_threshold": self.effective_score_threshold(),
        })
    }
}

/// Parameters for fetching a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Unique identifier of the document
    pub document_id: String,
    /// Collection the document lives in
    pub collection_name: String,
}

impl DocumentRequest {
    /// Create a document request against the default collection
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            collection_name: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Set the collection the document lives in
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    /// Reject ids that are empty after trimming whitespace
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.document_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("Document ID cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("warranty policy");
        assert_eq!(request.collection_name, DEFAULT_COLLECTION);
        assert_eq!(request.top_k, 5);
        assert_eq!(request.score_threshold, 0.7);
    }

    #[test]
    fn test_top_k_clamping() {
        assert_eq!(SearchRequest::new("q").top_k(0).effective_top_k(), 1);
        assert_eq!(SearchRequest::new("q").top_k(-5).effective_top_k(), 1);
        assert_eq!(SearchRequest::new("q").top_k(5).effective_top_k(), 5);
        assert_eq!(SearchRequest::new("q").top_k(20).effective_top_k(), 20);
        assert_eq!(SearchRequest::new("q").top_k(100).effective_top_k(), 20);
    }

    #[test]
    fn test_score_threshold_clamping() {
        let request = SearchRequest::new("q").score_threshold(-0.5);
        assert_eq!(request.effective_score_threshold(), 0.0);

        let request = SearchRequest::new("q").score_threshold(0.7);
        assert_eq!(request.effective_score_threshold(), 0.7);

        let request = SearchRequest::new("q").score_threshold(1.5);
        assert_eq!(request.effective_score_threshold(), 1.0);
    }

    #[test]
    fn test_body_carries_clamped_values() {
        let body = SearchRequest::new("q")
            .collection("docs")
            .top_k(50)
            .score_threshold(2.0)
            .body();
        assert_eq!(body["query"], "q");
        assert_eq!(body["collection_name"], "docs");
        assert_eq!(body["top_k"], 20);
        assert_eq!(body["score_threshold"], 1.0);
    }

    #[test]
    fn test_query_validation() {
        assert!(SearchRequest::new("q").validate().is_ok());
        assert!(SearchRequest::new("").validate().is_err());
        assert!(SearchRequest::new("   ").validate().is_err());

        let err = SearchRequest::new("\t\n").validate().unwrap_err();
        assert_eq!(err.to_string(), "Query cannot be empty");
    }

    #[test]
    fn test_document_id_validation() {
        assert!(DocumentRequest::new("doc-1").validate().is_ok());
        assert!(DocumentRequest::new("").validate().is_err());

        let err = DocumentRequest::new("  ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Document ID cannot be empty");
    }
}

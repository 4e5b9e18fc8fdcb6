//! Uniform result envelopes returned to the tool transport
//!
//! Every operation resolves to exactly one of these shapes, success or
//! failure alike. Callers branch on `success` and never see an error type;
//! `payload()` yields the serialized JSON text that crosses the tool
//! boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result envelope for a knowledge-base search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    /// The original query, echoed back unmodified
    pub query: String,
    /// Collection that was searched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Matching documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,
    /// Number of documents in `results`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    /// Successful search with its matching documents
    pub fn success(query: impl Into<String>, collection: impl Into<String>, results: Vec<Value>) -> Self {
        let count = results.len();
        Self {
            success: true,
            query: query.into(),
            collection: Some(collection.into()),
            results: Some(results),
            count: Some(count),
            error: None,
        }
    }

    /// Failed search; `collection` is absent for validation failures
    pub fn failure(
        query: impl Into<String>,
        collection: Option<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            query: query.into(),
            collection,
            results: None,
            count: None,
            error: Some(error.into()),
        }
    }

    /// Serialized JSON text for the tool transport
    pub fn payload(&self) -> String {
        serialize_payload(self)
    }
}

/// Result envelope for a document fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub success: bool,
    /// The fetched document, verbatim from the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentEnvelope {
    /// Successful fetch
    pub fn success(document: Value) -> Self {
        Self {
            success: true,
            document: Some(document),
            document_id: None,
            collection_name: None,
            error: None,
        }
    }

    /// Validation failure; carries no request context
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            success: false,
            document: None,
            document_id: None,
            collection_name: None,
            error: Some(error.into()),
        }
    }

    /// Request failure, echoing back which document was asked for
    pub fn failure(
        document_id: impl Into<String>,
        collection_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            document: None,
            document_id: Some(document_id.into()),
            collection_name: Some(collection_name.into()),
            error: Some(error.into()),
        }
    }

    /// Serialized JSON text for the tool transport
    pub fn payload(&self) -> String {
        serialize_payload(self)
    }
}

/// Result envelope for a collection listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsEnvelope {
    pub success: bool,
    /// Available collections with their metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionsEnvelope {
    /// Successful listing
    pub fn success(collections: Vec<Value>) -> Self {
        Self {
            success: true,
            collections: Some(collections),
            error: None,
        }
    }

    /// Failed listing
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            collections: None,
            error: Some(error.into()),
        }
    }

    /// Serialized JSON text for the tool transport
    pub fn payload(&self) -> String {
        serialize_payload(self)
    }
}

/// Serialize an envelope, falling back to a fixed failure shape
///
/// The envelopes above only hold JSON-representable values, so the fallback
/// should never be reached; it exists so the operation boundary can stay
/// panic-free.
fn serialize_payload<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| r#"{"success":false,"error":"failed to serialize envelope"}"#.to_string())
}

//! Knowledge-base tool operations
//!
//! Builds and issues the outbound API calls for the three tools (search,
//! document fetch, collection listing) and wraps every outcome into a
//! result envelope.

mod executor;
mod models;

pub use executor::KnowledgeBase;
pub use models::{DocumentRequest, SearchRequest, DEFAULT_COLLECTION, MAX_TOP_K, MIN_TOP_K};

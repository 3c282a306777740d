//! Question models shared by the store, the provider client, and the API.

use serde::{Deserialize, Serialize};

/// A question that survived deduplication and was persisted.
///
/// Rows are append-only: once inserted they are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuestion {
    /// Locally assigned sequential identifier; the highest value marks the
    /// most recently stored question.
    pub id: i64,
    /// Identifier assigned by the upstream provider; the dedup key.
    pub external_id: i64,
    pub question: String,
    pub answer: String,
    /// Creation timestamp reported by the provider, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_created_at: Option<String>,
    /// When this service persisted the row (RFC 3339, UTC).
    pub stored_at: String,
}

/// One item decoded from the provider response.
///
/// Persisted only if it survives the dedup filter; unknown provider fields
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchedCandidate {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for POST /questions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    pub questions_number: i64,
}

/// Response body for POST /questions.
///
/// `previous` is the question stored immediately before this request's
/// batch, or null when the store was empty at the start of the request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousQuestion {
    pub previous: Option<StoredQuestion>,
}

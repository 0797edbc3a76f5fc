//! Wire types shared between the proxy, the gateway client, and the
//! retrieval backend.
//!
//! Field names follow the backend JSON exactly: document-level fields are
//! snake_case, filter/metadata fields are camelCase. Stay consistent with
//! the backend contract rather than normalizing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filters::SearchFilters;

/// One node in the equipment hierarchy (location → line → equipment1 →
/// equipment2 → equipment3). Fetched once per session and read-only
/// thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Node id, also the filter value for this level.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Child nodes, one level deeper.
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// A leaf node with no children.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), children: Vec::new() }
    }
}

/// Inclusive year range, as supplied by metadata or selected as a filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
    /// Result count cap. The backend default applies when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

/// One search hit as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub doc_id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Cosine similarity in `0.0..=1.0`.
    pub score: f64,
    /// UI-facing relevance, 0-100. Supplied independently of `score` and
    /// absent for legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub snippet: String,
    /// Occurrence timestamp, ISO 8601.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub machine: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Matched field name → per-field score.
    #[serde(default)]
    pub match_fields: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_replaced: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl SearchResult {
    /// Relevance to display, 0-100. Prefers the backend-supplied
    /// `confidence`; legacy records without one fall back to the rounded
    /// similarity score.
    pub fn display_confidence(&self) -> u8 {
        match self.confidence {
            Some(confidence) => confidence,
            None => (self.score * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }
}

/// Body of the `POST /api/search` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    /// Backend processing time in milliseconds.
    #[serde(rename = "processingTime", default)]
    pub processing_time: u64,
}

/// Full document as returned by `GET /api/docs/{doc_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDetail {
    pub doc_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub chunks: Vec<DocumentChunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_replaced: Option<String>,
}

/// One embedding-sized slice of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    pub chunk_id: String,
    pub text: String,
    /// Zero-based position within the source document.
    pub chunk_index: usize,
    pub source_doc_id: String,
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub doc_id: String,
    /// 1-5.
    pub rating: u8,
    pub helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

/// Everything the filter panel needs, from `GET /api/search/metadata`.
/// The flat per-level lists back up the cascade when `hierarchy` is
/// missing; with a hierarchy present the cascade derives options itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterMetadata {
    pub categories: Vec<String>,
    pub work_types: Vec<String>,
    pub production_lines: Vec<String>,
    pub equipment1s: Vec<String>,
    pub equipment2s: Vec<String>,
    pub equipment3s: Vec<String>,
    pub year_range: YearRange,
    pub total_documents: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Vec<HierarchyNode>>,
}

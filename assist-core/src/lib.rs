//! Domain model for AssistChat, a search UI over an external retrieval
//! backend.
//!
//! This crate provides:
//! - Wire types matching the backend JSON contract
//! - Filter selection state with cascading parent→child resets
//! - The cascade engine deriving selectable values per hierarchy level
//! - The uniform error shape shared by transport and backend failures
//! - Label badge lookups and date/text display helpers
//!
//! No I/O lives here; the `assist-chat` crate owns the gateway client and
//! the proxy server.

pub mod cascade;
pub mod error;
pub mod filters;
pub mod labels;
pub mod protocol;
pub mod util;

pub use cascade::{Level, available_at, available_options};
pub use error::ApiError;
pub use filters::{FilterChange, SearchFilters, selection};
pub use protocol::{
    DocumentChunk, DocumentDetail, FeedbackRequest, FeedbackResponse, FilterMetadata,
    HierarchyNode, SearchRequest, SearchResponse, SearchResult, YearRange,
};

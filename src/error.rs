//! Error taxonomy for the ranking pipeline.
//!
//! Storage failures on advisory paths (impression lookup, exposure
//! writes) are logged and swallowed by the feed assembler; only the
//! interaction-history read is load-bearing enough to fail a request.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

//! # swipehire-core - candidate ranking and feed-filtering engine
//!
//! Core of a two-sided student/job swipe marketplace. Given a viewer
//! (a student, or a recruiter-owned job posting) and a pre-fetched pool
//! of candidate items, the engine:
//!
//! - excludes ineligible or already-seen items ([`filters`])
//! - scores the rest on skill overlap, lexical similarity, eligibility,
//!   and recency, with a bounded novelty bonus ([`scoring`], [`tfidf`],
//!   [`similarity`])
//! - blends the ranked list with controlled tail exploration and a
//!   per-organization diversity cap ([`feed`])
//! - enforces a per-viewer daily like quota ([`quota`])
//! - records exposure through a storage collaborator so future scoring
//!   is session-aware ([`store`])
//!
//! Authentication, CRUD, scheduling, email, and the HTTP surface are
//! external collaborators: they call [`feed::build_feed`] and consume
//! the returned [`FeedPage`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swipehire_core::{build_feed, EntityKind, FeedConfig, FeedRequest, MemoryStore, Profile};
//!
//! # async fn example(viewer: Profile, pool: Vec<Profile>) {
//! let store = MemoryStore::new();
//! let page = build_feed(
//!     &store,
//!     &viewer,
//!     EntityKind::Job,
//!     pool,
//!     &FeedRequest::default(),
//!     &FeedConfig::default(),
//! )
//! .await
//! .unwrap();
//! println!("{} candidates, {} likes left", page.items.len(), page.remaining_likes);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod filters;
pub mod logging;
pub mod quota;
pub mod scoring;
pub mod similarity;
pub mod store;
pub mod tfidf;
pub mod types;

pub use config::FeedConfig;
pub use error::{FeedError, StoreError};
pub use feed::build_feed;
pub use filters::{filter_candidates, filter_candidates_with_cooldown};
pub use quota::{daily_like_count, remaining_likes, remaining_likes_default};
pub use scoring::{score_candidate, ScoringWeights};
pub use similarity::{cosine_similarity, jaccard_similarity};
pub use store::{FeedStore, MemoryStore};
pub use tfidf::{text_similarity, tokenize, vectorize, Document, Vocabulary};
pub use types::{
    EntityKind, ExposureRecord, FeedPage, FeedRequest, InteractionRecord, Profile,
    ScoreBreakdown, ScoredCandidate, Stage,
};

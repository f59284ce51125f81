//! Common Types and Constants
//!
//! Shared data structures used across the ranking pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Daily cap on positive swipe actions
pub const DEFAULT_DAILY_LIKE_LIMIT: u32 = 30;

/// Days a dislike keeps a candidate out of the feed
pub const DISLIKE_COOLDOWN_DAYS: i64 = 7;

/// Impression count below which the novelty bonus applies
pub const NOVELTY_IMPRESSION_THRESHOLD: u32 = 20;

/// Additive score boost for under-exposed candidates
pub const NOVELTY_BONUS: f64 = 0.05;

/// Fraction of the ranked list handed to random exploration
pub const DEFAULT_EXPLORATION_RATIO: f64 = 0.2;

/// Default cap on candidates sharing one organization per page
pub const DEFAULT_MAX_PER_ORG: usize = 3;

/// Upper bound accepted for `FeedRequest::page_size`
pub const MAX_PAGE_SIZE: u32 = 50;

/// Freshness decay half-life in days
pub const FRESHNESS_HALF_LIFE_DAYS: f64 = 7.0;

/// Freshness score floor and ceiling
pub const FRESHNESS_MIN: f64 = 0.7;
pub const FRESHNESS_MAX: f64 = 1.2;

// ==================== Entities ====================

/// Which side of the marketplace an entity lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Job,
    Student,
}

/// Swipe action stage; a later record supersedes an earlier one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Dislike = -1,
    Like = 1,
    Superlike = 2,
}

impl Stage {
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Positive stages count toward the daily quota and mark a candidate as seen
    pub fn is_positive(self) -> bool {
        self.value() >= 0
    }
}

/// A student profile or job posting, reduced to the fields the ranker reads.
/// Immutable for the duration of a scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    /// Authoring user; used for self-match prevention
    pub owner_id: String,
    /// Organization behind the item, when known; drives the diversity cap
    pub org: Option<String>,
    pub skills: Vec<String>,
    /// Headline/description concatenation used for lexical scoring
    pub free_text: String,
    /// Batch/year gate; `None` = open to all
    pub eligibility_key: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// One recorded swipe. Append-only; the latest record per
/// (viewer, entity) pair governs filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub from_viewer: String,
    pub to_entity: EntityKind,
    pub to_id: String,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
}

/// One feed impression. Written once per (viewer, entity, day).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureRecord {
    pub viewer_id: String,
    pub entity: EntityKind,
    pub entity_id: String,
    pub shown_at: DateTime<Utc>,
}

// ==================== Scoring Output ====================

/// Per-factor score decomposition returned alongside the final score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills_score: f64,
    pub text_score: f64,
    pub eligibility_score: f64,
    pub freshness_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub novelty_bonus: Option<f64>,
}

/// Ephemeral scoring result; produced and consumed within one feed request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub item: Profile,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

// ==================== Feed Envelope ====================

/// Pagination and exploration parameters supplied by the HTTP layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub page: u32,
    pub page_size: u32,
    pub exploration_ratio: f64,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            exploration_ratio: DEFAULT_EXPLORATION_RATIO,
        }
    }
}

/// One ranked page plus the signals the client needs to gate actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<ScoredCandidate>,
    pub remaining_likes: u32,
    pub has_more: bool,
    /// Set when the pool ran dry; an empty feed is a normal terminal
    /// state, not an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

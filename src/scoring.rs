//! Weighted multi-factor candidate scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::similarity::jaccard_similarity;
use crate::tfidf::{text_similarity, Vocabulary};
use crate::types::{
    Profile, ScoreBreakdown, ScoredCandidate, FRESHNESS_HALF_LIFE_DAYS, FRESHNESS_MAX,
    FRESHNESS_MIN, NOVELTY_BONUS, NOVELTY_IMPRESSION_THRESHOLD,
};

/// Relative weights of the four scoring factors. Callers may override
/// but must keep a consistent scale; the defaults sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub skills: f64,
    pub text: f64,
    pub eligibility: f64,
    pub freshness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.55,
            text: 0.20,
            eligibility: 0.15,
            freshness: 0.10,
        }
    }
}

/// Binary batch/year gate: open on either side always passes.
pub fn eligibility_score(viewer: &Profile, candidate: &Profile) -> f64 {
    match (viewer.eligibility_key, candidate.eligibility_key) {
        (Some(viewer_key), Some(candidate_key)) if viewer_key != candidate_key => 0.0,
        _ => 1.0,
    }
}

/// Exponential recency decay with a 7-day half-life, clamped to
/// [0.7, 1.2]. A candidate created now scores exp(0) = 1.0; anything
/// 30+ days old sits on the floor.
pub fn freshness_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days_since_created = (now - created_at).num_seconds() as f64 / 86_400.0;
    (-days_since_created / FRESHNESS_HALF_LIFE_DAYS)
        .exp()
        .clamp(FRESHNESS_MIN, FRESHNESS_MAX)
}

/// Score one candidate for one viewer. Pure; no side effects.
///
/// The text factor uses a vocabulary the caller built over the current
/// batch (viewer plus all candidates under consideration).
pub fn score_candidate(
    viewer: &Profile,
    candidate: &Profile,
    impression_count: u32,
    vocabulary: &Vocabulary,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> ScoredCandidate {
    let skills_score = jaccard_similarity(&viewer.skills, &candidate.skills);
    let text_score = text_similarity(&viewer.free_text, &candidate.free_text, vocabulary);
    let eligibility = eligibility_score(viewer, candidate);
    let freshness = freshness_score(candidate.created_at, now);

    let novelty_bonus = if impression_count < NOVELTY_IMPRESSION_THRESHOLD {
        NOVELTY_BONUS
    } else {
        0.0
    };

    let base_score = weights.skills * skills_score
        + weights.text * text_score
        + weights.eligibility * eligibility
        + weights.freshness * freshness;

    ScoredCandidate {
        item: candidate.clone(),
        score: base_score + novelty_bonus,
        breakdown: ScoreBreakdown {
            skills_score,
            text_score,
            eligibility_score: eligibility,
            freshness_score: freshness,
            novelty_bonus: (novelty_bonus > 0.0).then_some(novelty_bonus),
        },
    }
}

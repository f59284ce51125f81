//! Property-Based Tests for the ranking primitives
//!
//! Invariants covered:
//! - Jaccard: symmetric, bounded in [0, 1], 1.0 on identical sets
//! - TF-IDF: vectors deterministic across vocabulary rebuilds
//! - Freshness: bounded in [0.7, 1.2] for any age
//! - Final score: bounded given default weights
//! - Quota: remaining likes never negative, dislikes never counted

use chrono::{Duration, Utc};
use proptest::prelude::*;

use swipehire_core::quota::{daily_like_count, remaining_likes};
use swipehire_core::scoring::{freshness_score, score_candidate, ScoringWeights};
use swipehire_core::similarity::jaccard_similarity;
use swipehire_core::tfidf::{vectorize, Document, Vocabulary};
use swipehire_core::types::{EntityKind, InteractionRecord, Profile, Stage};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_skill() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "rust", "python", "react", "node.js", "sql", "docker", "kubernetes", "go", "java",
        "typescript",
    ])
    .prop_map(|s| s.to_string())
}

fn arb_skills() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_skill(), 0..6)
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "backend", "frontend", "engineer", "senior", "junior", "data", "platform",
            "distributed", "systems", "intern",
        ]),
        0..8,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_profile(id: &'static str) -> impl Strategy<Value = Profile> {
    (arb_skills(), arb_text(), prop::option::of(2020i32..2030)).prop_map(
        move |(skills, free_text, eligibility_key)| Profile {
            id: id.to_string(),
            owner_id: format!("owner-{id}"),
            org: None,
            skills,
            free_text,
            eligibility_key,
            created_at: Utc::now(),
        },
    )
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(vec![Stage::Dislike, Stage::Like, Stage::Superlike])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn jaccard_is_symmetric_and_bounded(a in arb_skills(), b in arb_skills()) {
        let ab = jaccard_similarity(&a, &b);
        let ba = jaccard_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn jaccard_identical_sets_score_one(a in arb_skills()) {
        prop_assert_eq!(jaccard_similarity(&a, &a), 1.0);
    }

    #[test]
    fn tfidf_vectors_deterministic(texts in prop::collection::vec(arb_text(), 1..6)) {
        let documents: Vec<Document> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Document { id: format!("d{i}"), text: text.clone() })
            .collect();
        let vocab_a = Vocabulary::build(&documents);
        let vocab_b = Vocabulary::build(&documents);
        for text in &texts {
            prop_assert_eq!(vectorize(text, &vocab_a), vectorize(text, &vocab_b));
        }
    }

    #[test]
    fn freshness_always_bounded(age_hours in -1000i64..100_000) {
        let now = Utc::now();
        let created_at = now - Duration::hours(age_hours);
        let score = freshness_score(created_at, now);
        prop_assert!((0.7..=1.2).contains(&score));
    }

    #[test]
    fn final_score_bounded_with_default_weights(
        viewer in arb_profile("viewer"),
        candidate in arb_profile("candidate"),
        impressions in 0u32..100,
    ) {
        let documents = vec![
            Document { id: viewer.id.clone(), text: viewer.free_text.clone() },
            Document { id: candidate.id.clone(), text: candidate.free_text.clone() },
        ];
        let vocabulary = Vocabulary::build(&documents);
        let scored = score_candidate(
            &viewer,
            &candidate,
            impressions,
            &vocabulary,
            &ScoringWeights::default(),
            Utc::now(),
        );

        // Upper bound: every factor at its ceiling plus the bonus
        // (0.55 + 0.20 + 0.15 + 0.10 * 1.2 + 0.05).
        prop_assert!(scored.score >= 0.0);
        prop_assert!(scored.score <= 1.07 + 1e-9);
        prop_assert!((0.0..=1.0).contains(&scored.breakdown.skills_score));
        prop_assert!((0.0..=1.0).contains(&scored.breakdown.text_score));
    }

    #[test]
    fn quota_never_negative_and_ignores_dislikes(
        stages in prop::collection::vec(arb_stage(), 0..60),
        limit in 1u32..50,
    ) {
        let now = Utc::now();
        let history: Vec<InteractionRecord> = stages
            .iter()
            .enumerate()
            .map(|(i, stage)| InteractionRecord {
                from_viewer: "v".to_string(),
                to_entity: EntityKind::Job,
                to_id: format!("e{i}"),
                stage: *stage,
                created_at: now,
            })
            .collect();

        let count = daily_like_count(&history, now);
        let positives = stages.iter().filter(|s| s.is_positive()).count() as u32;
        prop_assert_eq!(count, positives);
        prop_assert_eq!(remaining_likes(&history, now, limit), limit.saturating_sub(count));
    }
}

//! Feed assembly: filter, score, explore/exploit, diversity, exposure.

use std::cmp::Ordering;

use chrono::Utc;
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::filters::filter_candidates_with_cooldown;
use crate::quota::remaining_likes;
use crate::scoring::score_candidate;
use crate::store::FeedStore;
use crate::tfidf::{Document, Vocabulary};
use crate::types::{EntityKind, FeedPage, FeedRequest, Profile, ScoredCandidate, MAX_PAGE_SIZE};

const NO_MORE_MESSAGE: &str = "no more candidates";

/// Produce one ranked feed page for a viewer.
///
/// Runs the full pipeline: history filter, per-batch vocabulary
/// rebuild, multi-factor scoring, tail exploration, per-organization
/// diversity cap, pagination, exposure write-back. An empty pool is a
/// normal terminal state and returns an empty page with a message,
/// never an error.
pub async fn build_feed<S: FeedStore>(
    store: &S,
    viewer: &Profile,
    target: EntityKind,
    pool: Vec<Profile>,
    request: &FeedRequest,
    config: &FeedConfig,
) -> Result<FeedPage, FeedError> {
    validate_request(request)?;

    let now = Utc::now();
    debug!(
        viewer_id = %viewer.id,
        pool_size = pool.len(),
        page = request.page,
        "building feed"
    );

    // History is load-bearing: without it disliked or already-liked
    // candidates would resurface, so a read failure fails the request.
    let history = store.interactions_from(&viewer.id).await?;
    let likes_left = remaining_likes(&history, now, config.daily_like_limit);

    let filtered = filter_candidates_with_cooldown(
        viewer,
        pool,
        &history,
        target,
        now,
        config.cooldown_days,
    );
    if filtered.is_empty() {
        return Ok(FeedPage {
            items: vec![],
            remaining_likes: likes_left,
            has_more: false,
            message: Some(NO_MORE_MESSAGE.to_string()),
        });
    }

    // The vocabulary is a property of this batch: viewer text plus
    // every surviving candidate's text, rebuilt per request.
    let mut documents = vec![Document {
        id: viewer.id.clone(),
        text: viewer.free_text.clone(),
    }];
    documents.extend(filtered.iter().map(|candidate| Document {
        id: candidate.id.clone(),
        text: candidate.free_text.clone(),
    }));
    let vocabulary = Vocabulary::build(&documents);

    let candidate_ids: Vec<String> = filtered.iter().map(|c| c.id.clone()).collect();
    let impressions = match store.impression_counts(target, &candidate_ids).await {
        Ok(counts) => counts,
        Err(err) => {
            // Advisory telemetry: treat every candidate as unseen.
            warn!(error = %err, "impression lookup failed, defaulting counts to zero");
            Default::default()
        }
    };

    let mut scored: Vec<ScoredCandidate> = filtered
        .iter()
        .map(|candidate| {
            let impression_count = impressions.get(&candidate.id).copied().unwrap_or(0);
            score_candidate(
                viewer,
                candidate,
                impression_count,
                &vocabulary,
                &config.weights,
                now,
            )
        })
        .collect();

    // Stable sort: ties keep insertion order, no secondary key.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    apply_exploration(&mut scored, request.exploration_ratio, config.shuffle_seed);
    let capped = apply_org_diversity(scored, config.max_per_org);

    let total = capped.len();
    let items = paginate(capped, request.page, request.page_size);
    let has_more = (request.page as usize) * (request.page_size as usize) < total;

    let exposure_results = join_all(
        items
            .iter()
            .map(|scored| store.record_exposure(&viewer.id, target, &scored.item.id)),
    )
    .await;
    for (result, scored) in exposure_results.iter().zip(items.iter()) {
        if let Err(err) = result {
            warn!(entity_id = %scored.item.id, error = %err, "exposure write failed");
        }
    }

    info!(
        viewer_id = %viewer.id,
        returned = items.len(),
        total_ranked = total,
        remaining_likes = likes_left,
        "feed built"
    );

    let message = items.is_empty().then(|| NO_MORE_MESSAGE.to_string());
    Ok(FeedPage {
        items,
        remaining_likes: likes_left,
        has_more,
        message,
    })
}

fn validate_request(request: &FeedRequest) -> Result<(), FeedError> {
    if request.page < 1 {
        return Err(FeedError::InvalidRequest("page must be >= 1".to_string()));
    }
    if request.page_size < 1 || request.page_size > MAX_PAGE_SIZE {
        return Err(FeedError::InvalidRequest(format!(
            "pageSize must be in [1, {MAX_PAGE_SIZE}]"
        )));
    }
    if !request.exploration_ratio.is_finite()
        || !(0.0..=1.0).contains(&request.exploration_ratio)
    {
        return Err(FeedError::InvalidRequest(
            "explorationRatio must be in [0, 1]".to_string(),
        ));
    }
    Ok(())
}

/// Fisher–Yates shuffle over the trailing `floor(N * ratio)` entries.
///
/// Exploration samples from the tail only: the top `N - k` keep strict
/// rank order, so explored content is never better-ranked than the
/// exploited slice.
fn apply_exploration(scored: &mut [ScoredCandidate], ratio: f64, seed: Option<u64>) {
    if ratio <= 0.0 || scored.len() <= 1 {
        return;
    }
    let exploration_count = (scored.len() as f64 * ratio).floor() as usize;
    if exploration_count == 0 {
        return;
    }

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let tail_start = scored.len() - exploration_count;
    scored[tail_start..].shuffle(&mut rng);
}

/// First-seen-wins cap on candidates sharing one organization.
/// Candidates without an organization are never capped.
fn apply_org_diversity(scored: Vec<ScoredCandidate>, max_per_org: usize) -> Vec<ScoredCandidate> {
    let mut org_counts: std::collections::HashMap<String, usize> = Default::default();
    scored
        .into_iter()
        .filter(|candidate| match &candidate.item.org {
            Some(org) => {
                let count = org_counts.entry(org.clone()).or_insert(0);
                *count += 1;
                *count <= max_per_org
            }
            None => true,
        })
        .collect()
}

fn paginate(capped: Vec<ScoredCandidate>, page: u32, page_size: u32) -> Vec<ScoredCandidate> {
    let start = (page as usize - 1) * page_size as usize;
    capped
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreBreakdown;

    fn scored(id: &str, score: f64, org: Option<&str>) -> ScoredCandidate {
        ScoredCandidate {
            item: Profile {
                id: id.to_string(),
                owner_id: format!("owner-{id}"),
                org: org.map(|o| o.to_string()),
                skills: vec![],
                free_text: String::new(),
                eligibility_key: None,
                created_at: Utc::now(),
            },
            score,
            breakdown: ScoreBreakdown {
                skills_score: 0.0,
                text_score: 0.0,
                eligibility_score: 1.0,
                freshness_score: 1.0,
                novelty_bonus: None,
            },
        }
    }

    fn ranked(n: usize) -> Vec<ScoredCandidate> {
        (0..n)
            .map(|i| scored(&format!("c{i}"), 1.0 - i as f64 * 0.01, None))
            .collect()
    }

    #[test]
    fn test_exploration_shuffles_only_the_tail() {
        let baseline = ranked(10);
        for seed in 0..20 {
            let mut candidates = baseline.clone();
            apply_exploration(&mut candidates, 0.2, Some(seed));

            // Top 8 keep strict rank order.
            for (kept, expected) in candidates.iter().take(8).zip(baseline.iter()) {
                assert_eq!(kept.item.id, expected.item.id);
            }
            // Tail holds the same two ids, possibly permuted.
            let mut tail: Vec<&str> =
                candidates[8..].iter().map(|c| c.item.id.as_str()).collect();
            tail.sort_unstable();
            assert_eq!(tail, vec!["c8", "c9"]);
        }
    }

    #[test]
    fn test_exploration_zero_ratio_is_identity() {
        let baseline = ranked(10);
        let mut candidates = baseline.clone();
        apply_exploration(&mut candidates, 0.0, Some(1));
        let ids: Vec<&str> = candidates.iter().map(|c| c.item.id.as_str()).collect();
        let expected: Vec<&str> = baseline.iter().map(|c| c.item.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_exploration_tiny_pool_untouched() {
        let mut single = vec![scored("only", 1.0, None)];
        apply_exploration(&mut single, 1.0, Some(3));
        assert_eq!(single[0].item.id, "only");

        // floor(4 * 0.2) = 0: nothing to shuffle.
        let baseline = ranked(4);
        let mut candidates = baseline.clone();
        apply_exploration(&mut candidates, 0.2, Some(3));
        let ids: Vec<&str> = candidates.iter().map(|c| c.item.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2", "c3"]);
    }

    #[test]
    fn test_org_diversity_caps_first_seen_wins() {
        let candidates = vec![
            scored("a1", 0.9, Some("acme")),
            scored("a2", 0.8, Some("acme")),
            scored("b1", 0.7, Some("globex")),
            scored("a3", 0.6, Some("acme")),
            scored("a4", 0.5, Some("acme")),
            scored("n1", 0.4, None),
        ];
        let capped = apply_org_diversity(candidates, 3);
        let ids: Vec<&str> = capped.iter().map(|c| c.item.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1", "a3", "n1"]);
    }

    #[test]
    fn test_org_diversity_never_caps_missing_org() {
        let candidates: Vec<ScoredCandidate> =
            (0..6).map(|i| scored(&format!("n{i}"), 1.0, None)).collect();
        assert_eq!(apply_org_diversity(candidates, 1).len(), 6);
    }

    #[test]
    fn test_paginate_windows() {
        let candidates = ranked(5);
        let page_2 = paginate(candidates.clone(), 2, 2);
        let ids: Vec<&str> = page_2.iter().map(|c| c.item.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);

        let beyond = paginate(candidates, 4, 2);
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_validate_request_bounds() {
        let ok = FeedRequest::default();
        assert!(validate_request(&ok).is_ok());

        let bad_page = FeedRequest { page: 0, ..Default::default() };
        assert!(validate_request(&bad_page).is_err());

        let bad_size = FeedRequest { page_size: 51, ..Default::default() };
        assert!(validate_request(&bad_size).is_err());

        let bad_ratio = FeedRequest { exploration_ratio: 1.5, ..Default::default() };
        assert!(validate_request(&bad_ratio).is_err());

        let nan_ratio = FeedRequest { exploration_ratio: f64::NAN, ..Default::default() };
        assert!(validate_request(&nan_ratio).is_err());
    }
}

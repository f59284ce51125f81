//! Eligibility and interaction-history filtering.
//!
//! Pure predicate over the candidate pool: ordering is decided
//! downstream by the scorer and feed assembler, never here.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::types::{EntityKind, InteractionRecord, Profile, Stage, DISLIKE_COOLDOWN_DAYS};

/// Drop candidates the viewer cannot or should not see:
///
/// 1. authored by the viewer themself;
/// 2. eligibility keys set on both sides and different;
/// 3. already acted on positively (latest interaction stage >= 0);
/// 4. disliked within the cooldown window. A dislike older than
///    `cooldown_days` no longer excludes, so the candidate resurfaces.
///
/// The latest interaction per (viewer, entity) governs: a later dislike
/// supersedes an earlier like and vice versa.
pub fn filter_candidates(
    viewer: &Profile,
    pool: Vec<Profile>,
    history: &[InteractionRecord],
    target: EntityKind,
    now: DateTime<Utc>,
) -> Vec<Profile> {
    filter_candidates_with_cooldown(viewer, pool, history, target, now, DISLIKE_COOLDOWN_DAYS)
}

pub fn filter_candidates_with_cooldown(
    viewer: &Profile,
    pool: Vec<Profile>,
    history: &[InteractionRecord],
    target: EntityKind,
    now: DateTime<Utc>,
    cooldown_days: i64,
) -> Vec<Profile> {
    let latest = latest_interactions(viewer, history, target);
    let cooldown = Duration::days(cooldown_days);

    pool.into_iter()
        .filter(|candidate| {
            if candidate.owner_id == viewer.id {
                return false;
            }
            if let (Some(viewer_key), Some(candidate_key)) =
                (viewer.eligibility_key, candidate.eligibility_key)
            {
                if viewer_key != candidate_key {
                    return false;
                }
            }
            match latest.get(candidate.id.as_str()) {
                Some(record) if record.stage.is_positive() => false,
                Some(record) if record.stage == Stage::Dislike => {
                    now - record.created_at >= cooldown
                }
                _ => true,
            }
        })
        .collect()
}

/// Latest interaction per entity id for this viewer and entity kind.
fn latest_interactions<'a>(
    viewer: &Profile,
    history: &'a [InteractionRecord],
    target: EntityKind,
) -> HashMap<&'a str, &'a InteractionRecord> {
    let mut latest: HashMap<&str, &InteractionRecord> = HashMap::new();
    for record in history {
        if record.from_viewer != viewer.id || record.to_entity != target {
            continue;
        }
        latest
            .entry(record.to_id.as_str())
            .and_modify(|current| {
                if record.created_at >= current.created_at {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    latest
}

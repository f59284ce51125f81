//! Per-viewer daily interaction quota.
//!
//! The day boundary is UTC-midnight to UTC-midnight; every count in
//! this module and in the stores uses that single policy. A slightly
//! stale count from an eventually consistent store is acceptable.

use chrono::{DateTime, Duration, Utc};

use crate::types::{InteractionRecord, DEFAULT_DAILY_LIKE_LIMIT};

/// Positive-stage interactions (like/superlike) recorded by this viewer
/// during the current UTC day. Dislikes are free and unlimited.
pub fn daily_like_count(history: &[InteractionRecord], now: DateTime<Utc>) -> u32 {
    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now);
    let day_end = day_start + Duration::days(1);

    history
        .iter()
        .filter(|record| record.stage.is_positive())
        .filter(|record| record.created_at >= day_start && record.created_at < day_end)
        .count() as u32
}

/// Likes the viewer may still spend today.
pub fn remaining_likes(history: &[InteractionRecord], now: DateTime<Utc>, daily_limit: u32) -> u32 {
    daily_limit.saturating_sub(daily_like_count(history, now))
}

/// `remaining_likes` with the default daily limit of 30.
pub fn remaining_likes_default(history: &[InteractionRecord], now: DateTime<Utc>) -> u32 {
    remaining_likes(history, now, DEFAULT_DAILY_LIKE_LIMIT)
}

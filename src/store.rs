//! Storage collaborator seam.
//!
//! The core never issues storage queries itself; it talks to whatever
//! implements [`FeedStore`]. [`MemoryStore`] is the in-process
//! reference implementation used by the tests and by callers that do
//! not need a database.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::types::{EntityKind, ExposureRecord, InteractionRecord, Stage};

/// Read/write surface the feed assembler needs from storage.
///
/// `record_exposure` must be safe to call redundantly (upsert or
/// ignore-on-conflict); `impression_counts` must default missing ids
/// to zero.
pub trait FeedStore {
    fn interactions_from(
        &self,
        viewer_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<InteractionRecord>, StoreError>> + Send;

    fn impression_counts(
        &self,
        entity: EntityKind,
        entity_ids: &[String],
    ) -> impl std::future::Future<Output = Result<HashMap<String, u32>, StoreError>> + Send;

    fn record_exposure(
        &self,
        viewer_id: &str,
        entity: EntityKind,
        entity_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Exposure dedup key: one write per (viewer, entity, day)
type ExposureKey = (String, EntityKind, String, chrono::NaiveDate);

/// In-memory store guarded by mutexes; suitable for tests and
/// single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    interactions: Mutex<Vec<InteractionRecord>>,
    exposures: Mutex<Vec<ExposureRecord>>,
    exposure_keys: Mutex<HashSet<ExposureKey>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one swipe. The log is append-only; downstream filtering
    /// resolves the latest record per (viewer, entity) pair.
    pub fn add_interaction(
        &self,
        from_viewer: &str,
        to_entity: EntityKind,
        to_id: &str,
        stage: Stage,
    ) {
        self.add_interaction_record(InteractionRecord {
            from_viewer: from_viewer.to_string(),
            to_entity,
            to_id: to_id.to_string(),
            stage,
            created_at: Utc::now(),
        });
    }

    /// Append a fully formed record, timestamps included. Tests use
    /// this to backdate history.
    pub fn add_interaction_record(&self, record: InteractionRecord) {
        self.interactions.lock().push(record);
    }

    pub fn exposure_count(&self) -> usize {
        self.exposures.lock().len()
    }

    pub fn exposures_for(&self, entity: EntityKind, entity_id: &str) -> Vec<ExposureRecord> {
        self.exposures
            .lock()
            .iter()
            .filter(|e| e.entity == entity && e.entity_id == entity_id)
            .cloned()
            .collect()
    }

    /// Test hook: register `count` historical impressions for an entity.
    pub fn seed_impressions(&self, entity: EntityKind, entity_id: &str, count: u32) {
        let mut exposures = self.exposures.lock();
        for i in 0..count {
            exposures.push(ExposureRecord {
                viewer_id: format!("seed-{i}"),
                entity,
                entity_id: entity_id.to_string(),
                shown_at: Utc::now(),
            });
        }
    }
}

impl FeedStore for MemoryStore {
    async fn interactions_from(
        &self,
        viewer_id: &str,
    ) -> Result<Vec<InteractionRecord>, StoreError> {
        Ok(self
            .interactions
            .lock()
            .iter()
            .filter(|record| record.from_viewer == viewer_id)
            .cloned()
            .collect())
    }

    async fn impression_counts(
        &self,
        entity: EntityKind,
        entity_ids: &[String],
    ) -> Result<HashMap<String, u32>, StoreError> {
        let exposures = self.exposures.lock();
        let mut counts: HashMap<String, u32> = entity_ids
            .iter()
            .map(|id| (id.clone(), 0))
            .collect();
        for exposure in exposures.iter() {
            if exposure.entity != entity {
                continue;
            }
            if let Some(count) = counts.get_mut(&exposure.entity_id) {
                *count += 1;
            }
        }
        Ok(counts)
    }

    async fn record_exposure(
        &self,
        viewer_id: &str,
        entity: EntityKind,
        entity_id: &str,
    ) -> Result<(), StoreError> {
        let shown_at = Utc::now();
        let key = (
            viewer_id.to_string(),
            entity,
            entity_id.to_string(),
            shown_at.date_naive(),
        );

        let mut keys = self.exposure_keys.lock();
        if !keys.insert(key) {
            // Duplicate within the same day: ignored, never fatal.
            return Ok(());
        }

        self.exposures.lock().push(ExposureRecord {
            viewer_id: viewer_id.to_string(),
            entity,
            entity_id: entity_id.to_string(),
            shown_at,
        });
        Ok(())
    }
}

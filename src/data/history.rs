//! Bounded, deduplicated, persisted record of past lookups.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use itertools::Itertools;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::store::KeyValueStore;
use crate::domain::{HistoryEntry, SequenceResult};

/// Most-recent-first list of results, at most one per index and at most
/// `capacity` long. Every mutation rewrites the whole list under one key.
///
/// Mutating methods take `&mut self`, so a cache shared between threads has to
/// sit behind a single lock; there is never more than one writer to the blob.
pub struct HistoryCache<S: KeyValueStore> {
    store: S,
    key: &'static str,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Empty cache over `store`. Call [`restore`](Self::restore) to load saved state.
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, PERSISTENCE.history.capacity)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self {
            store,
            key: PERSISTENCE.history.key,
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Load saved history. Missing or unreadable data leaves the cache empty;
    /// the failure is logged and never returned.
    pub fn restore(&mut self) {
        match self.load() {
            Ok(entries) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_history_serde {
                    log::info!("Restored {} history entries", entries.len());
                }
                self.entries = entries;
                self.normalize();
            }
            Err(e) => {
                log::warn!("Failed to load history, starting empty: {:#}", e);
                self.entries.clear();
            }
        }
    }

    /// Record `result` as observed now.
    pub fn record(&mut self, result: SequenceResult) {
        self.record_at(result, Utc::now());
    }

    /// Replace any entry for the same index with a fresh one at the front,
    /// drop whatever falls past capacity, then persist.
    pub fn record_at(&mut self, result: SequenceResult, recorded_at: DateTime<Utc>) {
        self.entries.retain(|entry| entry.index() != result.index);
        self.entries.insert(0, HistoryEntry::new(result, recorded_at));
        self.entries.truncate(self.capacity);
        self.persist();
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.index() == index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty the cache and erase the saved blob.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.delete(self.key) {
            log::error!("Failed to erase saved history: {:#}", e);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<Vec<HistoryEntry>> {
        let Some(blob) = self.store.get(self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&blob).context(format!("Failed to deserialize history: {}", self.key))
    }

    /// In-memory state stays authoritative when the write fails.
    fn persist(&self) {
        let written = serde_json::to_string(&self.entries)
            .context("Failed to serialize history")
            .and_then(|blob| self.store.set(self.key, &blob));
        if let Err(e) = written {
            log::error!("Failed to save history: {:#}", e);
        }
    }

    /// Saved data may have been edited by hand; re-establish the invariants.
    fn normalize(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .unique_by(|entry| entry.index())
            .take(self.capacity)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::MemoryStore;
    use anyhow::bail;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn result(index: u64) -> SequenceResult {
        SequenceResult::new(index, index.to_string(), 1.0, false)
    }

    fn indices<S: KeyValueStore>(cache: &HistoryCache<S>) -> Vec<u64> {
        cache.list().iter().map(|e| e.index()).collect()
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            bail!("disk on fire")
        }
        fn set(&self, _key: &str, _blob: &str) -> Result<()> {
            bail!("disk on fire")
        }
        fn delete(&self, _key: &str) -> Result<()> {
            bail!("disk on fire")
        }
    }

    #[test]
    fn single_record_scenario() {
        let mut cache = HistoryCache::new(MemoryStore::new());
        cache.record(SequenceResult {
            index: 0,
            value: "0".to_string(),
            digit_count: 1,
            compute_time_ms: 1.0,
            from_cache: false,
        });

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.list()[0].index(), 0);
        assert_eq!(cache.list()[0].value(), "0");
    }

    #[test]
    fn repeat_index_moves_to_front_and_refreshes_timestamp() {
        let mut cache = HistoryCache::new(MemoryStore::new());
        let t0 = Utc.timestamp_millis_opt(1_000).unwrap();

        cache.record_at(result(1), t0);
        cache.record_at(result(2), t0 + Duration::seconds(1));
        cache.record_at(result(1), t0 + Duration::seconds(2));

        assert_eq!(indices(&cache), vec![1, 2]);
        assert_eq!(cache.list()[0].recorded_at, t0 + Duration::seconds(2));
    }

    #[test]
    fn oldest_inserted_is_evicted_past_capacity() {
        let mut cache = HistoryCache::new(MemoryStore::new());
        for index in 0..12 {
            cache.record(result(index));
        }

        assert_eq!(cache.capacity(), 10);
        assert_eq!(cache.len(), cache.capacity());
        assert_eq!(indices(&cache), (2..12).rev().collect::<Vec<_>>());
        assert!(cache.get(0).is_none());
        assert!(cache.get(11).is_some());
    }

    #[test]
    fn restore_in_fresh_instance_over_same_store() {
        let store = MemoryStore::new();
        let r1 = result(5);
        let r2 = result(9);

        let mut first = HistoryCache::new(store.clone());
        first.record(r1.clone());
        first.record(r2.clone());

        let mut second = HistoryCache::new(store);
        second.restore();

        assert_eq!(second.list(), first.list());
        let restored: Vec<_> = second.list().iter().map(|e| e.result.clone()).collect();
        assert_eq!(restored, vec![r2, r1]);
    }

    #[test]
    fn corrupt_store_restores_empty() {
        let store = MemoryStore::new();
        store.set(PERSISTENCE.history.key, "{not json").unwrap();

        let mut cache = HistoryCache::new(store);
        cache.record(result(1));
        cache.store().set(PERSISTENCE.history.key, "[{\"index\":\"x\"}]").unwrap();
        cache.restore();

        assert!(cache.is_empty());
    }

    #[test]
    fn unreadable_store_never_fails_callers() {
        let mut cache = HistoryCache::new(BrokenStore);
        cache.restore();
        assert!(cache.is_empty());

        cache.record(result(3));
        assert_eq!(indices(&cache), vec![3]);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_erases_saved_blob() {
        let store = MemoryStore::new();
        let mut cache = HistoryCache::new(store.clone());
        cache.record(result(4));
        assert!(store.get(PERSISTENCE.history.key).unwrap().is_some());

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(store.get(PERSISTENCE.history.key).unwrap(), None);
        let mut fresh = HistoryCache::new(store);
        fresh.restore();
        assert!(fresh.is_empty());
    }

    #[test]
    fn restore_repairs_duplicates_and_overflow() {
        let at = Utc.timestamp_millis_opt(0).unwrap();
        let mut saved: Vec<HistoryEntry> = (0..15).map(|i| HistoryEntry::new(result(i), at)).collect();
        saved.insert(1, HistoryEntry::new(result(0), at));
        let store = MemoryStore::new();
        store
            .set(PERSISTENCE.history.key, &serde_json::to_string(&saved).unwrap())
            .unwrap();

        let mut cache = HistoryCache::new(store);
        cache.restore();

        assert_eq!(indices(&cache), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn saved_blob_is_a_json_array_with_timestamps() {
        let store = MemoryStore::new();
        let mut cache = HistoryCache::new(store.clone());
        cache.record_at(result(8), Utc.timestamp_millis_opt(1_700_000_000_456).unwrap());

        let blob = store.get(PERSISTENCE.history.key).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&blob).unwrap();

        assert_eq!(json[0]["index"], 8);
        assert_eq!(json[0]["digitCount"], 1);
        assert!(json[0]["recordedAt"].as_str().unwrap().starts_with("2023-11-14T22:13:20.456"));
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_record(sequence in prop::collection::vec(0u64..25, 0..60)) {
            let mut cache = HistoryCache::new(MemoryStore::new());
            for index in sequence {
                cache.record(result(index));

                let seen: HashSet<u64> = cache.list().iter().map(|e| e.index()).collect();
                prop_assert_eq!(seen.len(), cache.len());
                prop_assert!(cache.len() <= 10);
                prop_assert_eq!(cache.list()[0].index(), index);
            }
        }
    }
}

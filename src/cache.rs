// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded memo table for solar-noon instants.
//!
//! The converter asks for the same handful of noons over and over
//! (today, yesterday, tomorrow, for one or two longitudes), so results
//! are memoized keyed by the exact `(longitude, date)` pair. Longitude
//! equality is bit equality on the `f64` — there is no fuzzy matching,
//! and a hit returns the stored instant unchanged, so cached and
//! uncached call sites are indistinguishable.
//!
//! Capacity is bounded (default one year of dates) with
//! least-recently-used eviction. Lookups share a read lock and refresh
//! per-entry recency stamps atomically; insert-with-eviction is a single
//! write-locked critical section, so a concurrent lookup sees either the
//! pre- or post-eviction table, never a torn one.

use crate::error::CtuResult;
use crate::noon::{solar_noon, NoonSource};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

/// Exact-match cache key. Longitude participates as raw bits: equal keys
/// require floating-point-identical longitudes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct NoonKey {
    longitude_bits: u64,
    date: NaiveDate,
}

impl NoonKey {
    fn new(longitude: f64, date: NaiveDate) -> Self {
        Self {
            longitude_bits: longitude.to_bits(),
            date,
        }
    }
}

struct Slot {
    noon: DateTime<Utc>,
    touched: AtomicU64,
}

/// Bounded LRU memo table over [`solar_noon`].
///
/// Purely a performance optimization: swapping it for
/// [`DirectNoon`](crate::DirectNoon) changes no observable result.
pub struct NoonCache {
    capacity: usize,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    table: RwLock<HashMap<NoonKey, Slot>>,
}

impl NoonCache {
    /// Default capacity: one calendar year of hot dates.
    pub const DEFAULT_CAPACITY: usize = 365;

    /// Create a cache bounded to `capacity` entries. A capacity of zero
    /// disables storage entirely (every call recomputes).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            table: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured capacity bound.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fraction of lookups served from memory.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Memoized lookup. Refreshes the entry's recency on a hit.
    pub fn lookup(&self, longitude: f64, date: NaiveDate) -> Option<DateTime<Utc>> {
        let key = NoonKey::new(longitude, date);
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let slot = table.get(&key)?;
        let stamp = self.clock.fetch_add(1, Ordering::Relaxed);
        slot.touched.store(stamp, Ordering::Relaxed);
        Some(slot.noon)
    }

    fn insert(&self, key: NoonKey, noon: DateTime<Utc>) {
        if self.capacity == 0 {
            return;
        }
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if !table.contains_key(&key) && table.len() >= self.capacity {
            // Evict the stalest entry; capacity is small enough that a
            // scan beats maintaining an intrusive list.
            let stalest = table
                .iter()
                .min_by_key(|(_, slot)| slot.touched.load(Ordering::Relaxed))
                .map(|(key, _)| *key);
            if let Some(stalest) = stalest {
                table.remove(&stalest);
            }
        }
        let stamp = self.clock.fetch_add(1, Ordering::Relaxed);
        table.insert(
            key,
            Slot {
                noon,
                touched: AtomicU64::new(stamp),
            },
        );
    }
}

impl Default for NoonCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl NoonSource for NoonCache {
    fn noon(&self, longitude: f64, date: NaiveDate) -> CtuResult<DateTime<Utc>> {
        if let Some(noon) = self.lookup(longitude, date) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(noon);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let noon = solar_noon(longitude, date)?;
        self.insert(NoonKey::new(longitude, date), noon);
        Ok(noon)
    }
}

/// Process-lifetime cache backing the crate's top-level functions.
pub(crate) fn shared() -> &'static NoonCache {
    static SHARED: OnceLock<NoonCache> = OnceLock::new();
    SHARED.get_or_init(NoonCache::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noon::DirectNoon;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hit_returns_bit_identical_instant() {
        let cache = NoonCache::new(8);
        let first = cache.noon(9.1829, date(2025, 4, 10)).unwrap();
        let second = cache.noon(9.1829, date(2025, 4, 10)).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert!(cache.hit_ratio() > 0.0);
    }

    #[test]
    fn matches_the_uncached_source() {
        let cache = NoonCache::new(8);
        let direct = DirectNoon;
        for day in 1..=28 {
            let d = date(2025, 2, day);
            assert_eq!(
                cache.noon(-71.06, d).unwrap(),
                direct.noon(-71.06, d).unwrap()
            );
        }
    }

    #[test]
    fn longitude_keys_are_exact() {
        let cache = NoonCache::new(8);
        let d = date(2025, 4, 10);
        cache.noon(0.1 + 0.2, d).unwrap();
        cache.noon(0.3, d).unwrap();
        // 0.1 + 0.2 != 0.3 in f64, so these are distinct entries.
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_is_a_hard_bound() {
        let cache = NoonCache::new(3);
        for day in 1..=10 {
            cache.noon(0.0, date(2025, 1, day)).unwrap();
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn eviction_is_least_recently_used() {
        let cache = NoonCache::new(2);
        cache.noon(0.0, date(2025, 1, 1)).unwrap();
        cache.noon(0.0, date(2025, 1, 2)).unwrap();
        // Touch day 1 so day 2 becomes the eviction candidate.
        cache.noon(0.0, date(2025, 1, 1)).unwrap();
        cache.noon(0.0, date(2025, 1, 3)).unwrap();

        assert!(cache.lookup(0.0, date(2025, 1, 1)).is_some());
        assert!(cache.lookup(0.0, date(2025, 1, 2)).is_none());
        assert!(cache.lookup(0.0, date(2025, 1, 3)).is_some());
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let cache = NoonCache::new(0);
        cache.noon(0.0, date(2025, 1, 1)).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn default_capacity_covers_a_year() {
        assert_eq!(NoonCache::default().capacity(), 365);
    }
}

//! Widget registration cache
//!
//! Rendering a model widget stores its data source here under
//! `cache_prefix + uuid`. The auto-response view looks it up again from the
//! signed field id sent with every search request.

use crate::search::ResultSource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// What a rendered widget leaves behind for its data view
#[derive(Clone)]
pub struct CachedField {
	/// Path of the view the field id was issued for
	pub url: String,
	pub source: Arc<dyn ResultSource>,
}

impl std::fmt::Debug for CachedField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CachedField")
			.field("url", &self.url)
			.field("max_results", &self.source.max_results())
			.finish_non_exhaustive()
	}
}

pub trait WidgetCache: Send + Sync {
	fn get(&self, key: &str) -> Option<CachedField>;

	fn set(&self, key: &str, value: CachedField);

	fn delete(&self, key: &str) -> bool;

	fn clear(&self);

	/// Number of stored registrations, expired ones included.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

struct CacheEntry {
	value: CachedField,
	written_at: Instant,
	expires_at: Option<Instant>,
}

impl CacheEntry {
	fn is_expired(&self) -> bool {
		self.expires_at.is_some_and(|at| Instant::now() >= at)
	}
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
	pub hits: u64,
	pub misses: u64,
	pub total_requests: u64,
	pub entry_count: u64,
}

impl CacheStatistics {
	pub fn hit_rate(&self) -> f64 {
		if self.total_requests == 0 {
			return 0.0;
		}
		self.hits as f64 / self.total_requests as f64
	}
}

/// Process-local [`WidgetCache`]
#[derive(Default)]
pub struct InMemoryWidgetCache {
	store: RwLock<HashMap<String, CacheEntry>>,
	default_ttl: Option<Duration>,
	max_entries: Option<usize>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl InMemoryWidgetCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Expire every entry `ttl` after it was written.
	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	/// Keep at most `max_entries` registrations
	///
	/// A write that would go over the limit first drops expired entries, then
	/// the oldest ones.
	pub fn with_max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = Some(max_entries.max(1));
		self
	}

	/// Drop expired entries.
	pub fn cleanup_expired(&self) {
		self.store.write().retain(|_, entry| !entry.is_expired());
	}

	pub fn statistics(&self) -> CacheStatistics {
		let hits = self.hits.load(Ordering::Relaxed);
		let misses = self.misses.load(Ordering::Relaxed);
		CacheStatistics {
			hits,
			misses,
			total_requests: hits + misses,
			entry_count: self.store.read().len() as u64,
		}
	}

	pub fn keys(&self) -> Vec<String> {
		self.store.read().keys().cloned().collect()
	}
}

impl WidgetCache for InMemoryWidgetCache {
	fn get(&self, key: &str) -> Option<CachedField> {
		let store = self.store.read();
		match store.get(key) {
			Some(entry) if !entry.is_expired() => {
				self.hits.fetch_add(1, Ordering::Relaxed);
				Some(entry.value.clone())
			}
			_ => {
				self.misses.fetch_add(1, Ordering::Relaxed);
				None
			}
		}
	}

	fn set(&self, key: &str, value: CachedField) {
		let now = Instant::now();
		let expires_at = self.default_ttl.map(|ttl| now + ttl);
		tracing::debug!(key, url = %value.url, "caching widget data source");

		let mut store = self.store.write();
		if let Some(max_entries) = self.max_entries
			&& !store.contains_key(key)
			&& store.len() >= max_entries
		{
			store.retain(|_, entry| !entry.is_expired());
			while store.len() >= max_entries {
				let Some(oldest) = store
					.iter()
					.min_by_key(|(_, entry)| entry.written_at)
					.map(|(key, _)| key.clone())
				else {
					break;
				};
				tracing::debug!(key = %oldest, "evicting widget data source");
				store.remove(&oldest);
			}
		}
		store.insert(
			key.to_string(),
			CacheEntry {
				value,
				written_at: now,
				expires_at,
			},
		);
	}

	fn delete(&self, key: &str) -> bool {
		self.store.write().remove(key).is_some()
	}

	fn clear(&self) {
		self.store.write().clear();
	}

	fn len(&self) -> usize {
		self.store.read().len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Select2Result;
	use rstest::rstest;
	use select2_forms::Lookup;
	use serde_json::Value;
	use std::collections::BTreeMap;

	struct Fixed(BTreeMap<String, String>);

	impl ResultSource for Fixed {
		fn max_results(&self) -> usize {
			10
		}

		fn dependent_fields(&self) -> &BTreeMap<String, String> {
			&self.0
		}

		fn results(&self, _term: &str, _dependent: &[Lookup]) -> Select2Result<Vec<Value>> {
			Ok(Vec::new())
		}
	}

	fn field(url: &str) -> CachedField {
		CachedField {
			url: url.to_string(),
			source: Arc::new(Fixed(BTreeMap::new())),
		}
	}

	#[rstest]
	fn test_set_get_and_statistics() {
		// Arrange
		let cache = InMemoryWidgetCache::new();
		cache.set("select2_a", field("/auto.json"));

		// Act
		let hit = cache.get("select2_a");
		let miss = cache.get("select2_b");

		// Assert
		assert_eq!(hit.map(|f| f.url), Some("/auto.json".to_string()));
		assert!(miss.is_none());
		let stats = cache.statistics();
		assert_eq!(stats.hits, 1);
		assert_eq!(stats.misses, 1);
		assert_eq!(stats.entry_count, 1);
		assert_eq!(stats.hit_rate(), 0.5);
	}

	#[rstest]
	fn test_expired_entries_are_misses() {
		let cache = InMemoryWidgetCache::new().with_default_ttl(Duration::ZERO);
		cache.set("k", field("/auto.json"));

		assert!(cache.get("k").is_none());
		cache.cleanup_expired();
		assert!(cache.keys().is_empty());
	}

	#[rstest]
	fn test_oldest_entry_is_evicted_at_capacity() {
		// Arrange
		let cache = InMemoryWidgetCache::new().with_max_entries(2);
		cache.set("a", field("/a"));
		std::thread::sleep(Duration::from_millis(2));
		cache.set("b", field("/b"));

		// Act
		cache.set("b", field("/b2"));
		cache.set("c", field("/c"));

		// Assert
		assert_eq!(cache.len(), 2);
		assert!(cache.get("a").is_none());
		assert_eq!(cache.get("b").map(|f| f.url), Some("/b2".to_string()));
		assert!(cache.get("c").is_some());
	}

	#[rstest]
	fn test_delete_and_clear() {
		let cache = InMemoryWidgetCache::new();
		cache.set("a", field("/a"));
		cache.set("b", field("/b"));

		assert!(cache.delete("a"));
		assert!(!cache.delete("a"));
		cache.clear();
		assert_eq!(cache.statistics().entry_count, 0);
	}
}

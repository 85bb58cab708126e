//! # Associative Store
//!
//! A string-keyed hash map built on separate chaining.
//!
//! - Buckets are an array of chains; each chain is an ordered `Vec<Entry>`.
//! - Bucket index is a polynomial hash: `hash = hash * 31 + char`, reduced
//!   modulo the bucket count.
//! - The bucket count is always prime. When `count / buckets` exceeds
//!   `MAX_LOAD_FACTOR` after an insert, the store doubles, rounds up to the
//!   next prime and rehashes every entry.
//!
//! The store backs both the product catalog and the category index.

use serde::{Deserialize, Serialize};

use crate::ProductId;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Resize trigger: entries per bucket.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Bucket count used by `AssociativeStore::new`.
pub const DEFAULT_BUCKETS: usize = 97;

/// Polynomial hash multiplier.
const HASH_MULTIPLIER: u64 = 31;

// =============================================================================
// KEY TRAIT
// =============================================================================

/// Keys stored in an `AssociativeStore`.
///
/// Keys compare by value and hash over their string form, so any key type
/// that can expose a `&str` works.
pub trait StoreKey: Eq {
    /// The characters fed to the polynomial hash.
    fn key_str(&self) -> &str;
}

impl StoreKey for String {
    fn key_str(&self) -> &str {
        self
    }
}

impl StoreKey for ProductId {
    fn key_str(&self) -> &str {
        self.as_str()
    }
}

/// Polynomial string hash reduced into `0..buckets`.
///
/// Reducing after every step is equivalent to reducing the full polynomial
/// once, and keeps the accumulator inside `u64`.
#[must_use]
pub fn bucket_index(key: &str, buckets: usize) -> usize {
    let modulus = buckets.max(1) as u64;
    let mut hash: u64 = 0;
    for c in key.chars() {
        hash = (hash * HASH_MULTIPLIER + u64::from(c)) % modulus;
    }
    hash as usize
}

/// Smallest prime `>= n`, by trial division over odd candidates.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    loop {
        if is_odd_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
}

fn is_odd_prime(candidate: usize) -> bool {
    let mut divisor = 3;
    while divisor * divisor <= candidate {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

// =============================================================================
// ENTRY
// =============================================================================

/// An owned key/value pair inside one bucket chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// The entry's key. Keys never change after insertion.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's current value.
    pub fn value(&self) -> &V {
        &self.value
    }
}

// =============================================================================
// COLLISION STATS
// =============================================================================

/// Diagnostic snapshot of how evenly keys are spread across buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionStats {
    pub total_buckets: usize,
    pub used_buckets: usize,
    pub empty_buckets: usize,
    pub load_factor: f64,
    pub max_chain_length: usize,
    /// Mean length over non-empty chains only.
    pub avg_chain_length: f64,
    pub buckets_with_collisions: usize,
}

// =============================================================================
// ASSOCIATIVE STORE
// =============================================================================

/// Chained hash map with prime-sized dynamic resize.
///
/// Invariants:
/// - `count` equals the sum of all chain lengths
/// - the bucket count is prime
/// - `count / buckets <= MAX_LOAD_FACTOR` after every `set`
#[derive(Debug, Clone)]
pub struct AssociativeStore<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    count: usize,
}

impl<K: StoreKey, V> Default for AssociativeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StoreKey, V> AssociativeStore<K, V> {
    /// Create an empty store with `DEFAULT_BUCKETS` buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create an empty store. `buckets` is rounded up to the next prime.
    #[must_use]
    pub fn with_buckets(buckets: usize) -> Self {
        let size = next_prime(buckets);
        Self {
            buckets: empty_buckets(size),
            count: 0,
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current bucket count.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    fn index_of(&self, key: &K) -> usize {
        bucket_index(key.key_str(), self.buckets.len())
    }

    /// Insert or replace.
    ///
    /// An existing key keeps its position in the chain and only its value is
    /// overwritten. A new key is appended to its chain and may trigger a
    /// resize. Returns the replaced value, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.index_of(&key);
        let chain = &mut self.buckets[index];
        if let Some(entry) = chain.iter_mut().find(|e| e.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        chain.push(Entry { key, value });
        self.count += 1;

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.resize();
        }
        None
    }

    /// Look up a value by exact key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.index_of(key);
        self.buckets[index]
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.value)
    }

    /// Mutable lookup; mutation is visible to every later reader.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.index_of(key);
        self.buckets[index]
            .iter_mut()
            .find(|e| &e.key == key)
            .map(|e| &mut e.value)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove and return the value for `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|e| &e.key == key)?;
        // `remove` (not `swap_remove`) keeps the rest of the chain in order.
        let entry = chain.remove(position);
        self.count -= 1;
        Some(entry.value)
    }

    /// Remove `key`; returns whether a removal happened.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Every entry, bucket by bucket then chain position by chain position.
    ///
    /// The iterator borrows the store, so it cannot observe concurrent
    /// mutation. Call again to restart.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.buckets.iter().flatten()
    }

    /// Every value, in `entries()` order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|e| &e.value)
    }

    /// Every value, mutably, in `entries()` order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.buckets.iter_mut().flatten().map(|e| &mut e.value)
    }

    /// Every key, in `entries()` order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries().map(|e| &e.key)
    }

    /// Drop every entry but keep the current bucket count.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.count = 0;
    }

    /// Double the bucket count (rounded up to a prime) and rehash.
    fn resize(&mut self) {
        let new_size = next_prime(self.buckets.len() * 2);
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for entry in old.into_iter().flatten() {
            let index = bucket_index(entry.key.key_str(), new_size);
            self.buckets[index].push(entry);
        }
        tracing::debug!(
            target: "shelfsim_core::store",
            buckets = new_size,
            entries = self.count,
            "associative store resized"
        );
    }

    /// Distribution diagnostics. Read-only.
    #[must_use]
    pub fn collision_stats(&self) -> CollisionStats {
        let total = self.buckets.len();
        let mut used = 0;
        let mut collisions = 0;
        let mut max_chain = 0;
        let mut non_empty_total = 0;
        for chain in &self.buckets {
            let len = chain.len();
            if len > 0 {
                used += 1;
                non_empty_total += len;
            }
            if len > 1 {
                collisions += 1;
            }
            max_chain = max_chain.max(len);
        }
        CollisionStats {
            total_buckets: total,
            used_buckets: used,
            empty_buckets: total - used,
            load_factor: self.load_factor(),
            max_chain_length: max_chain,
            avg_chain_length: if used == 0 {
                0.0
            } else {
                non_empty_total as f64 / used as f64
            },
            buckets_with_collisions: collisions,
        }
    }
}

impl<'a, K: StoreKey, V> IntoIterator for &'a AssociativeStore<K, V> {
    type Item = &'a Entry<K, V>;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Vec<Entry<K, V>>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter().flatten()
    }
}

fn empty_buckets<K, V>(size: usize) -> Vec<Vec<Entry<K, V>>> {
    let mut buckets = Vec::with_capacity(size);
    buckets.resize_with(size, Vec::new);
    buckets
}

// =============================================================================
// TESTS
// =============================================================================

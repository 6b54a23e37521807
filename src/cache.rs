//! Caller-owned interning cache for parsed values.
//!
//! Parsing the same spec twice yields equal values anyway; a [`ValueCache`]
//! is for callers that also want to share one allocation per value. Values
//! are keyed by their canonical string as well as by the text they were
//! interned under, so different spellings of one range share an instance.

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Bounded map from normalized key to a shared value.
///
/// When full, the entry inserted earliest is evicted. Construction of a
/// missing entry happens under the lock, so concurrent callers interning the
/// same key always get the same `Arc`.
#[derive(Debug)]
pub struct ValueCache<T> {
    capacity: usize,
    inner: Mutex<Entries<T>>,
}

#[derive(Debug)]
struct Entries<T> {
    values: HashMap<String, Arc<T>>,
    order: VecDeque<String>,
}

impl<T> ValueCache<T> {
    /// A cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> ValueCache<T> {
        ValueCache {
            capacity: capacity.max(1),
            inner: Mutex::new(Entries {
                values: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries<T>> {
        // entries are only ever inserted whole, so a poisoned map is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries().values.get(key).cloned()
    }

    /// Number of keys, counting canonical keys and aliases separately.
    pub fn len(&self) -> usize {
        self.entries().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut entries = self.entries();
        entries.values.clear();
        entries.order.clear();
    }
}

impl<T: Display> ValueCache<T> {
    /// The shared value for `key`, calling `build` only if it is not cached.
    ///
    /// # Examples
    /// ```
    /// use netspec::{IpRange, ValueCache};
    /// let cache: ValueCache<IpRange> = ValueCache::new(8);
    /// let a = cache.intern("10.0.0.*", || IpRange::parse("10.0.0.*")).unwrap();
    /// let b = cache.intern("10.0.0.*", || IpRange::parse("10.0.0.*")).unwrap();
    /// assert!(std::sync::Arc::ptr_eq(&a, &b));
    /// ```
    pub fn intern<F>(&self, key: &str, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut entries = self.entries();
        if let Some(found) = entries.values.get(key) {
            log::trace!("cache hit [{key}]");
            return Ok(Arc::clone(found));
        }
        let built = build()?;
        let canonical = built.to_string();
        let value = match entries.values.get(&canonical).cloned() {
            Some(found) => {
                log::trace!("cache hit [{key}] as [{canonical}]");
                found
            }
            None => {
                let value = Arc::new(built);
                self.insert(&mut entries, canonical.clone(), &value);
                value
            }
        };
        if key != canonical {
            self.insert(&mut entries, key.to_string(), &value);
        }
        Ok(value)
    }

    fn insert(&self, entries: &mut Entries<T>, key: String, value: &Arc<T>) {
        entries.values.insert(key.clone(), Arc::clone(value));
        entries.order.push_back(key);
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                log::warn!("cache full ({}), evicting [{oldest}]", self.capacity);
                entries.values.remove(&oldest);
            }
        }
    }
}

impl<T> Default for ValueCache<T> {
    fn default() -> Self {
        ValueCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

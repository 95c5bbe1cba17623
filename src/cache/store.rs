//! Cache Store Module
//!
//! Main cache engine: a guarded map of serialized payloads with per-entry
//! timer-driven expiration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::Entry;
use crate::codec::{Decode, Encode};
use crate::error::Result;
use crate::tasks::spawn_removal;

// == Shared State ==
/// Map plus write-generation counter, shared between the store handle and its
/// spawned removal tasks. Every access goes through the owning mutex.
#[derive(Debug, Default)]
pub(crate) struct Inner {
    /// Key-value storage
    pub(crate) entries: HashMap<String, Entry>,
    /// Monotonic counter stamped on each write; lets a firing removal task
    /// prove the entry it was armed for has not been replaced
    pub(crate) next_generation: u64,
}

// == Cache Store ==
/// Concurrency-safe in-process key/value cache with optional per-entry
/// expiration.
///
/// Values serialize themselves through [`Encode`] on the way in and populate
/// a caller-supplied destination through [`Decode`] on the way out; the store
/// only ever holds opaque bytes. All operations take `&self` and are safe to
/// call from any number of threads; a single internal mutex linearizes them.
///
/// Timed entries are evicted by a background tokio timer task at their
/// deadline, so they disappear from [`get`](Store::get) and
/// [`len`](Store::len) even if nothing ever reads them again.
#[derive(Debug, Default)]
pub struct Store {
    inner: Arc<Mutex<Inner>>,
}

impl Store {
    // == Constructor ==
    /// Creates a new empty store.
    ///
    /// Stores are independent instances; create as many as needed.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("cache mutex poisoned")
    }

    // == Set ==
    /// Stores a value under `key` with no expiration.
    ///
    /// An existing entry at `key` is replaced wholesale; replacing a timed
    /// entry cancels its pending removal, so the new value is not evicted by
    /// the old timer. The empty string is a legal key.
    ///
    /// # Errors
    /// [`CacheError::Encoding`](crate::CacheError::Encoding) if `value` fails
    /// to serialize; the store is left unchanged for `key`.
    pub fn set<V: Encode>(&self, key: &str, value: &V) -> Result<()> {
        let payload = value.encode()?;

        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        inner
            .entries
            .insert(key.to_string(), Entry::new(payload, generation));
        Ok(())
    }

    // == Set With Timeout ==
    /// Stores a value under `key` that expires `timeout` from now.
    ///
    /// Same replacement contract as [`set`](Store::set). A removal task is
    /// armed for the deadline; arming it does not block the caller. A zero
    /// `timeout` stores the entry already expired: it is never observable
    /// through [`get`](Store::get) or [`len`](Store::len) and is swept at the
    /// first opportunity.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// [`CacheError::Encoding`](crate::CacheError::Encoding) if `value` fails
    /// to serialize; the store is left unchanged for `key` and no timer is
    /// armed.
    pub fn set_with_timeout<V: Encode>(
        &self,
        key: &str,
        value: &V,
        timeout: Duration,
    ) -> Result<()> {
        let payload = value.encode()?;
        let deadline = Instant::now() + timeout;

        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;

        let mut entry = Entry::with_deadline(payload, generation, deadline);
        entry.removal = Some(spawn_removal(
            Arc::downgrade(&self.inner),
            key.to_string(),
            generation,
            deadline,
        ));
        inner.entries.insert(key.to_string(), entry);
        Ok(())
    }

    // == Get ==
    /// Looks up `key` and decodes the stored payload into `dest`.
    ///
    /// Returns `Ok(false)` and leaves `dest` untouched when the key is
    /// absent or its deadline has passed, `Ok(true)` after a successful
    /// decode.
    ///
    /// # Errors
    /// [`CacheError::Decoding`](crate::CacheError::Decoding) if the stored
    /// bytes are not a valid encoding for `dest`. The entry stays in the
    /// store; a failed read never evicts.
    pub fn get<V: Decode>(&self, key: &str, dest: &mut V) -> Result<bool> {
        let inner = self.lock();
        let entry = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => entry,
            _ => return Ok(false),
        };
        dest.decode(&entry.payload)?;
        Ok(true)
    }

    // == Delete ==
    /// Removes the entry at `key`, canceling its pending removal if one is
    /// armed. Absent keys are a silent no-op; calling twice is safe.
    pub fn del(&self, key: &str) {
        self.lock().entries.remove(key);
    }

    // == Length ==
    /// Returns the number of live entries.
    ///
    /// Entries whose deadline has passed are excluded even if their removal
    /// task has not run yet.
    pub fn len(&self) -> usize {
        self.lock()
            .entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    // == Is Empty ==
    /// Returns true if the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

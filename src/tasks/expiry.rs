//! Scheduled Removal Task
//!
//! Background task that deletes one timed cache entry at its deadline.

use std::sync::{Mutex, Weak};

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::cache::Inner;

/// Spawns the removal task for one timed entry.
///
/// The task sleeps until `deadline`, then deletes the entry at `key` under
/// the store's guard, but only if the entry still carries `generation`. An
/// entry that was overwritten or deleted in the meantime carries a newer
/// generation (or is gone), and the task stands down, so a stale timer can
/// never evict a value written after it was armed.
///
/// The task holds only a weak reference to the store and exits quietly if the
/// store has been dropped by the time it fires. Dropping the entry aborts the
/// returned handle, which is how overwrite and delete cancel the timer on the
/// fast path; the generation check covers the case where the abort lands
/// after the sleep has already completed.
///
/// Removal is infallible, so the task has no error channel.
pub(crate) fn spawn_removal(
    store: Weak<Mutex<Inner>>,
    key: String,
    generation: u64,
    deadline: Instant,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;

        let Some(store) = store.upgrade() else {
            return;
        };
        let mut inner = store.lock().expect("cache mutex poisoned");

        let still_current = inner
            .entries
            .get(&key)
            .map_or(false, |entry| entry.generation == generation);
        if still_current {
            inner.entries.remove(&key);
            debug!(key = %key, "expired entry removed");
        } else {
            trace!(key = %key, "scheduled removal superseded, standing down");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::cache::Entry;

    fn inner_with_entry(key: &str, generation: u64, deadline: Instant) -> Arc<Mutex<Inner>> {
        let inner = Arc::new(Mutex::new(Inner::default()));
        inner.lock().unwrap().entries.insert(
            key.to_string(),
            Entry::with_deadline(b"somevalue".to_vec(), generation, deadline),
        );
        inner
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_deletes_matching_entry() {
        let deadline = Instant::now() + Duration::from_millis(5);
        let inner = inner_with_entry("volatile key", 1, deadline);

        let handle = spawn_removal(Arc::downgrade(&inner), "volatile key".to_string(), 1, deadline);
        handle.await.unwrap();

        assert!(inner.lock().unwrap().entries.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_stands_down_on_generation_mismatch() {
        let deadline = Instant::now() + Duration::from_millis(5);
        let inner = inner_with_entry("volatile key", 2, deadline);

        // Armed for generation 1, but the entry was rewritten as generation 2
        let handle = spawn_removal(Arc::downgrade(&inner), "volatile key".to_string(), 1, deadline);
        handle.await.unwrap();

        assert!(inner.lock().unwrap().entries.contains_key("volatile key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_stands_down_on_missing_entry() {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let deadline = Instant::now() + Duration::from_millis(5);

        let handle = spawn_removal(Arc::downgrade(&inner), "deleted key".to_string(), 1, deadline);
        handle.await.unwrap();

        assert!(inner.lock().unwrap().entries.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_exits_when_store_is_gone() {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let weak = Arc::downgrade(&inner);
        drop(inner);

        let handle = spawn_removal(weak, "orphan key".to_string(), 1, Instant::now());
        handle.await.unwrap();
    }
}

//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiry metadata.

use tokio::task::JoinHandle;
use tokio::time::Instant;

// == Cache Entry ==
/// One stored payload plus its expiration bookkeeping.
///
/// Dropping an entry aborts its pending removal task, so overwrite, explicit
/// delete, and store teardown all cancel outstanding timers without extra
/// ceremony.
#[derive(Debug)]
pub(crate) struct Entry {
    /// Opaque serialized payload, returned verbatim to the caller's decoder
    pub(crate) payload: Vec<u8>,
    /// Absolute deadline, None = never expires
    pub(crate) expires_at: Option<Instant>,
    /// Write generation stamped by the store; a firing removal task compares
    /// this against the generation it was armed with before deleting
    pub(crate) generation: u64,
    /// Handle to the pending scheduled removal, present only for timed entries
    pub(crate) removal: Option<JoinHandle<()>>,
}

impl Entry {
    // == Constructors ==
    /// Creates an untimed entry that never expires.
    pub(crate) fn new(payload: Vec<u8>, generation: u64) -> Self {
        Self {
            payload,
            expires_at: None,
            generation,
            removal: None,
        }
    }

    /// Creates a timed entry expiring at `expires_at`. The removal handle is
    /// attached by the store once the timer task has been spawned.
    pub(crate) fn with_deadline(payload: Vec<u8>, generation: u64, expires_at: Instant) -> Self {
        Self {
            payload,
            expires_at: Some(expires_at),
            generation,
            removal: None,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's deadline has passed.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its deadline, so a zero timeout is expired
    /// from the instant it is stored.
    pub(crate) fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        if let Some(handle) = self.removal.take() {
            handle.abort();
        }
    }
}

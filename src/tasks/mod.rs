//! Background Tasks Module
//!
//! Contains the asynchronous tasks spawned by the store.
//!
//! # Tasks
//! - Scheduled removal: deletes a timed entry once its deadline elapses

mod expiry;

pub(crate) use expiry::spawn_removal;

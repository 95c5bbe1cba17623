//! Memstore - An in-process key/value cache with per-entry TTL expiration.
//!
//! String keys map to opaque byte payloads. Values serialize themselves
//! through the [`Encode`] and [`Decode`] traits; built-in impls cover
//! `String` and `Vec<u8>`, and the [`Json`] adapter stores any serde type.
//! Timed entries are evicted by background timer tasks at their deadline.
//!
//! ```
//! use std::time::Duration;
//!
//! use memstore::Store;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> memstore::Result<()> {
//!     let store = Store::new();
//!
//!     store.set("mykey", &"somevalue".to_string())?;
//!     store.set_with_timeout("session", &"token".to_string(), Duration::from_secs(30))?;
//!
//!     let mut value = String::new();
//!     assert!(store.get("mykey", &mut value)?);
//!     assert_eq!(value, "somevalue");
//!
//!     store.del("mykey");
//!     assert_eq!(store.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod codec;
pub mod error;

mod tasks;

pub use cache::Store;
pub use codec::{Decode, Encode, Json};
pub use error::{CacheError, Result};

//! Value Codec Module
//!
//! The serialization boundary between callers and the store. Values are held
//! as opaque byte payloads; these two capabilities convert a caller's value
//! to and from that form. The store never inspects the bytes itself.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Encode ==
/// Serializes a value into the byte payload stored by the cache.
pub trait Encode {
    /// Returns the serialized form of `self`.
    ///
    /// # Errors
    /// [`CacheError::Encoding`] if the value cannot be serialized; the store
    /// is left unchanged when a write fails this way.
    fn encode(&self) -> Result<Vec<u8>>;
}

// == Decode ==
/// Populates a value in place from a stored byte payload.
pub trait Decode {
    /// Replaces the contents of `self` with the value encoded in `bytes`.
    ///
    /// # Errors
    /// [`CacheError::Decoding`] if `bytes` is not a valid encoding for this
    /// type. A failed decode leaves the stored entry untouched.
    fn decode(&mut self, bytes: &[u8]) -> Result<()>;
}

// == String ==
// UTF-8 text, stored as its raw bytes.
impl Encode for String {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Decode for String {
    fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(bytes).map_err(|e| CacheError::Decoding(e.to_string()))?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

// == Vec<u8> ==
// Raw bytes pass through unchanged in both directions.
impl Encode for Vec<u8> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl Decode for Vec<u8> {
    fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }
}

// == Json Adapter ==
/// Stores any serde type as its JSON encoding.
///
/// Wraps the inner value so arbitrary `Serialize`/`Deserialize` types can be
/// cached without a hand-written codec:
///
/// ```
/// use memstore::{Json, Store};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// # fn main() -> memstore::Result<()> {
/// let store = Store::new();
/// store.set("origin", &Json(Point { x: 3, y: 4 }))?;
///
/// let mut found = Json(Point::default());
/// assert!(store.get("origin", &mut found)?);
/// assert_eq!(found.0, Point { x: 3, y: 4 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Encode for Json<T> {
    fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(|e| CacheError::Encoding(e.to_string()))
    }
}

impl<T: DeserializeOwned> Decode for Json<T> {
    fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        self.0 = serde_json::from_slice(bytes).map_err(|e| CacheError::Decoding(e.to_string()))?;
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[test]
    fn test_string_round_trip() {
        let value = String::from("somevalue");
        let bytes = value.encode().unwrap();

        let mut decoded = String::new();
        decoded.decode(&bytes).unwrap();
        assert_eq!(decoded, "somevalue");
    }

    #[test]
    fn test_string_round_trip_unicode() {
        let value = String::from(")=IM()=UNY(Hf09riècg,àrgò");
        let bytes = value.encode().unwrap();

        let mut decoded = String::from("overwritten");
        decoded.decode(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_string_decode_invalid_utf8() {
        let mut dest = String::new();
        let result = dest.decode(&[0xff, 0xfe, 0xfd]);
        assert!(matches!(result, Err(CacheError::Decoding(_))));
    }

    #[test]
    fn test_bytes_round_trip() {
        let value: Vec<u8> = vec![0x00, 0xff, 0x10, 0x7f];
        let bytes = value.encode().unwrap();

        let mut decoded = vec![1, 2, 3];
        decoded.decode(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
    struct Session {
        user: String,
        visits: u32,
    }

    #[test]
    fn test_json_round_trip() {
        let value = Json(Session {
            user: "ada".to_string(),
            visits: 7,
        });
        let bytes = value.encode().unwrap();

        let mut decoded = Json(Session::default());
        decoded.decode(&bytes).unwrap();
        assert_eq!(decoded.0, value.0);
    }

    #[test]
    fn test_json_decode_mismatched_payload() {
        let mut dest = Json(Session::default());
        let result = dest.decode(b"not json at all");
        assert!(matches!(result, Err(CacheError::Decoding(_))));
    }
}

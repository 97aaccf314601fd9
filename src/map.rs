use crate::coerce::Coerce;
use crate::error::{DecodeError, MapError};
use crate::value::{Object, Value};
use serde::Deserialize;
use std::str::FromStr;

/// Separator between segments of a dotted path
pub const PATH_SEPARATOR: char = '.';

/// A loosely-typed key/value map read from a JSON object
///
/// Values keep whatever shape the document gave them. The typed getters
/// coerce on the way out, so `"2020"` reads as an integer and `1` reads as
/// `true`. Nothing read through a getter is ever written back.
///
/// # Examples
///
/// ```
/// use livemap::{LiveMap, DecodeError};
///
/// let map = LiveMap::from_bytes(br#"{"age": 29, "year": "2020", "user": {"name": "mirkowang"}}"#)?;
///
/// assert_eq!(map.get_int("age"), Some(29));
/// assert_eq!(map.get_int("year"), Some(2020));
/// assert_eq!(map.get_string("age").as_deref(), Some("29"));
/// assert_eq!(map.get_string("user.name").as_deref(), Some("mirkowang"));
/// assert!(map.get_live_map("user.name").is_none());
/// # Ok::<(), DecodeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveMap {
    entries: Object,
}

impl LiveMap {
    /// Wraps an existing mapping without copying or validating it
    pub fn new(entries: Object) -> Self {
        Self { entries }
    }

    /// Decodes a JSON object document into a new map
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if `bytes` is not valid JSON or if the top-level
    /// value is not an object.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_object(bytes).map(Self::new)
    }

    /// Decodes a JSON object document and merges it into this map
    ///
    /// Top-level keys from the payload replace existing ones; other keys are
    /// left alone. The payload is decoded in full before anything is merged,
    /// so on error the map is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` under the same conditions as [`LiveMap::from_bytes`].
    pub fn read(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let decoded = decode_object(bytes)?;
        self.entries.extend(decoded);
        Ok(())
    }

    /// Looks up a single key, without path resolution
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Resolves a dotted path to the raw value it names
    ///
    /// Each segment before the last must name an object. The last segment is
    /// returned as stored, whatever its kind. Empty segments are ordinary
    /// keys, so `"a."` looks for the key `""` inside `a`.
    ///
    /// # Errors
    ///
    /// - Returns `MapError::KeyNotFound` with the first missing segment
    /// - Returns `MapError::NotAContainer` if a non-final segment holds a
    ///   scalar or an array
    pub fn lookup(&self, path: &str) -> Result<&Value, MapError> {
        let (parents, last) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut current = &self.entries;
        for segment in parents.into_iter().flat_map(|p| p.split(PATH_SEPARATOR)) {
            current = match current.get(segment) {
                Some(Value::Object(object)) => object,
                Some(other) => {
                    tracing::trace!(path, segment, found = other.type_name(), "path stops at non-object");
                    return Err(MapError::NotAContainer {
                        key: segment.to_string(),
                        found: other.type_name(),
                    });
                }
                None => {
                    tracing::trace!(path, segment, "path segment not found");
                    return Err(MapError::KeyNotFound(segment.to_string()));
                }
            };
        }

        current
            .get(last)
            .ok_or_else(|| MapError::KeyNotFound(last.to_string()))
    }

    /// Resolves a dotted path and coerces the value into `T`
    ///
    /// Unlike the `get_*` family this reports why a read failed. Integer
    /// coercion of an unparsable string still yields `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Any error from [`LiveMap::lookup`], or a coercion error.
    pub fn try_get<T: Coerce>(&self, path: &str) -> Result<T, MapError> {
        self.lookup(path)?.coerce()
    }

    /// Reads an integer stored directly under `key`
    ///
    /// Returns `None` only when the key is absent. A value that cannot be
    /// converted reads as `Some(0)`.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        let value = self.entries.get(key)?;
        match value.coerce::<i64>() {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::trace!(key, error = %e, "integer coercion failed, reading as 0");
                Some(0)
            }
        }
    }

    /// Reads a string at a dotted path
    ///
    /// Returns `None` when the path does not resolve or the value has no
    /// string form.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.lookup(key).ok()?.coerce().ok()
    }

    /// Reads a float stored directly under `key`
    ///
    /// Returns `None` when the key is absent or the value does not convert.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.entries.get(key)?.coerce().ok()
    }

    /// Reads a boolean stored directly under `key`
    ///
    /// Returns `None` when the key is absent or the value does not convert.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.entries.get(key)?.coerce().ok()
    }

    /// Returns the object at a dotted path as a map of its own
    ///
    /// The result is an independent copy. Use [`LiveMap::lookup`] to borrow
    /// the nested object instead.
    pub fn get_live_map(&self, key: &str) -> Option<LiveMap> {
        match self.lookup(key).ok()? {
            Value::Object(object) => Some(LiveMap::new(object.clone())),
            _ => None,
        }
    }

    /// Returns true if `key` is present at the top level
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the top-level keys, in no particular order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows the underlying mapping
    pub fn as_object(&self) -> &Object {
        &self.entries
    }

    /// Consumes the map and returns the underlying mapping
    pub fn into_inner(self) -> Object {
        self.entries
    }
}

/// Decodes a top-level object with no nesting limit
///
/// The stack grows on demand while decoding, so depth is bounded only by
/// memory.
fn decode_object(bytes: &[u8]) -> Result<Object, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    deserializer.disable_recursion_limit();

    let decoded = Object::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .and_then(|object| deserializer.end().map(|()| object));

    match decoded {
        Ok(object) => {
            tracing::debug!(bytes = bytes.len(), entries = object.len(), "decoded document");
            Ok(object)
        }
        Err(e) => {
            tracing::debug!(bytes = bytes.len(), error = %e, "failed to decode document");
            Err(DecodeError::from(e))
        }
    }
}

impl From<Object> for LiveMap {
    fn from(entries: Object) -> Self {
        Self::new(entries)
    }
}

impl From<LiveMap> for Object {
    fn from(map: LiveMap) -> Self {
        map.into_inner()
    }
}

impl From<LiveMap> for Value {
    fn from(map: LiveMap) -> Self {
        Value::Object(map.into_inner())
    }
}

impl TryFrom<&[u8]> for LiveMap {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl FromStr for LiveMap {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LiveMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

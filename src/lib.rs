//! # livemap
//!
//! A loosely-typed key/value map decoded from JSON, read as if it were typed.
//!
//! `livemap` is for data that arrives without a schema, such as decoded
//! configuration files or API responses. The stored values often do not
//! quite match what the caller expects: a number may come as a string, or a
//! flag as `0`/`1`. Instead of failing, [`LiveMap`] coerces the stored value
//! into the requested type when it is read.
//!
//! ## Key Features
//!
//! - **Coercing getters**: `get_int`, `get_string`, `get_float`, `get_bool`
//! - **Dotted paths**: `get_string("user.name")` walks nested objects
//! - **Nested maps**: `get_live_map("user")` hands out a sub-object as a map
//! - **Explicit errors when wanted**: `try_get` reports why a read failed
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use livemap::{LiveMap, DecodeError};
//!
//! fn main() -> Result<(), DecodeError> {
//!     let map = LiveMap::from_bytes(br#"{
//!         "hello": "world",
//!         "age": 29,
//!         "year": "2020",
//!         "weight": 60.3,
//!         "good": true
//!     }"#)?;
//!
//!     assert_eq!(map.get_int("age"), Some(29));
//!     assert_eq!(map.get_int("year"), Some(2020));
//!     assert_eq!(map.get_string("weight").as_deref(), Some("60.3"));
//!     assert_eq!(map.get_float("weight"), Some(60.3));
//!     assert_eq!(map.get_bool("good"), Some(true));
//!
//!     // Absent keys read as None for every getter
//!     assert_eq!(map.get_int("missing"), None);
//!     assert_eq!(map.get_bool("missing"), None);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Nested Documents
//!
//! ```rust
//! use livemap::{LiveMap, DecodeError};
//!
//! fn main() -> Result<(), DecodeError> {
//!     let map: LiveMap = r#"{"user": {"name": "mirkowang", "id": 7}}"#.parse()?;
//!
//!     assert_eq!(map.get_string("user.name").as_deref(), Some("mirkowang"));
//!     assert_eq!(map.get_string("user.missing"), None);
//!
//!     // Only get_string and get_live_map understand paths
//!     let user = map.get_live_map("user").expect("user is an object");
//!     assert_eq!(user.get_int("id"), Some(7));
//!     assert_eq!(map.get_int("user.id"), None);
//!
//!     // A scalar is not a map
//!     assert!(map.get_live_map("user.name").is_none());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Merging Payloads
//!
//! ```rust
//! use livemap::{LiveMap, DecodeError};
//!
//! let mut settings = LiveMap::default();
//! settings.read(br#"{"port": "8080", "debug": 0}"#)?;
//! settings.read(br#"{"debug": "true"}"#)?;
//!
//! assert_eq!(settings.get_int("port"), Some(8080));
//! assert_eq!(settings.get_bool("debug"), Some(true));
//!
//! // A bad payload leaves the map as it was
//! assert!(settings.read(b"[\"not\", \"an\", \"object\"]").is_err());
//! assert_eq!(settings.len(), 2);
//! # Ok::<(), DecodeError>(())
//! ```
//!
//! ### Error Handling
//!
//! The `get_*` getters answer with `Option`. Their failure contract differs
//! by type: `get_int` reads a present but unconvertible value as `Some(0)`,
//! while the other getters return `None`. Use [`LiveMap::try_get`] to find
//! out what went wrong.
//!
//! ```rust
//! use livemap::{LiveMap, MapError};
//!
//! let map = LiveMap::from_bytes(br#"{"tags": ["a"], "ratio": "n/a"}"#).unwrap();
//!
//! assert_eq!(map.get_int("tags"), Some(0));
//! assert_eq!(map.get_float("ratio"), None);
//!
//! match map.try_get::<f64>("ratio") {
//!     Ok(ratio) => println!("ratio: {}", ratio),
//!     Err(MapError::KeyNotFound(key)) => println!("no such key: {}", key),
//!     Err(MapError::InvalidLiteral { literal, .. }) => println!("not a number: {}", literal),
//!     Err(e) => println!("other error: {}", e),
//! }
//! ```

mod coerce;
mod error;
mod map;
mod value;

pub use coerce::{format_float, Coerce, Scalar};
pub use error::{DecodeError, MapError};
pub use map::{LiveMap, PATH_SEPARATOR};
pub use value::{Object, Value};

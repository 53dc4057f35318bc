//! Strict JSON request body decoding
//!
//! [`decode`] turns a request body into a caller-supplied type and translates
//! every failure into a message that can be shown to an API client as-is:
//!
//! - at most [`MAX_BODY_BYTES`] bytes are accepted
//! - exactly one JSON value must be present
//! - unknown fields are rejected at any depth, whatever serde attributes the
//!   destination type carries
//! - a top-level array never fills a struct
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct NewItem {
//!     name: String,
//! }
//!
//! let item: NewItem = reqkit::json::decode(br#"{"name": "widget"}"#).unwrap();
//! assert_eq!(item.name, "widget");
//!
//! let err = reqkit::json::decode::<NewItem>(br#"{"name": "a"} {"name": "b"}"#).unwrap_err();
//! assert_eq!(err.to_string(), "body must only contain a single JSON value");
//!
//! let err = reqkit::json::decode::<NewItem>(br#"{"name": "a", "extra": 1}"#).unwrap_err();
//! assert_eq!(err.to_string(), r#"body contains unknown key "extra""#);
//! ```

mod decode;
mod extract;
mod utils;

pub use decode::{JsonError, decode, decode_with_limit};
pub use extract::{BodyLimit, StrictJson, read_json_body};
pub use utils::parse_content_type;

/// Default request body limit (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

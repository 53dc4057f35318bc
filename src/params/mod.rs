//! Route and query parameter readers
//!
//! Every reader takes a [`ParamSource`], a key and a default, and returns a
//! [`Parsed`] carrying the typed value, whether the key was present, and the
//! conversion error if there was one. Readers never fail hard: a malformed
//! value still yields the default so a handler can decide whether to reject
//! the request or carry on.
//!
//! ```
//! use std::collections::HashMap;
//! use reqkit::params::{read_int, read_csv};
//!
//! let mut qs = HashMap::new();
//! qs.insert("page".to_string(), "3".to_string());
//! qs.insert("tags".to_string(), "a,b".to_string());
//!
//! assert_eq!(read_int(&qs, "page", 1).value, 3);
//! assert_eq!(read_csv(&qs, "tags", vec![]).value, vec!["a", "b"]);
//! assert!(!read_int(&qs, "limit", 20).present);
//! ```

mod error;
mod query;
mod route;
mod source;

pub use error::ParamError;
pub use query::{read_bool, read_csv, read_float, read_int, read_string};
pub use route::{
    DEFAULT_ROUTE_KEY, read_id, read_null_uuid, read_null_uuid_by_key, read_optional_uuid_by_key,
    read_uuid, read_uuid_by_key,
};
pub use source::{ParamSource, QueryParams};

/// Outcome of reading one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    /// The key exists in the source, regardless of its content.
    pub present: bool,
    pub error: Option<ParamError>,
}

impl<T> Parsed<T> {
    pub(crate) fn absent(default: T) -> Self {
        Self {
            value: default,
            present: false,
            error: None,
        }
    }

    pub(crate) fn found(value: T) -> Self {
        Self {
            value,
            present: true,
            error: None,
        }
    }

    pub(crate) fn invalid(default: T, error: ParamError) -> Self {
        tracing::debug!(key = error.key(), %error, "rejected parameter");
        Self {
            value: default,
            present: true,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drops the presence flag and surfaces the error, if any.
    pub fn into_result(self) -> Result<T, ParamError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            present: self.present,
            error: self.error,
        }
    }
}

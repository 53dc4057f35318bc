use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use axum::extract::{Query, RawPathParams};
use axum::http::Uri;

/// Anything parameters can be looked up in.
///
/// Route parameters can tell a declared-but-empty segment apart from a missing
/// one; query strings usually can't, so implementations only promise that
/// `get` returns `Some` for keys they know about.
pub trait ParamSource {
    fn get(&self, key: &str) -> Option<&str>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl ParamSource for RawPathParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Decoded query string of a request.
///
/// Repeated keys keep the last value, matching axum's `Query<HashMap<_, _>>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Decodes the query component of `uri`. A malformed query string decodes
    /// as empty: every reader then falls back to its default.
    pub fn from_uri(uri: &Uri) -> Self {
        match Query::<HashMap<String, String>>::try_from_uri(uri) {
            Ok(Query(map)) => Self(map),
            Err(err) => {
                tracing::debug!(%err, "ignoring undecodable query string");
                Self::default()
            }
        }
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}

impl ParamSource for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

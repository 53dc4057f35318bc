//! Response envelope
//!
//! Handlers wrap their payloads in a named key rather than returning bare
//! values, e.g. `{"item": {...}}` or `{"error": {...}}`.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("envelope value for {key:?} is not serializable: {source}")]
pub struct EnvelopeError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

/// Ordered key/value wrapper; keys serialize in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(BTreeMap<String, Value>);

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<(), EnvelopeError> {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.0.insert(key, value);
                Ok(())
            }
            Err(source) => Err(EnvelopeError { key, source }),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Result<Self, EnvelopeError> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn marshal(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }
}

impl From<BTreeMap<String, Value>> for Envelope {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self(value)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{key} must be an integer value")]
    NotInteger { key: String },
    #[error("{key} must be a float value")]
    NotFloat { key: String },
    /// Route-style failure used for ids and UUIDs.
    #[error("invalid {key} parameter")]
    Invalid { key: String },
}

impl ParamError {
    pub fn key(&self) -> &str {
        match self {
            ParamError::NotInteger { key }
            | ParamError::NotFloat { key }
            | ParamError::Invalid { key } => key,
        }
    }
}

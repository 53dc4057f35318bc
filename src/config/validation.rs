use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("limits.max_body_bytes must be positive")]
    ZeroBodyLimit,

    #[error("database.{field} must not be empty")]
    EmptyDatabaseField { field: &'static str },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.limits.max_body_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroBodyLimit);
    }

    let db = &config.database;
    for (field, value) in [("driver", &db.driver), ("host", &db.host)] {
        if value.is_empty() {
            return Err(ValidationError::EmptyDatabaseField { field });
        }
    }

    Ok(())
}

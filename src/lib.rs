pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod humanize;
pub mod json;
pub mod membership;
pub mod params;

pub use envelope::Envelope;
pub use error::ApiError;
pub use json::StrictJson;

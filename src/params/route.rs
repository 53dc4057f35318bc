//! Id and UUID readers, mostly used for route parameters.

use uuid::Uuid;

use super::{ParamError, ParamSource, Parsed};

/// Key used when a route reader is given an empty key name.
pub const DEFAULT_ROUTE_KEY: &str = "id";

fn route_key(key: &str) -> &str {
    if key.is_empty() { DEFAULT_ROUTE_KEY } else { key }
}

fn parse_uuid(s: &str) -> Option<Uuid> {
    if s.is_empty() {
        return None;
    }
    Uuid::parse_str(s).ok()
}

fn invalid(key: &str) -> ParamError {
    ParamError::Invalid {
        key: key.to_owned(),
    }
}

pub fn read_uuid<P>(source: &P, key: &str, default: Uuid) -> Parsed<Uuid>
where
    P: ParamSource + ?Sized,
{
    match source.get(key) {
        None => Parsed::absent(default),
        Some(s) => match parse_uuid(s) {
            Some(id) => Parsed::found(id),
            None => Parsed::invalid(default, invalid(key)),
        },
    }
}

/// Like [`read_uuid`] but `None` stands for an explicit null.
pub fn read_null_uuid<P>(source: &P, key: &str, default: Option<Uuid>) -> Parsed<Option<Uuid>>
where
    P: ParamSource + ?Sized,
{
    match source.get(key) {
        None => Parsed::absent(default),
        Some(s) => match parse_uuid(s) {
            Some(id) => Parsed::found(Some(id)),
            None => Parsed::invalid(default, invalid(key)),
        },
    }
}

/// Reads the `id` route parameter as a positive integer.
pub fn read_id<P>(source: &P) -> Result<i64, ParamError>
where
    P: ParamSource + ?Sized,
{
    source
        .get(DEFAULT_ROUTE_KEY)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id >= 1)
        .ok_or_else(|| invalid(DEFAULT_ROUTE_KEY))
}

/// Required UUID route parameter. An empty `key` means `"id"`.
pub fn read_uuid_by_key<P>(source: &P, key: &str) -> Result<Uuid, ParamError>
where
    P: ParamSource + ?Sized,
{
    let key = route_key(key);
    source
        .get(key)
        .and_then(parse_uuid)
        .ok_or_else(|| invalid(key))
}

/// Optional UUID route parameter: missing or empty yields the nil UUID.
pub fn read_optional_uuid_by_key<P>(source: &P, key: &str) -> Result<Uuid, ParamError>
where
    P: ParamSource + ?Sized,
{
    let key = route_key(key);
    match source.get(key) {
        None | Some("") => Ok(Uuid::nil()),
        Some(s) => parse_uuid(s).ok_or_else(|| invalid(key)),
    }
}

/// Required UUID route parameter returned in nullable form.
pub fn read_null_uuid_by_key<P>(source: &P, key: &str) -> Result<Option<Uuid>, ParamError>
where
    P: ParamSource + ?Sized,
{
    let key = route_key(key);
    source
        .get(key)
        .and_then(parse_uuid)
        .map(Some)
        .ok_or_else(|| invalid(key))
}

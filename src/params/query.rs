//! Scalar readers, mostly used for query strings.

use super::{ParamError, ParamSource, Parsed};

const TRUE_TOKENS: [&str; 4] = ["true", "t", "y", "1"];
const FALSE_TOKENS: [&str; 4] = ["false", "f", "n", "0"];

/// Reads a string; an empty value yields `default`.
pub fn read_string<P>(source: &P, key: &str, default: &str) -> Parsed<String>
where
    P: ParamSource + ?Sized,
{
    match source.get(key) {
        None => Parsed::absent(default.to_owned()),
        Some("") => Parsed::found(default.to_owned()),
        Some(s) => Parsed::found(s.to_owned()),
    }
}

/// Reads a boolean from one of the literal tokens `true/t/y/1` or
/// `false/f/n/0` (case-sensitive).
///
/// Anything else yields `default` without an error.
pub fn read_bool<P>(source: &P, key: &str, default: bool) -> Parsed<bool>
where
    P: ParamSource + ?Sized,
{
    let Some(s) = source.get(key) else {
        return Parsed::absent(default);
    };

    if TRUE_TOKENS.contains(&s) {
        Parsed::found(true)
    } else if FALSE_TOKENS.contains(&s) {
        Parsed::found(false)
    } else {
        Parsed::found(default)
    }
}

/// Splits a comma separated value. Items are not trimmed.
pub fn read_csv<P>(source: &P, key: &str, default: Vec<String>) -> Parsed<Vec<String>>
where
    P: ParamSource + ?Sized,
{
    match source.get(key) {
        None => Parsed::absent(default),
        Some("") => Parsed::found(default),
        Some(s) => Parsed::found(s.split(',').map(str::to_owned).collect()),
    }
}

pub fn read_int<P>(source: &P, key: &str, default: i64) -> Parsed<i64>
where
    P: ParamSource + ?Sized,
{
    let Some(s) = source.get(key) else {
        return Parsed::absent(default);
    };

    match s.parse::<i64>() {
        Ok(value) => Parsed::found(value),
        Err(_) => Parsed::invalid(default, ParamError::NotInteger { key: key.to_owned() }),
    }
}

/// Parses with full `f64` precision; `"0.1"` is the nearest double to 0.1,
/// not a widened single-precision value.
pub fn read_float<P>(source: &P, key: &str, default: f64) -> Parsed<f64>
where
    P: ParamSource + ?Sized,
{
    let Some(s) = source.get(key) else {
        return Parsed::absent(default);
    };

    match s.parse::<f64>() {
        Ok(value) => Parsed::found(value),
        Err(_) => Parsed::invalid(default, ParamError::NotFloat { key: key.to_owned() }),
    }
}

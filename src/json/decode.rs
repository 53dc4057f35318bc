use std::fmt;

use serde::de::{self, DeserializeOwned};
use serde_json::error::Category;
use thiserror::Error;

use super::MAX_BODY_BYTES;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    #[error("body contains badly-formed JSON (at character {0})")]
    Syntax(usize),
    #[error("body contains badly-formed JSON")]
    Truncated,
    #[error("body contains incorrect JSON type for field {0:?}")]
    FieldType(String),
    #[error("body contains incorrect JSON type (at character {0})")]
    Type(usize),
    #[error("body must not be empty")]
    Empty,
    #[error("body contains unknown key {0:?}")]
    UnknownField(String),
    #[error("body must not be larger than {0} bytes")]
    TooLarge(usize),
    #[error("body must only contain a single JSON value")]
    MultipleValues,
    #[error("{0}")]
    Other(String),
}

/// Decodes `body` with the default [`MAX_BODY_BYTES`] limit.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, JsonError> {
    decode_with_limit(body, MAX_BODY_BYTES)
}

pub fn decode_with_limit<T: DeserializeOwned>(body: &[u8], limit: usize) -> Result<T, JsonError> {
    if body.len() > limit {
        return Err(JsonError::TooLarge(limit));
    }

    // serde lets a derived struct be filled from an array; a JSON API does not.
    let array_at = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .filter(|&pos| body[pos] == b'[');
    if let Some(pos) = array_at.filter(|_| expects_struct::<T>()) {
        return Err(JsonError::Type(pos + 1));
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let mut unknown = None;
    let result: Result<T, _> = serde_ignored::deserialize(&mut de, |path| {
        unknown.get_or_insert_with(|| path.to_string());
    });

    if let Some(path) = unknown {
        return Err(JsonError::UnknownField(path));
    }
    let value = result.map_err(|err| classify(&err, body))?;

    // Anything but trailing whitespace after the first value is rejected.
    de.end().map_err(|_| JsonError::MultipleValues)?;

    Ok(value)
}

fn classify(err: &serde_json::Error, body: &[u8]) -> JsonError {
    let offset = byte_offset(body, err.line(), err.column());

    match err.classify() {
        Category::Eof if body.iter().all(u8::is_ascii_whitespace) => JsonError::Empty,
        Category::Eof => JsonError::Truncated,
        Category::Syntax => JsonError::Syntax(offset),
        Category::Data => {
            let message = err.to_string();
            if let Some(field) = unknown_field(&message) {
                JsonError::UnknownField(field)
            } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
                match field_path_before(body, offset) {
                    Some(field) => JsonError::FieldType(field),
                    None => JsonError::Type(offset),
                }
            } else {
                JsonError::Other(message)
            }
        }
        Category::Io => JsonError::Other(err.to_string()),
    }
}

/// Converts serde_json's 1-based line and byte column into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (preceding + column).min(body.len())
}

// serde reports "unknown field `name`, expected one of ..."
fn unknown_field(message: &str) -> Option<String> {
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_owned())
}

/// Dotted path of object keys (`inner.n`) enclosing `offset`, i.e. the
/// field whose value the decoder was looking at when it failed. Array
/// levels are skipped, so `{"items": [{"n": "x"}]}` yields `items.n`.
fn field_path_before(body: &[u8], offset: usize) -> Option<String> {
    enum Frame {
        Object(Option<String>),
        Array,
    }

    let prefix = &body[..offset.min(body.len())];
    let mut stack: Vec<Frame> = Vec::new();
    let mut i = 0;

    while i < prefix.len() {
        match prefix[i] {
            b'{' => stack.push(Frame::Object(None)),
            b'[' => stack.push(Frame::Array),
            b'}' | b']' => {
                stack.pop();
            }
            b'"' => {
                let start = i;
                let mut end = start + 1;
                while end < prefix.len() && prefix[end] != b'"' {
                    if prefix[end] == b'\\' {
                        end += 1;
                    }
                    end += 1;
                }
                if end >= prefix.len() {
                    break;
                }

                let is_key = prefix[end + 1..]
                    .iter()
                    .find(|b| !b.is_ascii_whitespace())
                    .is_some_and(|b| *b == b':');
                if let (true, Some(Frame::Object(key))) = (is_key, stack.last_mut()) {
                    *key = Some(unescape_key(&prefix[start..=end]));
                }
                i = end;
            }
            _ => {}
        }
        i += 1;
    }

    let path: Vec<&str> = stack
        .iter()
        .filter_map(|frame| match frame {
            Frame::Object(Some(key)) => Some(key.as_str()),
            _ => None,
        })
        .collect();

    if path.is_empty() { None } else { Some(path.join(".")) }
}

fn unescape_key(quoted: &[u8]) -> String {
    serde_json::from_slice::<String>(quoted).unwrap_or_else(|_| {
        String::from_utf8_lossy(&quoted[1..quoted.len() - 1]).into_owned()
    })
}

/// Whether `T` asks the deserializer for a struct (named fields).
fn expects_struct<T: DeserializeOwned>() -> bool {
    matches!(T::deserialize(ShapeQuery), Err(Shape::Struct))
}

struct ShapeQuery;

#[derive(Debug)]
enum Shape {
    Struct,
    Other,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("shape query")
    }
}

impl std::error::Error for Shape {}

impl de::Error for Shape {
    fn custom<M: fmt::Display>(_msg: M) -> Self {
        Shape::Other
    }
}

impl<'de> de::Deserializer<'de> for ShapeQuery {
    type Error = Shape;

    fn deserialize_any<V: de::Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Shape> {
        Err(Shape::Other)
    }

    fn deserialize_struct<V: de::Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Shape> {
        Err(Shape::Struct)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Item {
        name: String,
        #[serde(default)]
        count: u8,
    }

    #[test]
    fn decodes_single_value() {
        let item: Item = decode(br#" {"name": "widget", "count": 3}  "#).unwrap();
        assert_eq!(
            item,
            Item {
                name: "widget".into(),
                count: 3
            }
        );
    }

    #[test]
    fn rejects_concatenated_values() {
        let err = decode::<Item>(br#"{"name":"a"}{"name":"b"}"#).unwrap_err();
        assert_eq!(err, JsonError::MultipleValues);
        assert_eq!(err.to_string(), "body must only contain a single JSON value");

        let err = decode::<Item>(br#"{"name":"a"} trailing"#).unwrap_err();
        assert_eq!(err, JsonError::MultipleValues);
    }

    #[test]
    fn rejects_empty_body() {
        assert_eq!(decode::<Item>(b"").unwrap_err(), JsonError::Empty);
        assert_eq!(decode::<Item>(b"  \n ").unwrap_err(), JsonError::Empty);
        assert_eq!(
            decode::<Item>(b"").unwrap_err().to_string(),
            "body must not be empty"
        );
    }

    #[test]
    fn truncated_body_is_badly_formed() {
        let err = decode::<Item>(br#"{"name": "wid"#).unwrap_err();
        assert_eq!(err, JsonError::Truncated);
        assert_eq!(err.to_string(), "body contains badly-formed JSON");
    }

    #[test]
    fn syntax_error_reports_offset() {
        let err = decode::<Item>(br#"{"name":}"#).unwrap_err();
        assert_eq!(err, JsonError::Syntax(9));
        assert_eq!(
            err.to_string(),
            "body contains badly-formed JSON (at character 9)"
        );
    }

    #[test]
    fn syntax_offset_spans_lines() {
        let body = b"{\n  \"name\": x\n}";
        assert_eq!(decode::<Item>(body).unwrap_err(), JsonError::Syntax(13));
    }

    #[test]
    fn type_mismatch_names_the_field() {
        let err = decode::<Item>(br#"{"name": 42}"#).unwrap_err();
        assert_eq!(err, JsonError::FieldType("name".into()));
        assert_eq!(
            err.to_string(),
            r#"body contains incorrect JSON type for field "name""#
        );

        let err = decode::<Item>(br#"{"name": "a", "count": 300}"#).unwrap_err();
        assert_eq!(err, JsonError::FieldType("count".into()));
    }

    #[test]
    fn type_mismatch_without_field_reports_offset() {
        let err = decode::<Item>(br#""just a string""#).unwrap_err();
        assert!(matches!(err, JsonError::Type(_)));
        assert!(
            err.to_string()
                .starts_with("body contains incorrect JSON type (at character")
        );
    }

    #[test]
    fn unknown_field_is_named() {
        let err = decode::<Item>(br#"{"name": "a", "colour": "red"}"#).unwrap_err();
        assert_eq!(err, JsonError::UnknownField("colour".into()));
        assert_eq!(err.to_string(), r#"body contains unknown key "colour""#);
    }

    #[test]
    fn other_data_errors_pass_through() {
        let err = decode::<Item>(br#"{"count": 1}"#).unwrap_err();
        assert!(matches!(err, JsonError::Other(ref m) if m.starts_with("missing field `name`")));
    }

    #[test]
    fn oversized_body_reports_limit() {
        let body = vec![b' '; MAX_BODY_BYTES + 1];
        let err = decode::<Item>(&body).unwrap_err();
        assert_eq!(err.to_string(), "body must not be larger than 1048576 bytes");

        let err = decode_with_limit::<Item>(br#"{"name": "abc"}"#, 4).unwrap_err();
        assert_eq!(err, JsonError::TooLarge(4));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Plain {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    #[derive(Debug, Deserialize)]
    struct Inner {
        #[allow(dead_code)]
        n: u32,
    }

    #[test]
    fn unknown_field_rejected_without_serde_attribute() {
        let err = decode::<Plain>(br#"{"name":"a","extra":1}"#).unwrap_err();
        assert_eq!(err, JsonError::UnknownField("extra".into()));
        assert_eq!(err.to_string(), r#"body contains unknown key "extra""#);

        let err = decode::<Outer>(br#"{"inner": {"n": 1, "m": 2}}"#).unwrap_err();
        assert_eq!(err, JsonError::UnknownField("inner.m".into()));

        assert_eq!(
            decode::<Plain>(br#"{"name":"a"}"#).unwrap(),
            Plain { name: "a".into() }
        );
    }

    #[test]
    fn array_is_not_a_struct() {
        let err = decode::<Item>(br#"["a", 3]"#).unwrap_err();
        assert_eq!(err, JsonError::Type(1));

        let err = decode::<Plain>(b"  [\"a\"]").unwrap_err();
        assert_eq!(err, JsonError::Type(3));

        let values: Vec<u8> = decode(b"[1, 2]").unwrap();
        assert_eq!(values, vec![1, 2]);
        let tuple: (String, u8) = decode(br#"["a", 3]"#).unwrap();
        assert_eq!(tuple, ("a".into(), 3));
    }

    #[test]
    fn nested_type_mismatch_reports_dotted_path() {
        let err = decode::<Outer>(br#"{"inner": {"n": "x"}}"#).unwrap_err();
        assert_eq!(err, JsonError::FieldType("inner.n".into()));
    }

    #[test]
    fn field_path_skips_closed_objects_and_string_values() {
        let body = br#"{"a": "x\":y", "b": 1"#;
        assert_eq!(field_path_before(body, body.len()), Some("b".into()));

        let body = br#"{"inner": {"n": 1}, "m": "#;
        assert_eq!(field_path_before(body, body.len()), Some("m".into()));

        let body = br#"{"items": [{"n": "#;
        assert_eq!(field_path_before(body, body.len()), Some("items.n".into()));

        assert_eq!(field_path_before(br#"[1, 2"#, 5), None);
    }

    #[test]
    fn escaped_keys_are_unescaped() {
        let err = decode::<Item>(br#"{"n\u0061me": 42}"#).unwrap_err();
        assert_eq!(err, JsonError::FieldType("name".into()));
    }
}

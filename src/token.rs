use crate::error::{JsonError, JsonResult};

/// One lexical unit of a JSON document, as exposed by
/// [`JsonReader`](crate::JsonReader).
///
/// `Number` carries the literal text from the document rather than a parsed
/// value, so that buffering a subtree reproduces the source text exactly and
/// integers wider than an f64 mantissa survive the token layer. Coercion to
/// concrete numeric types happens in the reader's accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonToken {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    String(String),
    Number(String),
    Boolean(bool),
    Null,
}

impl JsonToken {
    /// The canonical text of this token, as used by subtree buffering.
    /// String-like tokens yield their value without quotes.
    pub fn text(&self) -> &str {
        match self {
            JsonToken::StartObject => "{",
            JsonToken::EndObject => "}",
            JsonToken::StartArray => "[",
            JsonToken::EndArray => "]",
            JsonToken::FieldName(name) => name,
            JsonToken::String(s) => s,
            JsonToken::Number(text) => text,
            JsonToken::Boolean(true) => "true",
            JsonToken::Boolean(false) => "false",
            JsonToken::Null => "null",
        }
    }

    pub fn is_container_open(&self) -> bool {
        matches!(self, JsonToken::StartObject | JsonToken::StartArray)
    }

    pub fn is_container_close(&self) -> bool {
        matches!(self, JsonToken::EndObject | JsonToken::EndArray)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            JsonToken::StartObject => "StartObject",
            JsonToken::EndObject => "EndObject",
            JsonToken::StartArray => "StartArray",
            JsonToken::EndArray => "EndArray",
            JsonToken::FieldName(_) => "FieldName",
            JsonToken::String(_) => "String",
            JsonToken::Number(_) => "Number",
            JsonToken::Boolean(_) => "Boolean",
            JsonToken::Null => "Null",
        }
    }

    pub(crate) fn as_f64(&self) -> JsonResult<f64> {
        match self {
            JsonToken::Number(text) => parse_value(text, "f64"),
            JsonToken::String(s) => parse_value(s, "f64"),
            other => Err(mismatch("a numeric value", other)),
        }
    }

    pub(crate) fn as_i64(&self) -> JsonResult<i64> {
        match self {
            JsonToken::Number(text) => parse_value(text, "i64"),
            JsonToken::String(s) => parse_value(s, "i64"),
            other => Err(mismatch("a numeric value", other)),
        }
    }

    pub(crate) fn as_i32(&self) -> JsonResult<i32> {
        match self {
            JsonToken::Number(text) => parse_value(text, "i32"),
            JsonToken::String(s) => parse_value(s, "i32"),
            other => Err(mismatch("a numeric value", other)),
        }
    }

    pub(crate) fn as_bool(&self) -> JsonResult<bool> {
        match self {
            JsonToken::Boolean(b) => Ok(*b),
            JsonToken::String(s) => parse_value(s, "bool"),
            other => Err(mismatch("a boolean value", other)),
        }
    }

    /// String coercion: strings yield their value, numbers and booleans
    /// their canonical text, null yields no value.
    pub(crate) fn as_string(&self) -> JsonResult<Option<String>> {
        match self {
            JsonToken::String(s) => Ok(Some(s.clone())),
            JsonToken::Number(text) => Ok(Some(text.clone())),
            JsonToken::Boolean(b) => Ok(Some(b.to_string())),
            JsonToken::Null => Ok(None),
            other => Err(mismatch("a string value", other)),
        }
    }
}

fn mismatch(expected: &str, found: &JsonToken) -> JsonError {
    JsonError::illegal_state(format!(
        "expected {expected} but the current token is {}",
        found.name()
    ))
}

fn parse_value<T: std::str::FromStr>(text: &str, target: &str) -> JsonResult<T>
where
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| JsonError::format(format!("'{text}' is not a valid {target}: {e}")))
}

/// Renders `s` as a quoted JSON string literal, escaping per RFC 8259.
///
/// The single escaping implementation behind the writer's string emission and
/// the subtree-buffering rendering of FieldName/String tokens.
pub(crate) fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_text() {
        assert_eq!(JsonToken::StartObject.text(), "{");
        assert_eq!(JsonToken::EndObject.text(), "}");
        assert_eq!(JsonToken::StartArray.text(), "[");
        assert_eq!(JsonToken::EndArray.text(), "]");
        assert_eq!(JsonToken::FieldName("key".into()).text(), "key");
        assert_eq!(JsonToken::String("v".into()).text(), "v");
        assert_eq!(JsonToken::Number("-0.54e2".into()).text(), "-0.54e2");
        assert_eq!(JsonToken::Boolean(true).text(), "true");
        assert_eq!(JsonToken::Boolean(false).text(), "false");
        assert_eq!(JsonToken::Null.text(), "null");
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(JsonToken::Number("12.5".into()).as_f64().unwrap(), 12.5);
        assert_eq!(JsonToken::String("12.5".into()).as_f64().unwrap(), 12.5);
        assert_eq!(JsonToken::Number("42".into()).as_i64().unwrap(), 42);
        assert!(matches!(
            JsonToken::Number("12.5".into()).as_i64(),
            Err(JsonError::Format { .. })
        ));
        assert!(matches!(
            JsonToken::String("not a number".into()).as_f64(),
            Err(JsonError::Format { .. })
        ));
        assert!(matches!(
            JsonToken::StartObject.as_f64(),
            Err(JsonError::IllegalState { .. })
        ));
    }

    #[test]
    fn bool_coercion() {
        assert!(JsonToken::Boolean(true).as_bool().unwrap());
        assert!(!JsonToken::String("false".into()).as_bool().unwrap());
        assert!(matches!(
            JsonToken::String("yes".into()).as_bool(),
            Err(JsonError::Format { .. })
        ));
        assert!(matches!(
            JsonToken::Number("1".into()).as_bool(),
            Err(JsonError::IllegalState { .. })
        ));
    }

    #[test]
    fn string_coercion() {
        assert_eq!(
            JsonToken::String("v".into()).as_string().unwrap(),
            Some(String::from("v"))
        );
        assert_eq!(
            JsonToken::Number("1e3".into()).as_string().unwrap(),
            Some(String::from("1e3"))
        );
        assert_eq!(
            JsonToken::Boolean(false).as_string().unwrap(),
            Some(String::from("false"))
        );
        assert_eq!(JsonToken::Null.as_string().unwrap(), None);
        assert!(JsonToken::StartArray.as_string().is_err());
    }

    #[test]
    fn quoting_escapes() {
        assert_eq!(quoted("plain"), r#""plain""#);
        assert_eq!(quoted("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quoted("line\nbreak\ttab"), r#""line\nbreak\ttab""#);
        assert_eq!(quoted("\u{8}\u{c}\r"), r#""\b\f\r""#);
        assert_eq!(quoted("\u{1}"), "\"\\u0001\"");
        assert_eq!(quoted(""), r#""""#);
        assert_eq!(quoted("ünïcödé"), "\"ünïcödé\"");
    }
}

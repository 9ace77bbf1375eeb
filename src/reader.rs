use std::io::{self, Read};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use smallvec::SmallVec;

use crate::error::{JsonError, JsonResult};
use crate::options::JsonOptions;
use crate::token::{quoted, JsonToken};
use crate::tokenizer::{Lexeme, Lexer};

/// A pull parser over a JSON document.
///
/// The reader is always positioned on exactly one [`JsonToken`], or on no
/// token (before the first [`next_token`] call and after the end of the
/// document). [`next_token`] advances one token at a time; the typed
/// accessors interpret the current token without advancing.
///
/// Structural validation (field names must be strings, commas and colons in
/// the right places, balanced brackets) happens while advancing, driven by an
/// explicit state stack, so the token stream a caller sees is always a
/// well-formed document prefix.
///
/// [`next_token`]: JsonReader::next_token
pub struct JsonReader<'a> {
    lexer: Lexer<'a>,
    state_stack: Vec<StateStackEntry>,
    current: Option<JsonToken>,
    replay: Option<&'a [u8]>,
    options: JsonOptions,
    done: bool,
}

#[derive(Debug, Clone)]
enum StateStackEntry {
    BeforeAnyValue,
    BeforeAnyValueWithLexeme(Lexeme),
    AfterObjectOpen,
    BeforeFieldNameWithLexeme(Lexeme),
    AfterFieldValue,
    ArrayAfterOpen,
    ArrayAfterItem,
}

impl<'a> JsonReader<'a> {
    /// A reader over a byte buffer. Supports [`reset`](Self::reset).
    pub fn from_slice(json: &'a [u8], options: JsonOptions) -> Self {
        Self::new(
            Box::new(json.iter().copied().map(Ok::<u8, io::Error>)),
            Some(json),
            options,
        )
    }

    /// A reader over a UTF-8 string. Supports [`reset`](Self::reset).
    pub fn from_str(json: &'a str, options: JsonOptions) -> Self {
        Self::from_slice(json.as_bytes(), options)
    }

    /// A reader over a one-shot byte stream. The stream is consumed as
    /// tokens are pulled and is never closed on the caller's behalf;
    /// [`reset`](Self::reset) is not supported.
    pub fn from_read(stream: impl Read + 'a, options: JsonOptions) -> Self {
        Self::new(Box::new(stream.bytes()), None, options)
    }

    /// A reader over a one-shot character stream.
    pub fn from_chars(chars: impl Iterator<Item = char> + 'a, options: JsonOptions) -> Self {
        let bytes = chars
            .flat_map(|c| {
                let mut buf = [0u8; 4];
                let encoded = c.encode_utf8(&mut buf);
                SmallVec::<[u8; 4]>::from_slice(encoded.as_bytes()).into_iter()
            })
            .map(Ok::<u8, io::Error>);
        Self::new(Box::new(bytes), None, options)
    }

    fn new(
        bytes: Box<dyn Iterator<Item = io::Result<u8>> + 'a>,
        replay: Option<&'a [u8]>,
        options: JsonOptions,
    ) -> Self {
        JsonReader {
            lexer: Lexer::new(bytes, options.non_numeric_numbers()),
            state_stack: vec![StateStackEntry::BeforeAnyValue],
            current: None,
            replay,
            options,
            done: false,
        }
    }

    /// The token the reader is positioned on; never advances.
    pub fn current_token(&self) -> Option<&JsonToken> {
        self.current.as_ref()
    }

    /// Advances one token. Returns `None` once the document has been fully
    /// consumed (after checking that only whitespace remains).
    pub fn next_token(&mut self) -> JsonResult<Option<&JsonToken>> {
        self.current = self.advance()?;
        Ok(self.current.as_ref())
    }

    fn advance(&mut self) -> JsonResult<Option<JsonToken>> {
        if self.done {
            return Ok(None);
        }
        while let Some(entry) = self.state_stack.last().cloned() {
            match entry {
                StateStackEntry::BeforeAnyValue => {
                    let lexeme = self.lexer.next_lexeme()?;
                    *self.state_stack.last_mut().unwrap() =
                        StateStackEntry::BeforeAnyValueWithLexeme(lexeme);
                }
                StateStackEntry::BeforeAnyValueWithLexeme(lexeme) => {
                    let token = match lexeme {
                        Lexeme::Number(text) => JsonToken::Number(text),
                        Lexeme::True => JsonToken::Boolean(true),
                        Lexeme::False => JsonToken::Boolean(false),
                        Lexeme::String(s) => JsonToken::String(s),
                        Lexeme::Null => JsonToken::Null,
                        Lexeme::ArrayOpen => {
                            *self.state_stack.last_mut().unwrap() =
                                StateStackEntry::ArrayAfterOpen;
                            return Ok(Some(JsonToken::StartArray));
                        }
                        Lexeme::ObjOpen => {
                            *self.state_stack.last_mut().unwrap() =
                                StateStackEntry::AfterObjectOpen;
                            return Ok(Some(JsonToken::StartObject));
                        }
                        l @ (Lexeme::Comma
                        | Lexeme::ArrayClose
                        | Lexeme::Colon
                        | Lexeme::ObjClose) => {
                            return Err(JsonError::syntax(
                                format!("Unexpected token {l:?}"),
                                self.lexer.location(),
                            ));
                        }
                    };
                    self.state_stack.pop();
                    return Ok(Some(token));
                }
                StateStackEntry::AfterObjectOpen => {
                    let lexeme = self.lexer.next_lexeme()?;
                    if matches!(lexeme, Lexeme::ObjClose) {
                        self.state_stack.pop();
                        return Ok(Some(JsonToken::EndObject));
                    }
                    *self.state_stack.last_mut().unwrap() =
                        StateStackEntry::BeforeFieldNameWithLexeme(lexeme);
                }
                StateStackEntry::BeforeFieldNameWithLexeme(lexeme) => {
                    let name = match lexeme {
                        Lexeme::String(s) => s,
                        other => {
                            return Err(JsonError::syntax(
                                format!("Key of object must be string but found {other:?}"),
                                self.lexer.location(),
                            ))
                        }
                    };

                    let colon = self.lexer.next_lexeme()?;
                    if colon != Lexeme::Colon {
                        return Err(JsonError::syntax(
                            format!("':' is expected after key of object but actually found '{colon:?}'"),
                            self.lexer.location(),
                        ));
                    }

                    *self.state_stack.last_mut().unwrap() = StateStackEntry::AfterFieldValue;
                    self.state_stack.push(StateStackEntry::BeforeAnyValue);
                    return Ok(Some(JsonToken::FieldName(name)));
                }
                StateStackEntry::AfterFieldValue => {
                    match self.lexer.next_lexeme()? {
                        Lexeme::Comma => {}
                        Lexeme::ObjClose => {
                            self.state_stack.pop();
                            return Ok(Some(JsonToken::EndObject));
                        }
                        token => {
                            return Err(JsonError::syntax(
                                format!(
                                    "',' or '}}' is expected for object but actually found '{token:?}'"
                                ),
                                self.lexer.location(),
                            ))
                        }
                    }

                    let lexeme = self.lexer.next_lexeme()?;
                    *self.state_stack.last_mut().unwrap() =
                        StateStackEntry::BeforeFieldNameWithLexeme(lexeme);
                }
                StateStackEntry::ArrayAfterOpen => {
                    let lexeme = self.lexer.next_lexeme()?;
                    if lexeme == Lexeme::ArrayClose {
                        self.state_stack.pop();
                        return Ok(Some(JsonToken::EndArray));
                    }
                    *self.state_stack.last_mut().unwrap() = StateStackEntry::ArrayAfterItem;
                    self.state_stack
                        .push(StateStackEntry::BeforeAnyValueWithLexeme(lexeme));
                }
                StateStackEntry::ArrayAfterItem => {
                    match self.lexer.next_lexeme()? {
                        Lexeme::Comma => {}
                        Lexeme::ArrayClose => {
                            self.state_stack.pop();
                            return Ok(Some(JsonToken::EndArray));
                        }
                        token => {
                            return Err(JsonError::syntax(
                                format!(
                                    "',' or ']' is expected for array but actually found '{token:?}'"
                                ),
                                self.lexer.location(),
                            ))
                        }
                    }

                    self.state_stack.push(StateStackEntry::BeforeAnyValue);
                }
            }
        }

        self.lexer.expect_eof()?;
        self.done = true;
        Ok(None)
    }

    fn current(&self) -> JsonResult<&JsonToken> {
        self.current
            .as_ref()
            .ok_or_else(|| JsonError::illegal_state("no current token; call next_token() first"))
    }

    /// The canonical text of the current token.
    pub fn current_text(&self) -> JsonResult<&str> {
        Ok(self.current()?.text())
    }

    /// The name carried by the current `FieldName` token.
    pub fn field_name(&self) -> JsonResult<&str> {
        match self.current()? {
            JsonToken::FieldName(name) => Ok(name),
            other => Err(JsonError::illegal_state(format!(
                "expected a field name but the current token is {}",
                other.name()
            ))),
        }
    }

    /// String coercion: strings yield their value, numbers and booleans
    /// their canonical text, `Null` yields `None`.
    pub fn string_value(&self) -> JsonResult<Option<String>> {
        self.current()?.as_string()
    }

    pub fn f64_value(&self) -> JsonResult<f64> {
        self.current()?.as_f64()
    }

    pub fn i64_value(&self) -> JsonResult<i64> {
        self.current()?.as_i64()
    }

    pub fn i32_value(&self) -> JsonResult<i32> {
        self.current()?.as_i32()
    }

    pub fn bool_value(&self) -> JsonResult<bool> {
        self.current()?.as_bool()
    }

    /// Decodes the current `String` token as standard base64; `Null` yields
    /// `None`.
    pub fn binary_value(&self) -> JsonResult<Option<Vec<u8>>> {
        match self.current()? {
            JsonToken::String(s) => BASE64
                .decode(s)
                .map(Some)
                .map_err(|e| JsonError::format(format!("invalid base64 value: {e}"))),
            JsonToken::Null => Ok(None),
            other => Err(JsonError::illegal_state(format!(
                "expected a base64 string or null but the current token is {}",
                other.name()
            ))),
        }
    }

    /// If the current token opens a container, advances past the matching
    /// close, leaving the reader positioned on it. Anything else is a no-op.
    pub fn skip_children(&mut self) -> JsonResult<()> {
        if !matches!(
            self.current_token(),
            Some(JsonToken::StartObject | JsonToken::StartArray)
        ) {
            return Ok(());
        }
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_token()? {
                Some(t) if t.is_container_open() => depth += 1,
                Some(t) if t.is_container_close() => depth -= 1,
                Some(_) => {}
                None => break,
            }
        }
        Ok(())
    }

    /// Buffers the subtree the reader is positioned on into self-contained
    /// JSON text, advancing past it. The current token must be
    /// `StartObject` or `StartArray`.
    ///
    /// The output re-renders each token's canonical text, so it is
    /// token-for-token identical to the source; it can be parsed later by a
    /// fresh reader, which is how unknown or polymorphic fields are deferred.
    pub fn read_children(&mut self) -> JsonResult<String> {
        match self.current_token() {
            Some(JsonToken::StartObject | JsonToken::StartArray) => {}
            Some(other) => {
                return Err(JsonError::illegal_state(format!(
                    "read_children() requires StartObject or StartArray but the current token is {}",
                    other.name()
                )))
            }
            None => {
                return Err(JsonError::illegal_state(
                    "no current token; call next_token() first",
                ))
            }
        }
        let mut buf = String::new();
        self.buffer_subtree(&mut buf)?;
        Ok(buf)
    }

    /// Buffers a self-contained JSON object. Accepts the same container
    /// positions as [`read_children`](Self::read_children), plus a
    /// `FieldName` position: from there, the current field and every
    /// remaining member of the enclosing object are wrapped into a new
    /// object of their own.
    pub fn buffer_object(&mut self) -> JsonResult<String> {
        let current = self.current()?.clone();
        match current {
            JsonToken::StartObject => {
                let mut buf = String::new();
                self.buffer_subtree(&mut buf)?;
                Ok(buf)
            }
            JsonToken::FieldName(name) => {
                let mut buf = String::new();
                buf.push('{');
                buf.push_str(&quoted(&name));
                buf.push(':');
                self.buffer_remaining(&mut buf, JsonToken::FieldName(name))?;
                Ok(buf)
            }
            other => Err(JsonError::illegal_state(format!(
                "buffer_object() requires StartObject or FieldName but the current token is {}",
                other.name()
            ))),
        }
    }

    fn buffer_subtree(&mut self, buf: &mut String) -> JsonResult<()> {
        let open = self.current()?.clone();
        buf.push_str(open.text());
        self.buffer_remaining(buf, open)
    }

    // The depth counter starts at 1 for the already-appended opening token
    // (or the synthetic `{` of buffer_object) and the loop stops once the
    // matching close brings it back to 0. Iterative on purpose: input
    // nesting depth must not translate into call stack depth here.
    fn buffer_remaining(&mut self, buf: &mut String, mut prev: JsonToken) -> JsonResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            let token = match self.next_token()? {
                Some(t) => t.clone(),
                None => break,
            };
            if token.is_container_open() {
                depth += 1;
            } else if token.is_container_close() {
                depth -= 1;
            }
            append_token(buf, &prev, &token);
            prev = token;
        }
        Ok(())
    }

    /// Whether this reader was built from a replayable source.
    pub fn reset_supported(&self) -> bool {
        self.replay.is_some()
    }

    /// A fresh reader over the same bytes at position zero. Only supported
    /// for slice- and string-backed readers; replay is exact.
    pub fn reset(&self) -> JsonResult<JsonReader<'a>> {
        match self.replay {
            Some(bytes) => Ok(JsonReader::from_slice(bytes, self.options)),
            None => Err(JsonError::illegal_state(
                "reset() is not supported for a stream-backed reader",
            )),
        }
    }
}

/// Appends one token's text, inserting `,` unless the previous token opened a
/// container, the previous token was a field name, or this token closes a
/// container. The single comma rule shared by every buffering path.
fn append_token(buf: &mut String, prev: &JsonToken, token: &JsonToken) {
    if !prev.is_container_open()
        && !matches!(prev, JsonToken::FieldName(_))
        && !token.is_container_close()
    {
        buf.push(',');
    }
    match token {
        JsonToken::FieldName(name) => {
            buf.push_str(&quoted(name));
            buf.push(':');
        }
        JsonToken::String(s) => buf.push_str(&quoted(s)),
        other => buf.push_str(other.text()),
    }
}

#[cfg(feature = "fallible-iterator")]
impl fallible_iterator::FallibleIterator for JsonReader<'_> {
    type Item = JsonToken;
    type Error = JsonError;

    fn next(&mut self) -> Result<Option<JsonToken>, JsonError> {
        Ok(self.next_token()?.cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reader(s: &str) -> JsonReader<'_> {
        JsonReader::from_str(s, JsonOptions::default())
    }

    fn tokens_of(reader: &mut JsonReader<'_>) -> Vec<JsonToken> {
        let mut v = Vec::new();
        while let Some(token) = reader.next_token().unwrap() {
            v.push(token.clone());
        }
        v
    }

    #[test]
    fn token_sequence_for_nested_document() {
        let mut r = reader(r#"{"a":1,"b":[true,null]}"#);
        assert_eq!(
            tokens_of(&mut r),
            vec![
                JsonToken::StartObject,
                JsonToken::FieldName("a".into()),
                JsonToken::Number("1".into()),
                JsonToken::FieldName("b".into()),
                JsonToken::StartArray,
                JsonToken::Boolean(true),
                JsonToken::Null,
                JsonToken::EndArray,
                JsonToken::EndObject,
            ]
        );
        // Past the end there is no current token.
        assert_eq!(r.current_token(), None);
        assert!(r.next_token().unwrap().is_none());
    }

    #[test]
    fn current_token_does_not_advance() {
        let mut r = reader("[1]");
        assert_eq!(r.current_token(), None);
        r.next_token().unwrap();
        assert_eq!(r.current_token(), Some(&JsonToken::StartArray));
        assert_eq!(r.current_token(), Some(&JsonToken::StartArray));
        assert_eq!(r.current_text().unwrap(), "[");
    }

    #[test]
    fn empty_containers() {
        let mut r = reader(r#"{"a":{},"b":[]}"#);
        assert_eq!(
            tokens_of(&mut r),
            vec![
                JsonToken::StartObject,
                JsonToken::FieldName("a".into()),
                JsonToken::StartObject,
                JsonToken::EndObject,
                JsonToken::FieldName("b".into()),
                JsonToken::StartArray,
                JsonToken::EndArray,
                JsonToken::EndObject,
            ]
        );
    }

    #[test]
    fn accessors_on_current_token() {
        let mut r = reader(r#"{"n":12.5,"s":"text","b":true,"z":null}"#);
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.field_name().unwrap(), "n");
        r.next_token().unwrap();
        assert_eq!(r.f64_value().unwrap(), 12.5);
        assert!(matches!(r.i64_value(), Err(JsonError::Format { .. })));
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.string_value().unwrap(), Some("text".to_string()));
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert!(r.bool_value().unwrap());
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.string_value().unwrap(), None);
    }

    #[test]
    fn accessor_errors_are_illegal_state() {
        let mut r = reader("{}");
        assert!(matches!(
            r.field_name(),
            Err(JsonError::IllegalState { .. })
        ));
        r.next_token().unwrap();
        assert!(matches!(
            r.field_name(),
            Err(JsonError::IllegalState { .. })
        ));
        assert!(matches!(r.bool_value(), Err(JsonError::IllegalState { .. })));
        assert!(matches!(r.f64_value(), Err(JsonError::IllegalState { .. })));
    }

    #[test]
    fn string_to_number_coercion() {
        let mut r = reader(r#"["42","nope"]"#);
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.i64_value().unwrap(), 42);
        assert_eq!(r.f64_value().unwrap(), 42.0);
        r.next_token().unwrap();
        assert!(matches!(r.i32_value(), Err(JsonError::Format { .. })));
    }

    #[test]
    fn binary_values() {
        let mut r = reader(r#"["aGk=",null,true]"#);
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.binary_value().unwrap(), Some(b"hi".to_vec()));
        r.next_token().unwrap();
        assert_eq!(r.binary_value().unwrap(), None);
        r.next_token().unwrap();
        assert!(matches!(
            r.binary_value(),
            Err(JsonError::IllegalState { .. })
        ));

        let mut r = reader(r#""not base64!""#);
        r.next_token().unwrap();
        assert!(matches!(r.binary_value(), Err(JsonError::Format { .. })));
    }

    #[test]
    fn skip_children_lands_on_matching_close() {
        let mut r = reader(r#"{"skip":{"x":[1,{"y":2}]},"after":3}"#);
        r.next_token().unwrap(); // {
        r.next_token().unwrap(); // "skip"
        r.next_token().unwrap(); // inner {
        r.skip_children().unwrap();
        assert_eq!(r.current_token(), Some(&JsonToken::EndObject));
        r.next_token().unwrap();
        assert_eq!(r.field_name().unwrap(), "after");
        r.next_token().unwrap();
        assert_eq!(r.i64_value().unwrap(), 3);
    }

    #[test]
    fn skip_children_is_a_noop_elsewhere() {
        let mut r = reader("[1,2]");
        r.next_token().unwrap();
        r.next_token().unwrap(); // 1
        r.skip_children().unwrap();
        assert_eq!(r.current_token(), Some(&JsonToken::Number("1".into())));
    }

    #[test]
    fn read_children_produces_source_text() {
        let mut r = reader(r#"{"keep":{"a":1,"b":[true,null],"c":"x\"y"},"tail":0}"#);
        r.next_token().unwrap();
        r.next_token().unwrap(); // "keep"
        r.next_token().unwrap(); // inner {
        let subtree = r.read_children().unwrap();
        assert_eq!(subtree, r#"{"a":1,"b":[true,null],"c":"x\"y"}"#);
        // The reader continued past the subtree.
        r.next_token().unwrap();
        assert_eq!(r.field_name().unwrap(), "tail");
    }

    #[test]
    fn read_children_of_array() {
        let mut r = reader(r#"[[1,[2,3]],4]"#);
        r.next_token().unwrap(); // outer [
        r.next_token().unwrap(); // inner [
        let subtree = r.read_children().unwrap();
        assert_eq!(subtree, "[1,[2,3]]");
        r.next_token().unwrap();
        assert_eq!(r.i64_value().unwrap(), 4);
    }

    #[test]
    fn buffered_subtree_reparses_to_same_tokens() {
        let source = r#"{"a":{"deep":[1,{"b":null}],"s":"v"}}"#;
        let mut direct = reader(source);
        direct.next_token().unwrap();
        direct.next_token().unwrap();
        direct.next_token().unwrap(); // inner {
        let mut direct_tokens = vec![direct.current_token().unwrap().clone()];
        let mut depth = 1;
        while depth > 0 {
            let t = direct.next_token().unwrap().unwrap().clone();
            if t.is_container_open() {
                depth += 1;
            } else if t.is_container_close() {
                depth -= 1;
            }
            direct_tokens.push(t);
        }

        let mut buffering = reader(source);
        buffering.next_token().unwrap();
        buffering.next_token().unwrap();
        buffering.next_token().unwrap();
        let buffered = buffering.read_children().unwrap();

        let mut reparse = JsonReader::from_str(&buffered, JsonOptions::default());
        assert_eq!(tokens_of(&mut reparse), direct_tokens);
    }

    #[test]
    fn buffer_object_from_field_name() {
        let mut r = reader(r#"{"first":1,"second":[2,3],"third":{"x":null}}"#);
        r.next_token().unwrap(); // {
        r.next_token().unwrap(); // "first"
        r.next_token().unwrap(); // 1
        r.next_token().unwrap(); // "second"
        let rest = r.buffer_object().unwrap();
        assert_eq!(rest, r#"{"second":[2,3],"third":{"x":null}}"#);
    }

    #[test]
    fn buffer_object_rejects_other_positions() {
        let mut r = reader("[1]");
        r.next_token().unwrap();
        assert!(matches!(
            r.buffer_object(),
            Err(JsonError::IllegalState { .. })
        ));
    }

    #[test]
    fn reset_replays_identically() {
        let source = r#"{"a":[1,2],"b":"x"}"#;
        let mut first = reader(source);
        assert!(first.reset_supported());
        let first_tokens = tokens_of(&mut first);

        let mut again = first.reset().unwrap();
        assert_eq!(tokens_of(&mut again), first_tokens);
    }

    #[test]
    fn reset_fails_for_stream_sources() {
        let data = b"[1]".to_vec();
        let mut r = JsonReader::from_read(&data[..], JsonOptions::default());
        assert!(!r.reset_supported());
        assert!(matches!(r.reset(), Err(JsonError::IllegalState { .. })));
        // The stream still parses normally.
        assert_eq!(
            tokens_of(&mut r),
            vec![
                JsonToken::StartArray,
                JsonToken::Number("1".into()),
                JsonToken::EndArray,
            ]
        );
    }

    #[test]
    fn char_stream_source() {
        let source = r#"{"é":"ü"}"#.to_string();
        let mut r = JsonReader::from_chars(source.chars(), JsonOptions::default());
        assert!(!r.reset_supported());
        assert_eq!(
            tokens_of(&mut r),
            vec![
                JsonToken::StartObject,
                JsonToken::FieldName("é".into()),
                JsonToken::String("ü".into()),
                JsonToken::EndObject,
            ]
        );
    }

    #[test]
    fn structural_errors() {
        let mut r = reader("{1:2}");
        r.next_token().unwrap();
        assert!(r.next_token().is_err());
        let mut r = reader(r#"{"a" 1}"#);
        r.next_token().unwrap();
        assert!(r.next_token().is_err());
        let mut r = reader("[1 2]");
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert!(r.next_token().is_err());
        let mut r = reader("]");
        assert!(r.next_token().is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let mut r = reader("null true");
        r.next_token().unwrap();
        assert!(r.next_token().is_err());
    }

    #[test]
    fn non_finite_numbers_follow_the_option() {
        let mut r = reader("[NaN,Infinity,-Infinity]");
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert!(r.f64_value().unwrap().is_nan());
        r.next_token().unwrap();
        assert_eq!(r.f64_value().unwrap(), f64::INFINITY);
        r.next_token().unwrap();
        assert_eq!(r.f64_value().unwrap(), f64::NEG_INFINITY);

        let strict = JsonOptions::default().with_non_numeric_numbers(false);
        let mut r = JsonReader::from_str("[NaN]", strict);
        r.next_token().unwrap();
        assert!(r.next_token().is_err());
    }
}

use std::io;

use smallvec::SmallVec;

use crate::error::{JsonError, JsonResult, Location};

/// A lexical token. The reader's state machine assembles
/// [`JsonToken`](crate::JsonToken)s out of these.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Number(String),
    True,
    False,
    String(String),
    Null,
    ArrayOpen,
    Comma,
    ArrayClose,
    ObjOpen,
    Colon,
    ObjClose,
}

// Note: char::is_ascii_whitespace is not usable here because some characters
// are not defined as whitespace in the JSON spec. For example, U+000C FORM
// FEED is whitespace in Rust but it isn't in JSON.
fn is_whitespace(c: u8) -> bool {
    matches!(c, 0x20 | 0xa | 0xd | 0x9)
}

/// A pull-based scanner over a fallible byte source.
///
/// Numbers are kept as literal text; validation follows the RFC 8259 grammar,
/// optionally extended with the `NaN`/`Infinity`/`-Infinity` literals.
pub(crate) struct Lexer<'a> {
    bytes: Box<dyn Iterator<Item = io::Result<u8>> + 'a>,
    // One-byte lookahead slot. `io::Error` is not cloneable, so peeking pulls
    // the byte out of the source and surfaces a stream error immediately.
    peeked: Option<u8>,
    location: Location,
    non_numeric_numbers: bool,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(
        bytes: Box<dyn Iterator<Item = io::Result<u8>> + 'a>,
        non_numeric_numbers: bool,
    ) -> Self {
        Lexer {
            bytes,
            peeked: None,
            location: Location::default(),
            non_numeric_numbers,
        }
    }

    /// The location of the lexeme that will be returned by the next call to
    /// `next_lexeme()`, or of the whitespace preceding it.
    pub(crate) fn location(&self) -> Location {
        self.location
    }

    /// Returns an error if there is more than just white space in the
    /// remaining bytes.
    pub(crate) fn expect_eof(&mut self) -> JsonResult<()> {
        match self.peek_byte_skip_whitespace()? {
            Some(b) => self.err(format!("Expected EOF but found byte {b:#x}")),
            None => Ok(()),
        }
    }

    fn err<T>(&self, msg: String) -> JsonResult<T> {
        Err(JsonError::syntax(msg, self.location))
    }

    fn eof_err(&self) -> JsonError {
        JsonError::syntax("Unexpected EOF", self.location)
    }

    fn peek_byte(&mut self) -> JsonResult<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = match self.bytes.next() {
                Some(Ok(b)) => Some(b),
                Some(Err(e)) => return Err(JsonError::Io(e)),
                None => None,
            };
        }
        Ok(self.peeked)
    }

    fn peek_byte_skip_whitespace(&mut self) -> JsonResult<Option<u8>> {
        while let Some(c) = self.peek_byte()? {
            if !is_whitespace(c) {
                return Ok(Some(c));
            }
            self.peeked = None;
            self.location.advance_by_byte(c);
        }
        Ok(None)
    }

    fn consume_byte(&mut self) -> JsonResult<u8> {
        if let Some(b) = self.peeked.take() {
            self.location.advance_by_byte(b);
            return Ok(b);
        }
        match self.bytes.next() {
            Some(Ok(b)) => {
                self.location.advance_by_byte(b);
                Ok(b)
            }
            Some(Err(e)) => Err(JsonError::Io(e)),
            None => Err(self.eof_err()),
        }
    }

    fn consume_string(&mut self) -> JsonResult<Lexeme> {
        let quote = self.consume_byte()?;
        debug_assert_eq!(quote, b'"', "caller must have peeked a start quote");

        let mut s = SmallVec::<[u8; 10]>::new();
        loop {
            let b = match self.consume_byte()? {
                b'\\' => match self.consume_byte()? {
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'"' => b'"',
                    b'b' => 0x8,
                    b'f' => 0xc,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        let u = self.consume_hex_unit()?;
                        let c = match u {
                            0xD800..=0xDBFF => {
                                // First surrogate; the second must directly follow.
                                if self.consume_byte()? != b'\\' || self.consume_byte()? != b'u' {
                                    return self.err(format!("First UTF-16 surrogate {u:#x} must be directly followed by a second \\uXXXX surrogate."));
                                }
                                let u2 = self.consume_hex_unit()?;
                                if !matches!(u2, 0xDC00..=0xDFFF) {
                                    return self.err(format!("First UTF-16 surrogate {u:#x} must be directly followed by a second \\uXXXX surrogate, but found {u2:#x}."));
                                }

                                // Assemble the pair into a char, the same way
                                // char::decode_utf16 does it.
                                let c =
                                    (((u & 0x3ff) as u32) << 10 | (u2 & 0x3ff) as u32) + 0x1_0000;
                                char::from_u32(c).unwrap()
                            }
                            0xDC00..=0xDFFF => {
                                return self
                                    .err(format!("Unpaired UTF-16 second surrogate: {u:#x}"));
                            }
                            _ => char::from_u32(u as u32).unwrap(),
                        };
                        match c.len_utf8() {
                            1 => s.push(c as u8),
                            _ => s.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
                        }
                        continue;
                    }
                    b => return self.err(format!("{b:#x} is invalid escaped character")),
                },
                b'"' => {
                    let s = String::from_utf8(s.to_vec())
                        .or_else(|_| self.err("Invalid UTF-8 in string".into()))?;
                    return Ok(Lexeme::String(s));
                }
                // JSON forbids raw control characters in string literals, but
                // 0x7f (DEL) is allowed even though Rust calls it a control
                // character.
                b if b < 0x20 => {
                    return self.err(format!("Unexpected control character {b:#x} in string"));
                }
                b => b,
            };

            s.push(b);
        }
    }

    fn consume_hex_unit(&mut self) -> JsonResult<u16> {
        let mut u = 0u16;
        for _ in 0..4 {
            let b = self.consume_byte()?;
            if let Some(h) = ascii_byte_to_hex_digit(b) {
                u = u * 0x10 + h as u16;
            } else {
                return self.err(format!(
                    "Unicode escape must be \\uXXXX (X is hex character) format but found byte {b:#x}"
                ));
            }
        }
        Ok(u)
    }

    fn consume_constant(&mut self, s: &'static str) -> JsonResult<()> {
        for expected_byte in s.as_bytes() {
            let b = self.consume_byte()?;
            if b != *expected_byte {
                return Err(JsonError::syntax(
                    format!("Unexpected byte {b:#x} while parsing '{s}'"),
                    self.location,
                ));
            }
        }
        Ok(())
    }

    fn consume_null(&mut self) -> JsonResult<Lexeme> {
        self.consume_constant("null")?;
        Ok(Lexeme::Null)
    }

    fn consume_true(&mut self) -> JsonResult<Lexeme> {
        self.consume_constant("true")?;
        Ok(Lexeme::True)
    }

    fn consume_false(&mut self) -> JsonResult<Lexeme> {
        self.consume_constant("false")?;
        Ok(Lexeme::False)
    }

    fn consume_non_finite(&mut self, first: u8) -> JsonResult<Lexeme> {
        let literal = if first == b'N' { "NaN" } else { "Infinity" };
        self.consume_constant(literal)?;
        Ok(Lexeme::Number(literal.to_string()))
    }

    fn consume_number(&mut self) -> JsonResult<Lexeme> {
        let mut s = SmallVec::<[u8; 16]>::new();
        if self.peek_byte()? == Some(b'-') {
            s.push(self.consume_byte()?);
        }

        if self.non_numeric_numbers && self.peek_byte()? == Some(b'I') {
            self.consume_constant("Infinity")?;
            let text = if s.is_empty() { "Infinity" } else { "-Infinity" };
            return Ok(Lexeme::Number(text.to_string()));
        }

        let int_start = s.len();
        let mut saw_dot = false;
        let mut saw_exp = false;

        while let Some(d) = self.peek_byte()? {
            match d {
                b'0'..=b'9' => s.push(d),
                b'.' => {
                    saw_dot = true;
                    break;
                }
                b'e' | b'E' => {
                    saw_exp = true;
                    break;
                }
                _ => break,
            }
            self.consume_byte()?;
        }

        if s.len() == int_start {
            return self.err("Integer part must not be empty in number literal".to_string());
        }

        if s[int_start..].starts_with(b"0") && s.len() - int_start > 1 {
            return self
                .err("Integer part of number must not start with 0 except for '0'".to_string());
        }

        if saw_dot {
            s.push(self.consume_byte()?); // eat '.'
            while let Some(d) = self.peek_byte()? {
                match d {
                    b'0'..=b'9' => s.push(d),
                    b'e' | b'E' => {
                        saw_exp = true;
                        break;
                    }
                    _ => break,
                }
                self.consume_byte()?;
            }
            if s.ends_with(b".") {
                return self.err("Fraction part of number must not be empty".to_string());
            }
        }

        if saw_exp {
            s.push(self.consume_byte()?); // eat 'e' or 'E'
            if let Some(b'+') | Some(b'-') = self.peek_byte()? {
                s.push(self.consume_byte()?);
            }

            let mut saw_digit = false;
            while let Some(d) = self.peek_byte()? {
                match d {
                    b'0'..=b'9' => s.push(d),
                    _ => break,
                }
                saw_digit = true;
                self.consume_byte()?;
            }

            if !saw_digit {
                return self.err("Exponent part must not be empty in number literal".to_string());
            }
        }

        // Only ASCII bytes are pushed above.
        let text = String::from_utf8(s.to_vec()).unwrap();
        Ok(Lexeme::Number(text))
    }

    /// Scans one lexeme and returns it, or an error. EOF is a syntax error;
    /// the caller tracks document completion and uses `expect_eof`.
    pub(crate) fn next_lexeme(&mut self) -> JsonResult<Lexeme> {
        let b = self
            .peek_byte_skip_whitespace()?
            .ok_or_else(|| self.eof_err())?;
        let lexeme = match b {
            b'[' => Lexeme::ArrayOpen,
            b']' => Lexeme::ArrayClose,
            b'{' => Lexeme::ObjOpen,
            b'}' => Lexeme::ObjClose,
            b':' => Lexeme::Colon,
            b',' => Lexeme::Comma,
            b'0'..=b'9' | b'-' => return self.consume_number(),
            b'"' => return self.consume_string(),
            b't' => return self.consume_true(),
            b'f' => return self.consume_false(),
            b'n' => return self.consume_null(),
            b'N' | b'I' if self.non_numeric_numbers => return self.consume_non_finite(b),
            c => return self.err(format!("Invalid byte: {c:#x}")),
        };
        self.consume_byte()?;
        Ok(lexeme)
    }
}

fn ascii_byte_to_hex_digit(c: u8) -> Option<u8> {
    if c.is_ascii_digit() {
        Some(c - b'0')
    } else if (b'a'..=b'f').contains(&c) {
        Some(10 + (c - b'a'))
    } else if (b'A'..=b'F').contains(&c) {
        Some(10 + (c - b'A'))
    } else {
        None
    }
}

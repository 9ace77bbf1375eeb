use std::fmt;

use thiserror::Error;

/// A byte offset and the corresponding line and column number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub byte_offset: u64,
    pub line: u64,
    pub col: u64,
}

impl Location {
    pub(crate) fn advance_by_byte(&mut self, c: u8) {
        if c == b'\n' {
            self.col = 0;
            self.line += 1;
        } else {
            self.col += 1;
        }
        self.byte_offset += 1;
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line:{}, col:{}", self.line, self.col)
    }
}

/// The error type used throughout this crate.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The requested operation is not valid for the current token or write
    /// context, e.g. asking for a boolean while positioned on `{`, or writing
    /// a closing bracket at the document root.
    #[error("illegal state: {msg}")]
    IllegalState { msg: String },

    /// A value could not be coerced to the requested representation.
    #[error("format error: {msg}")]
    Format { msg: String },

    /// The document is not well-formed JSON.
    #[error("parse error at {location}: {msg}")]
    Syntax { msg: String, location: Location },

    /// The underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    pub(crate) fn illegal_state(msg: impl Into<String>) -> JsonError {
        JsonError::IllegalState { msg: msg.into() }
    }

    pub(crate) fn format(msg: impl Into<String>) -> JsonError {
        JsonError::Format { msg: msg.into() }
    }

    pub(crate) fn syntax(msg: impl Into<String>, location: Location) -> JsonError {
        JsonError::Syntax {
            msg: msg.into(),
            location,
        }
    }
}

/// A type alias for `Result<T, JsonError>`.
pub type JsonResult<T> = Result<T, JsonError>;

//! Streaming codec for JSON: a pull-based token reader and a push-based,
//! state-validated writer.
//!
//! [`JsonReader`] exposes a document one [`JsonToken`] at a time without ever
//! holding the whole structure in memory, with typed accessors, subtree
//! skipping and subtree buffering for deferred parsing of unknown fields.
//! [`JsonWriter`] validates every call against an immutable
//! [`JsonWriteContext`] state machine before emitting anything, so its output
//! is well-formed JSON regardless of call order; out-of-order calls fail
//! without writing a single byte.
//!
//! ```
//! use json_stream_codec::{JsonOptions, JsonReader, JsonToken, JsonWriter};
//!
//! # fn main() -> Result<(), json_stream_codec::JsonError> {
//! let mut out = Vec::new();
//! let mut writer = JsonWriter::new(&mut out, JsonOptions::default());
//! writer
//!     .write_start_object()?
//!     .write_field_name("key1")?
//!     .write_i64(1234)?
//!     .write_field_name("key2")?
//!     .write_start_array()?
//!     .write_bool(true)?
//!     .write_end_array()?
//!     .write_string_field("key3", "value")?
//!     .write_end_object()?;
//! writer.close()?;
//! assert_eq!(out, br#"{"key1":1234,"key2":[true],"key3":"value"}"#.to_vec());
//!
//! let mut reader = JsonReader::from_slice(&out, JsonOptions::default());
//! assert_eq!(reader.next_token()?, Some(&JsonToken::StartObject));
//! assert_eq!(reader.next_token()?, Some(&JsonToken::FieldName("key1".into())));
//! reader.next_token()?;
//! assert_eq!(reader.i64_value()?, 1234);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod options;
mod reader;
mod token;
mod tokenizer;
mod writer;

pub use context::*;
pub use error::*;
pub use options::*;
pub use reader::*;
pub use token::*;
pub use writer::*;

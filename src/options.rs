use std::io::{Read, Write};

use crate::error::JsonResult;
use crate::reader::JsonReader;
use crate::writer::JsonWriter;

/// Options shared by readers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    non_numeric_numbers: bool,
}

impl Default for JsonOptions {
    /// Non-numeric number support is on by default.
    fn default() -> Self {
        JsonOptions {
            non_numeric_numbers: true,
        }
    }
}

impl JsonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `NaN`, `Infinity` and `-Infinity` may be read and written as
    /// bare literals. With this off they are rejected on both ends.
    pub fn with_non_numeric_numbers(mut self, enabled: bool) -> Self {
        self.non_numeric_numbers = enabled;
        self
    }

    pub fn non_numeric_numbers(&self) -> bool {
        self.non_numeric_numbers
    }
}

/// A factory for readers and writers, passed in explicitly by the caller.
/// There is no process-wide registry; code that wants a pluggable codec takes
/// a `&dyn JsonProvider` and defaults to [`DefaultJsonProvider`].
pub trait JsonProvider {
    fn reader_from_slice<'a>(
        &self,
        json: &'a [u8],
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>>;

    fn reader_from_str<'a>(
        &self,
        json: &'a str,
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>>;

    fn reader_from_stream<'a>(
        &self,
        stream: Box<dyn Read + 'a>,
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>>;

    fn writer_to_stream<'a>(
        &self,
        out: Box<dyn Write + 'a>,
        options: JsonOptions,
    ) -> JsonResult<JsonWriter<Box<dyn Write + 'a>>>;
}

/// The codec implemented by this crate, always constructible.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultJsonProvider;

impl JsonProvider for DefaultJsonProvider {
    fn reader_from_slice<'a>(
        &self,
        json: &'a [u8],
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>> {
        Ok(JsonReader::from_slice(json, options))
    }

    fn reader_from_str<'a>(
        &self,
        json: &'a str,
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>> {
        Ok(JsonReader::from_str(json, options))
    }

    fn reader_from_stream<'a>(
        &self,
        stream: Box<dyn Read + 'a>,
        options: JsonOptions,
    ) -> JsonResult<JsonReader<'a>> {
        Ok(JsonReader::from_read(stream, options))
    }

    fn writer_to_stream<'a>(
        &self,
        out: Box<dyn Write + 'a>,
        options: JsonOptions,
    ) -> JsonResult<JsonWriter<Box<dyn Write + 'a>>> {
        Ok(JsonWriter::new(out, options))
    }
}

use std::io::{self, Write};
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::context::{ContextKind, JsonWriteContext, Operation};
use crate::error::{JsonError, JsonResult};
use crate::options::JsonOptions;
use crate::token::quoted;

/// What class of text was last emitted. A comma is due exactly when the last
/// emission was a completed value or a closing bracket, which is the same
/// separator rule subtree buffering applies on the reading side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emitted {
    Nothing,
    ContainerOpen,
    FieldName,
    Value,
    ContainerClose,
}

/// A push-based JSON serializer over any [`Write`] destination.
///
/// Every public call is classified as an [`Operation`], validated against the
/// current [`JsonWriteContext`] before a single byte is emitted, and only then
/// written out, so the output is well-formed regardless of call order: an
/// out-of-order call fails without emitting anything.
///
/// The destination is borrowed or moved in but never closed; [`close`]
/// flushes and verifies that the document is complete.
///
/// [`close`]: JsonWriter::close
pub struct JsonWriter<W: Write> {
    out: W,
    context: Rc<JsonWriteContext>,
    last: Emitted,
    non_numeric_numbers: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, options: JsonOptions) -> Self {
        JsonWriter {
            out,
            context: JsonWriteContext::root(),
            last: Emitted::Nothing,
            non_numeric_numbers: options.non_numeric_numbers(),
        }
    }

    /// The kind of context the writer is currently in.
    pub fn context_kind(&self) -> ContextKind {
        self.context.kind()
    }

    fn advance(&mut self, op: Operation, emitted: Emitted) {
        self.context = JsonWriteContext::apply(&self.context, op);
        self.last = emitted;
    }

    fn write_separator(&mut self) -> io::Result<()> {
        if matches!(self.last, Emitted::Value | Emitted::ContainerClose) {
            self.out.write_all(b",")?;
        }
        Ok(())
    }

    pub fn write_start_object(&mut self) -> JsonResult<&mut Self> {
        self.context.validate(Operation::StartObject)?;
        self.write_separator()?;
        self.out.write_all(b"{")?;
        self.advance(Operation::StartObject, Emitted::ContainerOpen);
        Ok(self)
    }

    pub fn write_end_object(&mut self) -> JsonResult<&mut Self> {
        self.context.validate(Operation::EndObject)?;
        self.out.write_all(b"}")?;
        self.advance(Operation::EndObject, Emitted::ContainerClose);
        Ok(self)
    }

    pub fn write_start_array(&mut self) -> JsonResult<&mut Self> {
        self.context.validate(Operation::StartArray)?;
        self.write_separator()?;
        self.out.write_all(b"[")?;
        self.advance(Operation::StartArray, Emitted::ContainerOpen);
        Ok(self)
    }

    pub fn write_end_array(&mut self) -> JsonResult<&mut Self> {
        self.context.validate(Operation::EndArray)?;
        self.out.write_all(b"]")?;
        self.advance(Operation::EndArray, Emitted::ContainerClose);
        Ok(self)
    }

    pub fn write_field_name(&mut self, name: &str) -> JsonResult<&mut Self> {
        self.context.validate(Operation::FieldName)?;
        self.write_separator()?;
        self.out.write_all(quoted(name).as_bytes())?;
        self.out.write_all(b":")?;
        self.advance(Operation::FieldName, Emitted::FieldName);
        Ok(self)
    }

    /// Validates, emits one simple value and advances. All value writers
    /// funnel through here.
    fn emit_simple(&mut self, text: &str) -> JsonResult<&mut Self> {
        self.context.validate(Operation::SimpleValue)?;
        self.write_separator()?;
        self.out.write_all(text.as_bytes())?;
        self.advance(Operation::SimpleValue, Emitted::Value);
        Ok(self)
    }

    pub fn write_string(&mut self, value: &str) -> JsonResult<&mut Self> {
        let literal = quoted(value);
        self.emit_simple(&literal)
    }

    pub fn write_bool(&mut self, value: bool) -> JsonResult<&mut Self> {
        self.emit_simple(if value { "true" } else { "false" })
    }

    pub fn write_null(&mut self) -> JsonResult<&mut Self> {
        self.emit_simple("null")
    }

    pub fn write_i32(&mut self, value: i32) -> JsonResult<&mut Self> {
        self.emit_simple(&value.to_string())
    }

    pub fn write_i64(&mut self, value: i64) -> JsonResult<&mut Self> {
        self.emit_simple(&value.to_string())
    }

    pub fn write_f64(&mut self, value: f64) -> JsonResult<&mut Self> {
        let text = self.render_f64(value)?;
        self.emit_simple(&text)
    }

    /// Base64-encodes `data` as a string value; `None` writes `null`.
    pub fn write_binary(&mut self, data: Option<&[u8]>) -> JsonResult<&mut Self> {
        match data {
            Some(data) => {
                let encoded = BASE64.encode(data);
                self.emit_simple(&quoted(&encoded))
            }
            None => self.write_null(),
        }
    }

    /// Writes caller-supplied JSON text as one value. The counterpart of the
    /// reader's subtree buffering: text captured there can be replayed here.
    /// The text itself is not validated.
    pub fn write_raw(&mut self, raw: &str) -> JsonResult<&mut Self> {
        if raw.is_empty() {
            return Err(JsonError::format("raw JSON text must not be empty"));
        }
        self.emit_simple(raw)
    }

    /// Writes a pre-rendered numeric literal.
    pub fn write_number_text(&mut self, text: &str) -> JsonResult<&mut Self> {
        if text.is_empty() {
            return Err(JsonError::format("numeric literal must not be empty"));
        }
        self.emit_simple(text)
    }

    fn render_f64(&self, value: f64) -> JsonResult<String> {
        if value.is_finite() {
            return Ok(value.to_string());
        }
        if !self.non_numeric_numbers {
            return Err(JsonError::format(format!(
                "non-finite number {value} is not allowed unless non-numeric numbers are enabled"
            )));
        }
        let text = if value.is_nan() {
            "NaN"
        } else if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        Ok(text.to_string())
    }

    /// Validates one `FieldAndValue` operation and emits `"name":` followed
    /// by whatever `write_value` produces.
    fn emit_field(
        &mut self,
        name: &str,
        write_value: impl FnOnce(&mut W) -> io::Result<()>,
    ) -> JsonResult<&mut Self> {
        self.context.validate(Operation::FieldAndValue)?;
        self.write_separator()?;
        self.out.write_all(quoted(name).as_bytes())?;
        self.out.write_all(b":")?;
        write_value(&mut self.out)?;
        self.advance(Operation::FieldAndValue, Emitted::Value);
        Ok(self)
    }

    pub fn write_string_field(&mut self, name: &str, value: &str) -> JsonResult<&mut Self> {
        let literal = quoted(value);
        self.emit_field(name, |out| out.write_all(literal.as_bytes()))
    }

    pub fn write_bool_field(&mut self, name: &str, value: bool) -> JsonResult<&mut Self> {
        self.emit_field(name, |out| {
            out.write_all(if value { b"true" } else { b"false" })
        })
    }

    pub fn write_null_field(&mut self, name: &str) -> JsonResult<&mut Self> {
        self.emit_field(name, |out| out.write_all(b"null"))
    }

    pub fn write_i32_field(&mut self, name: &str, value: i32) -> JsonResult<&mut Self> {
        let literal = value.to_string();
        self.emit_field(name, |out| out.write_all(literal.as_bytes()))
    }

    pub fn write_i64_field(&mut self, name: &str, value: i64) -> JsonResult<&mut Self> {
        let literal = value.to_string();
        self.emit_field(name, |out| out.write_all(literal.as_bytes()))
    }

    pub fn write_f64_field(&mut self, name: &str, value: f64) -> JsonResult<&mut Self> {
        let literal = self.render_f64(value)?;
        self.emit_field(name, |out| out.write_all(literal.as_bytes()))
    }

    pub fn write_binary_field(&mut self, name: &str, data: Option<&[u8]>) -> JsonResult<&mut Self> {
        match data {
            Some(data) => {
                let literal = quoted(&BASE64.encode(data));
                self.emit_field(name, |out| out.write_all(literal.as_bytes()))
            }
            None => self.write_null_field(name),
        }
    }

    pub fn write_raw_field(&mut self, name: &str, raw: &str) -> JsonResult<&mut Self> {
        if raw.is_empty() {
            return Err(JsonError::format("raw JSON text must not be empty"));
        }
        self.emit_field(name, |out| out.write_all(raw.as_bytes()))
    }

    /// Writes an array by calling `f` once per item. Built purely on the
    /// validated primitives, so it inherits their ordering guarantees.
    pub fn write_array<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut f: impl FnMut(&mut Self, T) -> JsonResult<()>,
    ) -> JsonResult<&mut Self> {
        self.write_start_array()?;
        for item in items {
            f(self, item)?;
        }
        self.write_end_array()
    }

    /// Writes an object with one member per entry.
    pub fn write_map<K: AsRef<str>, T>(
        &mut self,
        entries: impl IntoIterator<Item = (K, T)>,
        mut f: impl FnMut(&mut Self, T) -> JsonResult<()>,
    ) -> JsonResult<&mut Self> {
        self.write_start_object()?;
        for (name, value) in entries {
            self.write_field_name(name.as_ref())?;
            f(self, value)?;
        }
        self.write_end_object()
    }

    /// Writes `null` for `None`, otherwise delegates to `f`.
    pub fn write_nullable<T>(
        &mut self,
        value: Option<T>,
        f: impl FnOnce(&mut Self, T) -> JsonResult<()>,
    ) -> JsonResult<&mut Self> {
        match value {
            Some(value) => {
                f(self, value)?;
                Ok(self)
            }
            None => self.write_null(),
        }
    }

    pub fn flush(&mut self) -> JsonResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Verifies that the top-level value has been finished, then flushes.
    /// This is what keeps a truncated document from going unnoticed: until
    /// the context is `Completed`, closing is an error.
    pub fn close(&mut self) -> JsonResult<()> {
        if self.context.kind() != ContextKind::Completed {
            return Err(JsonError::illegal_state(format!(
                "close() called in a {} context before the top-level value was finished",
                self.context.kind()
            )));
        }
        self.out.flush()?;
        Ok(())
    }

    /// Hands back the destination.
    pub fn into_inner(self) -> W {
        self.out
    }
}

use std::fmt;
use std::rc::Rc;

use crate::error::{JsonError, JsonResult};

/// Where in a JSON structure a writer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Before the top-level value.
    Root,
    /// Inside an object, before a field name or the closing brace.
    Object,
    /// Inside an array, before an element or the closing bracket.
    Array,
    /// After a field name, before its value.
    FieldValue,
    /// After the top-level value; nothing more may be written.
    Completed,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContextKind::Root => "root",
            ContextKind::Object => "object",
            ContextKind::Array => "array",
            ContextKind::FieldValue => "field value",
            ContextKind::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Classification of a single writer call, validated against the current
/// write context before anything is emitted.
///
/// Distinct from [`JsonToken`](crate::JsonToken): `FieldAndValue` covers the
/// combined name-plus-value calls, which emit two tokens but leave the
/// nesting depth unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    SimpleValue,
    FieldAndValue,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::StartObject => "StartObject",
            Operation::EndObject => "EndObject",
            Operation::StartArray => "StartArray",
            Operation::EndArray => "EndArray",
            Operation::FieldName => "FieldName",
            Operation::SimpleValue => "SimpleValue",
            Operation::FieldAndValue => "FieldAndValue",
        };
        f.write_str(s)
    }
}

/// An immutable node in the writer's context chain. Applying an accepted
/// [`Operation`] yields the next node; popping returns to an already
/// existing parent, so parents are shared via `Rc` rather than cloned.
///
/// `Root` and `Completed` are the only contexts without a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWriteContext {
    kind: ContextKind,
    parent: Option<Rc<JsonWriteContext>>,
}

impl JsonWriteContext {
    /// The context a writer starts in.
    pub fn root() -> Rc<JsonWriteContext> {
        Rc::new(JsonWriteContext {
            kind: ContextKind::Root,
            parent: None,
        })
    }

    fn completed() -> Rc<JsonWriteContext> {
        Rc::new(JsonWriteContext {
            kind: ContextKind::Completed,
            parent: None,
        })
    }

    fn child(kind: ContextKind, parent: &Rc<JsonWriteContext>) -> Rc<JsonWriteContext> {
        Rc::new(JsonWriteContext {
            kind,
            parent: Some(parent.clone()),
        })
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    /// The operations accepted in a context of the given kind.
    pub fn legal_operations(kind: ContextKind) -> &'static [Operation] {
        match kind {
            ContextKind::Root => &[
                Operation::StartObject,
                Operation::StartArray,
                Operation::SimpleValue,
            ],
            ContextKind::Object => &[
                Operation::EndObject,
                Operation::FieldName,
                Operation::FieldAndValue,
            ],
            ContextKind::Array => &[
                Operation::StartObject,
                Operation::StartArray,
                Operation::EndArray,
                Operation::SimpleValue,
            ],
            ContextKind::FieldValue => &[
                Operation::StartObject,
                Operation::StartArray,
                Operation::SimpleValue,
            ],
            ContextKind::Completed => &[],
        }
    }

    /// Checks that `op` is accepted in this context, without emitting
    /// anything. The error names the context and the operations it accepts.
    pub fn validate(&self, op: Operation) -> JsonResult<()> {
        let legal = Self::legal_operations(self.kind);
        if legal.contains(&op) {
            return Ok(());
        }
        let accepted = if legal.is_empty() {
            String::from("nothing")
        } else {
            legal
                .iter()
                .map(Operation::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Err(JsonError::illegal_state(format!(
            "{op} is not allowed in a {} context; accepted here: {accepted}",
            self.kind
        )))
    }

    /// The pure transition function. `op` must already have been accepted by
    /// [`validate`](Self::validate); contexts whose kind admits `op` always
    /// have the parents unwrapped below.
    pub fn apply(current: &Rc<JsonWriteContext>, op: Operation) -> Rc<JsonWriteContext> {
        match op {
            Operation::StartObject => Self::child(ContextKind::Object, current),
            Operation::StartArray => Self::child(ContextKind::Array, current),
            Operation::FieldName => Self::child(ContextKind::FieldValue, current),
            // A combined name+value call opens and closes a field in one
            // step; the enclosing object context is unchanged.
            Operation::FieldAndValue => current.clone(),
            Operation::SimpleValue => match current.kind {
                ContextKind::Root => Self::completed(),
                ContextKind::FieldValue => current.parent.clone().unwrap(),
                // An array stays open across its elements.
                _ => current.clone(),
            },
            Operation::EndObject | Operation::EndArray => {
                let parent = current.parent.as_ref().unwrap();
                match parent.kind {
                    ContextKind::Root => Self::completed(),
                    ContextKind::FieldValue => parent.parent.clone().unwrap(),
                    _ => parent.clone(),
                }
            }
        }
    }
}

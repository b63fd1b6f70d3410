//! The per-invocation context record.
//!
//! A [`Context`] is an open record threaded through every pipeline step. The
//! engine enforces no schema: handlers establish conventions by name
//! (`cli_args`, `env_vars`, `files.config`, ...) and downstream handlers read
//! them back, guarding their preconditions with the [`confirm`](crate::confirm)
//! helpers. Values are stored as `serde_json::Value`, so anything a handler
//! wants to share must be representable as data.
//!
//! A fresh context is created by the context factory at the start of each
//! run and discarded when the run ends, success or failure. Contexts are
//! never reused across invocations.

use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Produces the fresh context for one executor run.
pub type ContextFactory = Rc<dyn Fn() -> Context>;

/// The broad kind of a context value, used in type assertions and their
/// error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON null.
    Null,
    /// Boolean.
    Bool,
    /// Integer or float.
    Number,
    /// String.
    String,
    /// Array of values.
    Array,
    /// String-keyed mapping.
    Object,
}

impl ValueKind {
    /// Returns the kind of a `serde_json::Value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "a boolean",
            ValueKind::Number => "a number",
            ValueKind::String => "a string",
            ValueKind::Array => "an array",
            ValueKind::Object => "an object",
        };
        write!(f, "{name}")
    }
}

/// Mutable key-value record shared by all steps of a single run.
///
/// Keys at the top level are plain strings; nested structure is reached with
/// dotted paths (`files.config` resolves `values["files"]["config"]`).
#[derive(Debug, Default, Clone)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sets a top-level entry, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets a value at a dotted path, creating intermediate objects as
    /// needed. An intermediate segment holding a non-object value is
    /// replaced by an object.
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments = path.split('.').collect::<Vec<_>>();
        let last = segments.pop().expect("split yields at least one segment");

        let mut current = &mut self.values;
        for segment in segments {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = slot.as_object_mut().expect("slot was just made an object");
        }
        current.insert(last.to_string(), value.into());
    }

    /// Gets a top-level entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Resolves a dotted path into the value tree.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolves a dotted path to a string slice, if it is one.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Resolves a dotted path to a boolean, if it is one.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_path(path).and_then(Value::as_bool)
    }

    /// Removes and returns a top-level entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Returns `true` if a dotted path resolves to a value.
    pub fn contains(&self, path: &str) -> bool {
        self.get_path(path).is_some()
    }
}

//! Precondition helpers for handlers.
//!
//! Handlers guard the context shape they depend on with these functions
//! before reading it. Failures surface as [`StepError`] values, which the
//! executor routes through the standard run-time error path — they are not
//! construction-time errors.
//!
//! ```rust
//! use liftoff_pipeline::{confirm, Context, ValueKind};
//!
//! let mut ctx = Context::new();
//! ctx.set_path("files.config", "/tmp/app.toml");
//!
//! confirm::ctx_value(&ctx, "files.config", ValueKind::String)?;
//! # Ok::<(), liftoff_pipeline::StepError>(())
//! ```

use crate::context::{Context, ValueKind};
use crate::error::StepError;
use serde_json::Value;
use std::path::Path;

/// Fails with [`StepError::Assertion`] when the expression is false.
pub fn expr(condition: bool, message: impl Into<String>) -> Result<(), StepError> {
    if condition {
        Ok(())
    } else {
        Err(StepError::Assertion(message.into()))
    }
}

/// Asserts that a dotted context path resolves to a non-empty value of the
/// expected kind.
///
/// # Errors
///
/// - [`StepError::MissingValue`] when the path does not resolve or resolves
///   to null;
/// - [`StepError::TypeMismatch`] when the value has a different kind;
/// - [`StepError::Assertion`] when the value is an empty string, array, or
///   object.
pub fn ctx_value(ctx: &Context, path: &str, expected: ValueKind) -> Result<(), StepError> {
    let value = ctx.get_path(path).ok_or_else(|| StepError::MissingValue {
        path: path.to_string(),
    })?;

    let found = ValueKind::of(value);
    if found == ValueKind::Null {
        return Err(StepError::MissingValue {
            path: path.to_string(),
        });
    }
    if found != expected {
        return Err(StepError::TypeMismatch {
            path: path.to_string(),
            expected,
            found,
        });
    }

    let empty = match value {
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    };
    expr(!empty, format!("context value at `{path}` is empty"))
}

/// Asserts that a directory exists, creating it (and its parents) when
/// missing.
pub fn directory_exists(path: impl AsRef<Path>) -> Result<(), StepError> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

//! Configuration loading and validation.
//!
//! [`load`] reads the TOML document at ctx `files.config`, writing a
//! commented default on first run, and stores the parsed document at ctx
//! `config` as JSON data. [`validator`] wraps a caller predicate over the
//! parsed document, turning a rejection into a step failure.

use liftoff_pipeline::{confirm, StepError, StepFn, ValueKind};
use serde_json::Value;
use std::path::PathBuf;
use std::rc::Rc;

/// The stock default: load (and first-run create) the configuration file
/// named at ctx `files.config`.
pub fn load() -> StepFn {
    Rc::new(|app, ctx| {
        confirm::ctx_value(ctx, "files.config", ValueKind::String)?;
        let path = PathBuf::from(ctx.get_str("files.config").unwrap_or_default());

        if !path.exists() {
            if let Some(parent) = path.parent() {
                confirm::directory_exists(parent)?;
            }
            std::fs::write(&path, default_document(app.name(), app.version()))?;
            tracing::info!("wrote default configuration to {}", path.display());
        }

        let content = std::fs::read_to_string(&path)?;
        let document: toml::Value = toml::from_str(&content).map_err(|err| {
            StepError::failed(format!("invalid configuration at {}: {err}", path.display()))
        })?;
        ctx.set("config", toml_to_json(document));
        Ok(())
    })
}

/// Creates a step that runs a caller predicate against the parsed
/// configuration at ctx `config`. The predicate's error fails the step.
pub fn validator<F>(validate: F) -> StepFn
where
    F: Fn(&Value) -> anyhow::Result<()> + 'static,
{
    Rc::new(move |_, ctx| {
        confirm::ctx_value(ctx, "config", ValueKind::Object)?;
        let document = ctx.get("config").cloned().unwrap_or(Value::Null);
        validate(&document).map_err(StepError::Failed)
    })
}

/// The document written on first run.
fn default_document(name: &str, version: &str) -> String {
    format!(
        "# {name} configuration\n\
         \n\
         [app]\n\
         name = \"{name}\"\n\
         version = \"{version}\"\n\
         debug = false\n"
    )
}

/// Converts a parsed TOML document into JSON data for the context.
pub(crate) fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, item)| (key, toml_to_json(item)))
                .collect(),
        ),
    }
}

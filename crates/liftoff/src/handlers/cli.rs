//! Command-line argument parsing handlers.
//!
//! The pipeline core treats the argument parser as a pluggable backend; the
//! contract is only that the step leaves a name-to-value mapping at ctx
//! `cli_args`. [`parse`] is the clap-backed handler; [`raw`] is the
//! zero-configuration default that records the unparsed argument list.

use liftoff_pipeline::{StepError, StepFn};
use serde_json::{Map, Value};
use std::rc::Rc;

/// Creates a step that parses the application's raw arguments with the
/// given clap command and stores the result at ctx `cli_args`.
///
/// Flags become booleans, valued options strings, multi-valued options
/// arrays. Each subcommand on the matched path is recorded under its own
/// name as `true`, and the full dotted path under `"command"` (so
/// `myapp config get` yields `{"config": true, "get": true,
/// "command": "config.get", ...}`). Parse failures fail the step and are
/// routed to the error handler.
pub fn parse(command: clap::Command) -> StepFn {
    Rc::new(move |app, ctx| {
        let matches = command
            .clone()
            .try_get_matches_from(app.args())
            .map_err(|err| StepError::Failed(anyhow::Error::new(err)))?;
        ctx.set("cli_args", matches_to_value(&matches));
        Ok(())
    })
}

/// The stock default: no parser configured, so the argument list (minus
/// the program name) is stored verbatim at ctx `cli_args.args`.
pub fn raw() -> StepFn {
    Rc::new(|app, ctx| {
        let args: Vec<Value> = app
            .args()
            .iter()
            .skip(1)
            .map(|arg| Value::String(arg.clone()))
            .collect();
        ctx.set_path("cli_args.args", Value::Array(args));
        Ok(())
    })
}

/// Flattens parsed matches into a JSON mapping, walking down the matched
/// subcommand path.
fn matches_to_value(matches: &clap::ArgMatches) -> Value {
    let mut map = Map::new();
    collect_args(matches, &mut map);

    let mut path = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        map.insert(name.to_string(), Value::Bool(true));
        collect_args(sub, &mut map);
        path.push(name.to_string());
        current = sub;
    }
    if !path.is_empty() {
        map.insert("command".to_string(), Value::String(path.join(".")));
    }

    Value::Object(map)
}

fn collect_args(matches: &clap::ArgMatches, map: &mut Map<String, Value>) {
    for id in matches.ids() {
        let key = id.as_str();
        if let Ok(Some(values)) = matches.try_get_many::<String>(key) {
            let mut values: Vec<Value> = values
                .map(|value| Value::String(value.clone()))
                .collect();
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            map.insert(key.to_string(), value);
        } else if let Ok(Some(flag)) = matches.try_get_one::<bool>(key) {
            map.insert(key.to_string(), Value::Bool(*flag));
        }
    }
}

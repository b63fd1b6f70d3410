//! Environment-variable snapshot handlers.
//!
//! Scrapes the process environment for variables carrying the
//! application's prefix and stores them, full names intact, at ctx
//! `env_vars`.

use liftoff_pipeline::{Context, StepFn};
use serde_json::{Map, Value};
use std::rc::Rc;

/// The stock default: snapshots variables prefixed with the uppercased
/// application name plus an underscore (`MYAPP_` for an application named
/// `myapp`; dashes become underscores).
pub fn snapshot() -> StepFn {
    Rc::new(|app, ctx| {
        let prefix = format!("{}_", app.name().to_uppercase().replace('-', "_"));
        collect(&prefix, ctx);
        Ok(())
    })
}

/// Creates a snapshot step with an explicit prefix.
pub fn with_prefix(prefix: impl Into<String>) -> StepFn {
    let prefix = prefix.into();
    Rc::new(move |_, ctx| {
        collect(&prefix, ctx);
        Ok(())
    })
}

fn collect(prefix: &str, ctx: &mut Context) {
    let mut vars = Map::new();
    for (key, value) in std::env::vars() {
        if key.starts_with(prefix) {
            vars.insert(key, Value::String(value));
        }
    }
    ctx.set("env_vars", Value::Object(vars));
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftoff_pipeline::{Application, Outcome};
    use serial_test::serial;
    use std::cell::RefCell;

    #[test]
    #[serial]
    fn test_snapshot_uses_app_name_prefix() {
        std::env::set_var("TESTAPP_THINGO", "THINGO!");
        std::env::set_var("OTHERAPP_THINGO", "IGNORED");

        let captured = Rc::new(RefCell::new(Value::Null));
        let sink = captured.clone();

        let app = Application::builder("testapp", "0.1.0")
            .step("env", move |app, ctx| {
                snapshot()(app, ctx)?;
                *sink.borrow_mut() = ctx.get("env_vars").cloned().unwrap_or(Value::Null);
                Ok(())
            })
            .command(|_| Ok(()))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::Completed);

        let vars = captured.borrow();
        assert_eq!(vars["TESTAPP_THINGO"], "THINGO!");
        assert!(vars.get("OTHERAPP_THINGO").is_none());

        std::env::remove_var("TESTAPP_THINGO");
        std::env::remove_var("OTHERAPP_THINGO");
    }

    #[test]
    #[serial]
    fn test_with_prefix_overrides_default() {
        std::env::set_var("CUSTOM_VALUE", "42");

        let captured = Rc::new(RefCell::new(Value::Null));
        let sink = captured.clone();

        let app = Application::builder("testapp", "0.1.0")
            .step("env", move |app, ctx| {
                with_prefix("CUSTOM_")(app, ctx)?;
                *sink.borrow_mut() = ctx.get("env_vars").cloned().unwrap_or(Value::Null);
                Ok(())
            })
            .command(|_| Ok(()))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::Completed);
        assert_eq!(captured.borrow()["CUSTOM_VALUE"], "42");

        std::env::remove_var("CUSTOM_VALUE");
    }
}

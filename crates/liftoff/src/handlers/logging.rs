//! Logging installation.
//!
//! Installs a `tracing-subscriber` fmt subscriber as a side effect. The
//! filter directive comes from the TOML file named at ctx
//! `files.logging_config` (key `filter`) when that file exists, falling
//! back to `info`. A [`LoggingHandle`] recording the active filter is
//! attached to the application state.

use liftoff_pipeline::{StepError, StepFn};
use std::path::Path;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Attached to `app.state` once the subscriber is installed.
#[derive(Debug, Clone)]
pub struct LoggingHandle {
    /// The filter directive the subscriber was installed with.
    pub filter: String,
}

/// The stock default: install the subscriber from the logging config file,
/// or with the `info` directive when none exists.
pub fn install() -> StepFn {
    Rc::new(|app, ctx| {
        let filter = match ctx.get_str("files.logging_config") {
            Some(path) if Path::new(path).exists() => read_filter(Path::new(path))?,
            _ => None,
        };
        let filter = filter.unwrap_or_else(|| "info".to_string());

        let env_filter = EnvFilter::try_new(&filter)
            .map_err(|err| StepError::failed(format!("invalid logging filter `{filter}`: {err}")))?;

        // A subscriber may already be installed (an earlier run in the same
        // process); that is not a failure.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .try_init();

        app.state.insert(LoggingHandle { filter });
        Ok(())
    })
}

fn read_filter(path: &Path) -> Result<Option<String>, StepError> {
    let content = std::fs::read_to_string(path)?;
    let document: toml::Value = toml::from_str(&content).map_err(|err| {
        StepError::failed(format!("invalid logging config at {}: {err}", path.display()))
    })?;
    Ok(document
        .get("filter")
        .and_then(toml::Value::as_str)
        .map(str::to_string))
}

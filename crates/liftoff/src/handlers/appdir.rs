//! Application-directory resolution.
//!
//! Resolves the per-user data directory for the application, creates it
//! (plus a `logs` subdirectory), and records the conventional paths in the
//! context:
//!
//! - `dirs.data`, `dirs.logs`
//! - `files.config` — `<data>/<name>.config.toml`
//! - `files.logging_config` — `<data>/<name>.logging.toml`
//!
//! Downstream config and logging handlers read these paths back.

use liftoff_pipeline::{confirm, StepError, StepFn};
use std::path::PathBuf;
use std::rc::Rc;

/// The stock default: resolve, create, and record the application
/// directories.
pub fn resolve() -> StepFn {
    Rc::new(|app, ctx| {
        let data = base_dir(app.name())?;
        let logs = data.join("logs");
        confirm::directory_exists(&data)?;
        confirm::directory_exists(&logs)?;

        let name = app.name().to_string();
        ctx.set_path("dirs.data", data.display().to_string());
        ctx.set_path("dirs.logs", logs.display().to_string());
        ctx.set_path(
            "files.config",
            data.join(format!("{name}.config.toml")).display().to_string(),
        );
        ctx.set_path(
            "files.logging_config",
            data.join(format!("{name}.logging.toml")).display().to_string(),
        );
        Ok(())
    })
}

/// Base data directory for an application name.
///
/// A `<NAME>_HOME` environment variable overrides the platform default of
/// `~/.config/<name>` on Unix-like systems and `%APPDATA%\<name>` on
/// Windows.
pub fn base_dir(name: &str) -> Result<PathBuf, StepError> {
    let override_var = format!("{}_HOME", name.to_uppercase().replace('-', "_"));
    if let Ok(dir) = std::env::var(&override_var) {
        return Ok(PathBuf::from(dir));
    }

    #[cfg(windows)]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| StepError::failed("APPDATA environment variable not set"))?;
        Ok(PathBuf::from(appdata).join(name))
    }

    #[cfg(not(windows))]
    {
        let home = std::env::var("HOME")
            .map_err(|_| StepError::failed("HOME environment variable not set"))?;
        Ok(PathBuf::from(home).join(".config").join(name))
    }
}

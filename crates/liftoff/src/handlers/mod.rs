//! Stock handlers for the standard bootstrap roles.
//!
//! Each submodule covers one role and exposes factory functions returning
//! [`StepFn`] values ready to register:
//!
//! - [`cli`]: parse command-line arguments into the `cli_args` mapping
//! - [`env`]: snapshot prefixed environment variables into `env_vars`
//! - [`appdir`]: resolve and create per-user application directories
//! - [`config`]: load (and first-run write) the TOML configuration
//! - [`logging`]: install the tracing subscriber
//! - [`command`]: select the command to run from the parsed arguments
//!
//! [`stock_registry`] wires the zero-configuration defaults into a
//! [`HandlerRegistry`]; roles that cannot work without caller input (the
//! command finder) deliberately have no default, so enabling them bare
//! fails at construction.

pub mod appdir;
pub mod cli;
pub mod command;
pub mod config;
pub mod env;
pub mod logging;

use liftoff_pipeline::HandlerRegistry;

/// Canonical role names used by the stock registry and
/// [`standard`](crate::standard).
pub mod roles {
    /// Command-line argument parsing.
    pub const CLI: &str = "cli";
    /// Environment-variable snapshot.
    pub const ENV: &str = "env";
    /// Application-directory resolution.
    pub const APPDIR: &str = "appdir";
    /// Configuration loading.
    pub const CONFIG: &str = "config";
    /// Logging installation.
    pub const LOGGING: &str = "logging";
    /// Command selection. No stock default: a finder needs to know the
    /// application's commands.
    pub const COMMAND_FINDER: &str = "command_finder";
}

/// Builds the registry of zero-configuration defaults for the stock roles.
pub fn stock_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(roles::CLI, cli::raw());
    registry.register(roles::ENV, env::snapshot());
    registry.register(roles::APPDIR, appdir::resolve());
    registry.register(roles::CONFIG, config::load());
    registry.register(roles::LOGGING, logging::install());
    registry
}

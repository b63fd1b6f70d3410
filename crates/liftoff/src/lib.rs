//! Application-bootstrap framework: declarative setup pipelines for CLIs.
//!
//! Every application needs the same things before its real work starts:
//! parsed command-line arguments, environment variables, somewhere to keep
//! its files, loaded and validated configuration, logging, and a decision
//! about which command to run. `liftoff` declares those as a named, ordered
//! pipeline of setup steps, runs them against a shared context, and then
//! runs the one command a step selected — with every failure routed through
//! a single error handler.
//!
//! The engine (registration, validation, execution) lives in
//! [`liftoff-pipeline`](liftoff_pipeline) and is re-exported here; this
//! crate adds the stock handlers for the standard roles and the
//! [`standard`] builder wiring them together.
//!
//! # Example
//!
//! ```rust,no_run
//! use liftoff::handlers::command;
//! use liftoff::{standard, Context, StepError};
//!
//! fn run(_ctx: &mut Context) -> Result<(), StepError> {
//!     tracing::info!("appy is running!");
//!     Ok(())
//! }
//!
//! let cli = clap::Command::new("appy")
//!     .subcommand(clap::Command::new("run"));
//!
//! let outcome = standard("appy", "0.1.0")
//!     .step(liftoff::handlers::roles::CLI, {
//!         let parse = liftoff::handlers::cli::parse(cli);
//!         move |app: &mut liftoff::Application, ctx: &mut Context| parse(app, ctx)
//!     })
//!     .command_finder({
//!         let find = command::subcommands([("run", command::command(run))]);
//!         move |app: &mut liftoff::Application, ctx: &mut Context| find(app, ctx)
//!     })
//!     .build()
//!     .expect("valid declarations")
//!     .run();
//!
//! std::process::exit(if outcome.is_completed() { 0 } else { 1 });
//! ```
//!
//! # Declaration surface
//!
//! Each recognized role binds to one of: *enable* (use the stock default),
//! *disable* (leave the role out), or a *step* (override). Additional
//! `before_<role>`/`after_<role>` declarations insert steps relative to
//! already-declared roles. Declarations apply in call order, and every
//! configuration mistake fails `build()` with a [`SetupError`] — never the
//! run.

pub mod handlers;

pub use handlers::{roles, stock_registry};

// The engine, re-exported so applications depend on one crate.
pub use liftoff_pipeline::{
    confirm, execute, print_error, Application, ApplicationBuilder, CommandFn, Context,
    ContextFactory, ErrorFn, ExecuteFn, Extensions, HandlerRegistry, Outcome, Pipeline, Position,
    Registration, SetupError, StepError, StepFn, ValueKind, ERROR_ARITY, ERROR_HANDLER,
    EXECUTE_ARITY, EXECUTE_HANDLER, STEP_ARITY,
};

/// Starts a builder with the stock registry and the standard roles enabled
/// in canonical order: `cli`, `env`, `appdir`, `config`, `logging`.
///
/// Individual roles can still be disabled or overridden afterwards; later
/// declarations for the same name replace the default in place.
pub fn standard(name: impl Into<String>, version: impl Into<String>) -> ApplicationBuilder {
    Application::builder(name, version)
        .registry(stock_registry())
        .enable(roles::CLI)
        .enable(roles::ENV)
        .enable(roles::APPDIR)
        .enable(roles::CONFIG)
        .enable(roles::LOGGING)
}

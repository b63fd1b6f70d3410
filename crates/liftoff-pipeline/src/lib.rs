//! Handler-pipeline engine for application bootstrap.
//!
//! `liftoff-pipeline` manages one named, ordered pipeline of setup steps per
//! application instance: registration (defaults, enable/disable, override,
//! relative `before_X`/`after_X` insertion), validation of handler
//! contracts, and two-phase execution — the setup pipeline, then a single
//! command — with centralized error handling.
//!
//! # Model
//!
//! - An [`Application`] is declared through [`ApplicationBuilder`]: each
//!   declaration binds a role name to a [`Registration`] value (`Enable`,
//!   `Disable`, or a callable), processed strictly in call order.
//! - Steps run against a fresh per-invocation [`Context`], an open record
//!   they extend by convention (`cli_args`, `files.config`, ...).
//! - One setup step selects the command; the executor then invokes it.
//! - The first failure in either phase reaches the error role exactly once,
//!   and [`Application::run`] returns an [`Outcome`] instead of propagating.
//!
//! # Example
//!
//! ```rust
//! use liftoff_pipeline::{Application, Outcome};
//!
//! let outcome = Application::builder("appy", "0.1.0")
//!     .step("cli", |_app, ctx| {
//!         ctx.set("cli_args", serde_json::json!({ "run": true }));
//!         Ok(())
//!     })
//!     .command_finder(|app, ctx| {
//!         if ctx.get_bool("cli_args.run") == Some(true) {
//!             app.command = Some(std::rc::Rc::new(|_ctx| Ok(())));
//!         }
//!         Ok(())
//!     })
//!     .build()?
//!     .run();
//!
//! assert_eq!(outcome, Outcome::Completed);
//! # Ok::<(), liftoff_pipeline::SetupError>(())
//! ```
//!
//! This crate is dependency-light by design; the `liftoff` crate supplies
//! the stock handlers (CLI parsing, environment snapshot, app directories,
//! TOML configuration, logging) and the registry wiring them in.

mod app;
pub mod confirm;
mod context;
mod error;
mod executor;
mod handler;
mod pipeline;
mod registry;

pub use app::{Application, ApplicationBuilder, ERROR_HANDLER, EXECUTE_HANDLER};

pub use context::{Context, ContextFactory, ValueKind};

pub use error::{SetupError, StepError};

pub use executor::{execute, print_error, Outcome};

pub use handler::{
    CommandFn, ErrorFn, ExecuteFn, Extensions, Registration, StepFn, ERROR_ARITY, EXECUTE_ARITY,
    STEP_ARITY,
};

pub use pipeline::{Pipeline, Position};

pub use registry::HandlerRegistry;

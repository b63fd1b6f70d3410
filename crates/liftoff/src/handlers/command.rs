//! Command-selection handlers.
//!
//! A command finder is an ordinary step that inspects the parsed arguments
//! and sets `app.command`. When no finder matches, `app.command` stays
//! unset and the executor routes a no-command failure through the error
//! handler.

use liftoff_pipeline::{confirm, CommandFn, Context, StepError, StepFn, ValueKind};
use std::collections::HashMap;
use std::rc::Rc;

/// Wraps a plain function as a [`CommandFn`], for use in finder tables.
pub fn command<F>(f: F) -> CommandFn
where
    F: Fn(&mut Context) -> Result<(), StepError> + 'static,
{
    Rc::new(f)
}

/// Creates a finder step from a selection function. The step asserts that
/// ctx `cli_args` is present, then installs whatever command the function
/// selects; selecting nothing leaves `app.command` unset.
pub fn finder<F>(select: F) -> StepFn
where
    F: Fn(&Context) -> Option<CommandFn> + 'static,
{
    Rc::new(move |app, ctx| {
        confirm::ctx_value(ctx, "cli_args", ValueKind::Object)?;
        if let Some(selected) = select(ctx) {
            app.command = Some(selected);
        }
        Ok(())
    })
}

/// Creates a finder step that maps clap subcommand names to commands.
///
/// Selection first honors the dotted path the [`cli::parse`](super::cli::parse)
/// handler records under `cli_args.command` (`"config.get"` for nested
/// subcommands), then falls back to per-name boolean keys.
pub fn subcommands<I, S>(table: I) -> StepFn
where
    I: IntoIterator<Item = (S, CommandFn)>,
    S: Into<String>,
{
    let table: HashMap<String, CommandFn> = table
        .into_iter()
        .map(|(name, command)| (name.into(), command))
        .collect();

    finder(move |ctx| {
        if let Some(name) = ctx.get_str("cli_args.command") {
            if let Some(selected) = table.get(name) {
                return Some(selected.clone());
            }
        }
        table.iter().find_map(|(name, selected)| {
            (ctx.get_bool(&format!("cli_args.{name}")) == Some(true)).then(|| selected.clone())
        })
    })
}

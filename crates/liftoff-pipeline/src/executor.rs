//! The default execute handler: two-phase, fault-isolated execution.
//!
//! Phase one runs every setup step in order against a fresh context. Phase
//! two invokes the command a step selected. Each phase is independently
//! guarded: the first failure is forwarded to the error handler exactly
//! once, later steps and the command never run, and nothing re-raises past
//! [`Application::run`] — what happens after a failure is entirely up to the
//! error handler, whose default prints and returns.

use crate::app::Application;
use crate::context::Context;
use crate::error::StepError;

/// Terminal state of one executor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every setup step and the command ran without failing.
    Completed,
    /// A setup step failed; the command never ran.
    SetupFailed,
    /// Setup completed but the command failed (or no command was selected).
    CommandFailed,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    /// Returns `true` for either failure state.
    pub fn is_failed(&self) -> bool {
        !self.is_completed()
    }
}

/// The framework-supplied execute handler: linear setup, then the command.
///
/// Installed by default; replaceable through
/// [`ApplicationBuilder::execute_handler`](crate::ApplicationBuilder::execute_handler).
pub fn execute(mut app: Application) -> Outcome {
    let mut ctx = app.new_context();

    for name in app.pipeline.order().to_vec() {
        // Rc-clone detaches the step from the pipeline borrow so it can
        // take `&mut app`.
        let Some(step) = app.pipeline.step(&name).cloned() else {
            continue;
        };
        if let Err(err) = step(&mut app, &mut ctx) {
            (app.error_handler.clone())(&app, &ctx, &err);
            return Outcome::SetupFailed;
        }
    }

    let Some(command) = app.command.take() else {
        let err = StepError::NoCommand;
        (app.error_handler.clone())(&app, &ctx, &err);
        return Outcome::CommandFailed;
    };

    match command(&mut ctx) {
        Ok(()) => Outcome::Completed,
        Err(err) => {
            (app.error_handler.clone())(&app, &ctx, &err);
            Outcome::CommandFailed
        }
    }
}

/// The framework-supplied error handler: prints the application name, the
/// error, and its source chain to stderr, then returns.
pub fn print_error(app: &Application, _ctx: &Context, error: &StepError) {
    tracing::error!(app = app.name(), %error, "run failed");
    eprintln!("{} failed: {error}", app.name());
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(log: &Log, label: &str) -> impl Fn(&mut Application, &mut Context) -> Result<(), StepError> {
        let log = log.clone();
        let label = label.to_string();
        move |_, _| {
            log.borrow_mut().push(label.clone());
            Ok(())
        }
    }

    fn failing(log: &Log, label: &str) -> impl Fn(&mut Application, &mut Context) -> Result<(), StepError> {
        let log = log.clone();
        let label = label.to_string();
        move |_, _| {
            log.borrow_mut().push(label.clone());
            Err(StepError::failed(format!("{label} raised an error")))
        }
    }

    fn capture_errors(log: &Log) -> impl Fn(&Application, &Context, &StepError) {
        let log = log.clone();
        move |_, _, err| log.borrow_mut().push(format!("ERR {err}"))
    }

    #[test]
    fn test_standard_execution_flow() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let command_log = log.clone();

        let app = Application::builder("test", "0.1.0")
            .step("cli", recorder(&log, "CLI"))
            .step("env", recorder(&log, "ENV"))
            .step("config", recorder(&log, "CONFIG"))
            .command(move |_| {
                command_log.borrow_mut().push("CMD".into());
                Ok(())
            })
            .error_handler(capture_errors(&log))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::Completed);
        assert_eq!(*log.borrow(), ["CLI", "ENV", "CONFIG", "CMD"]);
    }

    #[test]
    fn test_setup_failure_halts_pipeline() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let command_log = log.clone();

        let app = Application::builder("test", "0.1.0")
            .step("a", recorder(&log, "A"))
            .step("b", failing(&log, "B"))
            .step("c", recorder(&log, "C"))
            .step("d", recorder(&log, "D"))
            .command(move |_| {
                command_log.borrow_mut().push("CMD".into());
                Ok(())
            })
            .error_handler(capture_errors(&log))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::SetupFailed);
        assert_eq!(*log.borrow(), ["A", "B", "ERR B raised an error"]);
    }

    #[test]
    fn test_command_failure_runs_error_handler_once() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let command_log = log.clone();

        let app = Application::builder("test", "0.1.0")
            .step("cli", recorder(&log, "CLI"))
            .step("config", recorder(&log, "CONFIG"))
            .command(move |_| {
                command_log.borrow_mut().push("CMD".into());
                Err(StepError::failed("CMD raised an error"))
            })
            .error_handler(capture_errors(&log))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::CommandFailed);
        assert_eq!(
            *log.borrow(),
            ["CLI", "CONFIG", "CMD", "ERR CMD raised an error"]
        );
    }

    #[test]
    fn test_missing_command_is_routed_to_error_handler() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let app = Application::builder("test", "0.1.0")
            .step("cli", recorder(&log, "CLI"))
            .error_handler(capture_errors(&log))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::CommandFailed);
        assert_eq!(
            *log.borrow(),
            ["CLI", "ERR no command was selected by the setup pipeline"]
        );
    }

    #[test]
    fn test_finder_sets_command_for_command_phase() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let finder_log = log.clone();

        let app = Application::builder("test", "0.1.0")
            .command_finder(move |app, _| {
                finder_log.borrow_mut().push("FINDER".into());
                let log = finder_log.clone();
                app.command = Some(Rc::new(move |_| {
                    log.borrow_mut().push("CMD".into());
                    Ok(())
                }));
                Ok(())
            })
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::Completed);
        assert_eq!(*log.borrow(), ["FINDER", "CMD"]);
    }

    #[test]
    fn test_fresh_context_per_run() {
        let app = Application::builder("test", "0.1.0")
            .context_factory(|| {
                let mut ctx = Context::new();
                ctx.set("seeded", true);
                ctx
            })
            .step("check", |_, ctx| {
                if ctx.get_bool("seeded") != Some(true) {
                    return Err(StepError::failed("factory was not used"));
                }
                Ok(())
            })
            .command(|_| Ok(()))
            .build()
            .unwrap();

        assert_eq!(app.run(), Outcome::Completed);
    }

    #[test]
    fn test_outcome_predicates() {
        assert!(Outcome::Completed.is_completed());
        assert!(!Outcome::Completed.is_failed());
        assert!(Outcome::SetupFailed.is_failed());
        assert!(Outcome::CommandFailed.is_failed());
    }
}

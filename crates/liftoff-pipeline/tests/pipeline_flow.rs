//! End-to-end flow tests for the pipeline engine: declaration ordering,
//! relative insertion, halt-on-first-error, and command selection working
//! together through the public API.

use liftoff_pipeline::{Application, ApplicationBuilder, Context, Outcome, StepError};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn step(log: &Log, label: &str) -> impl Fn(&mut Application, &mut Context) -> Result<(), StepError> {
    let log = log.clone();
    let label = label.to_string();
    move |_, _| {
        log.borrow_mut().push(label.clone());
        Ok(())
    }
}

fn failing_step(
    log: &Log,
    label: &str,
) -> impl Fn(&mut Application, &mut Context) -> Result<(), StepError> {
    let log = log.clone();
    let label = label.to_string();
    move |_, _| {
        log.borrow_mut().push(label.clone());
        Err(StepError::failed(format!("{label} raised an error")))
    }
}

/// A command-finder step that logs its own run and installs a logging
/// command, the shape real finder handlers take.
fn command_step(
    log: &Log,
    label: &str,
    fail_command: bool,
) -> impl Fn(&mut Application, &mut Context) -> Result<(), StepError> {
    let log = log.clone();
    let label = label.to_string();
    move |app, _| {
        log.borrow_mut().push(format!("{label} HANDLER"));
        let log = log.clone();
        let label = label.clone();
        app.command = Some(Rc::new(move |_| {
            log.borrow_mut().push(format!("{label} CALLED"));
            if fail_command {
                return Err(StepError::failed(format!("{label} raised an error")));
            }
            Ok(())
        }));
        Ok(())
    }
}

fn error_capture(log: &Log) -> impl Fn(&Application, &Context, &StepError) {
    let log = log.clone();
    move |_, _, err| log.borrow_mut().push(format!("ERR {err}"))
}

fn base_app(log: &Log) -> ApplicationBuilder {
    Application::builder("test", "0.1.0")
        .step("cli", step(log, "CLI"))
        .step("env", step(log, "ENV"))
        .step("appdir", step(log, "APPDIR"))
        .step("config", step(log, "CONFIG"))
        .step("context", step(log, "CONTEXT"))
        .step("logging", step(log, "LOGGING"))
        .error_handler(error_capture(log))
}

#[test]
fn standard_execution_flow() {
    let log = new_log();
    let app = base_app(&log)
        .step("command", command_step(&log, "CMD", false))
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::Completed);
    assert_eq!(
        *log.borrow(),
        [
            "CLI",
            "ENV",
            "APPDIR",
            "CONFIG",
            "CONTEXT",
            "LOGGING",
            "CMD HANDLER",
            "CMD CALLED"
        ]
    );
}

#[test]
fn relative_inserts_land_adjacent_to_their_anchors() {
    let log = new_log();
    let app = base_app(&log)
        .step("command", command_step(&log, "CMD", false))
        .before("config", step(&log, "X"))
        .after("logging", step(&log, "Y"))
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::Completed);
    assert_eq!(
        *log.borrow(),
        [
            "CLI",
            "ENV",
            "APPDIR",
            "X",
            "CONFIG",
            "CONTEXT",
            "LOGGING",
            "Y",
            "CMD HANDLER",
            "CMD CALLED"
        ]
    );
}

#[test]
fn first_step_failure_skips_everything_else() {
    let log = new_log();
    let app = Application::builder("test", "0.1.0")
        .step("cli", failing_step(&log, "CLI"))
        .step("env", step(&log, "ENV"))
        .step("config", step(&log, "CONFIG"))
        .step("command", command_step(&log, "CMD", false))
        .error_handler(error_capture(&log))
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::SetupFailed);
    assert_eq!(*log.borrow(), ["CLI", "ERR CLI raised an error"]);
}

#[test]
fn command_failure_reaches_error_handler_after_full_setup() {
    let log = new_log();
    let app = base_app(&log)
        .step("command", command_step(&log, "CMD", true))
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::CommandFailed);
    assert_eq!(
        *log.borrow(),
        [
            "CLI",
            "ENV",
            "APPDIR",
            "CONFIG",
            "CONTEXT",
            "LOGGING",
            "CMD HANDLER",
            "CMD CALLED",
            "ERR CMD raised an error"
        ]
    );
}

#[test]
fn disabled_roles_are_absent_from_the_run() {
    let log = new_log();
    let app = Application::builder("test", "0.1.0")
        .disable("cli")
        .disable("env")
        .step("config", step(&log, "CONFIG"))
        .step("logging", step(&log, "LOGGING"))
        .step("command", command_step(&log, "CMD", false))
        .error_handler(error_capture(&log))
        .build()
        .unwrap();

    assert_eq!(app.pipeline().len(), 3);
    assert_eq!(app.run(), Outcome::Completed);
    assert_eq!(
        *log.borrow(),
        ["CONFIG", "LOGGING", "CMD HANDLER", "CMD CALLED"]
    );
}

#[test]
fn custom_execute_handler_replaces_the_default() {
    let log = new_log();
    let marker = log.clone();

    let app = base_app(&log)
        .step("command", command_step(&log, "CMD", false))
        .execute_handler(move |app| {
            // Runs only the command-selection step, skipping the rest of
            // the setup pipeline.
            let mut ctx = app.new_context();
            let mut app = app;
            let finder = app.pipeline().step("command").cloned().unwrap();
            if finder(&mut app, &mut ctx).is_err() {
                return Outcome::SetupFailed;
            }
            let Some(command) = app.command.take() else {
                return Outcome::CommandFailed;
            };
            marker.borrow_mut().push("ALT EXECUTE".into());
            match command(&mut ctx) {
                Ok(()) => Outcome::Completed,
                Err(_) => Outcome::CommandFailed,
            }
        })
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::Completed);
    assert_eq!(
        *log.borrow(),
        ["CMD HANDLER", "ALT EXECUTE", "CMD CALLED"]
    );
}

#[test]
fn handlers_can_replace_the_context_wholesale() {
    let log = new_log();
    let seen = log.clone();

    let app = Application::builder("test", "0.1.0")
        .step("swap", |_, ctx| {
            let mut fresh = Context::new();
            fresh.set("swapped", true);
            *ctx = fresh;
            Ok(())
        })
        .command(move |ctx| {
            seen.borrow_mut()
                .push(format!("swapped={}", ctx.get_bool("swapped").unwrap_or(false)));
            Ok(())
        })
        .error_handler(error_capture(&log))
        .build()
        .unwrap();

    assert_eq!(app.run(), Outcome::Completed);
    assert_eq!(*log.borrow(), ["swapped=true"]);
}

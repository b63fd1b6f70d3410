//! Application identity, construction, and the run entry point.
//!
//! An [`Application`] owns a name/version pair, the built [`Pipeline`], the
//! context factory, and the two special roles (error handler, execute
//! handler). It is constructed through [`ApplicationBuilder`], which applies
//! registration declarations strictly in call order — the order matters,
//! because relative inserts anchor on what was declared before them.
//!
//! # Example
//!
//! ```rust
//! use liftoff_pipeline::{Application, Outcome};
//!
//! let app = Application::builder("appy", "0.1.0")
//!     .step("greet", |_app, ctx| {
//!         ctx.set("greeting", "hello");
//!         Ok(())
//!     })
//!     .command(|ctx| {
//!         println!("{}", ctx.get_str("greeting").unwrap_or("?"));
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(app.run(), Outcome::Completed);
//! ```

use crate::context::{Context, ContextFactory};
use crate::error::{SetupError, StepError};
use crate::executor;
use crate::handler::{
    CommandFn, ErrorFn, ExecuteFn, Extensions, Registration, ERROR_ARITY, EXECUTE_ARITY,
    STEP_ARITY,
};
use crate::pipeline::{parse_relative, Pipeline};
use crate::registry::HandlerRegistry;
use std::rc::Rc;

/// Declaration name of the error role.
pub const ERROR_HANDLER: &str = "error_handler";
/// Declaration name of the execute role.
pub const EXECUTE_HANDLER: &str = "execute_handler";

/// A fully constructed application, ready to run once.
pub struct Application {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) args: Vec<String>,
    pub(crate) context_factory: ContextFactory,
    pub(crate) pipeline: Pipeline,
    pub(crate) error_handler: ErrorFn,
    pub(crate) execute_handler: ExecuteFn,
    /// Set transiently by a setup step (a command finder) or at build time
    /// (a fixed command); consumed by the executor.
    pub command: Option<CommandFn>,
    /// Typed state area for handles that are not context data (logging
    /// guards, clients). Survives for the Application's lifetime.
    pub state: Extensions,
}

impl Application {
    /// Starts a builder with the application's identity.
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> ApplicationBuilder {
        ApplicationBuilder::new(name, version)
    }

    /// The application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The application version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The raw command-line arguments captured at build time, including the
    /// program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The built pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Creates the per-invocation context via the context factory.
    pub fn new_context(&self) -> Context {
        (self.context_factory)()
    }

    /// Runs the application: hands it to the execute handler, which drives
    /// the setup pipeline and then the command. Failures are routed to the
    /// error handler; nothing propagates past this call.
    pub fn run(self) -> executor::Outcome {
        let execute = Rc::clone(&self.execute_handler);
        execute(self)
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("pipeline", &self.pipeline)
            .field("command", &self.command.is_some())
            .finish()
    }
}

/// Builder applying registration declarations in call order.
///
/// Declarations are buffered and processed by [`build`](Self::build), where
/// every configuration problem surfaces as a [`SetupError`] — never at run
/// time.
pub struct ApplicationBuilder {
    name: String,
    version: String,
    registry: HandlerRegistry,
    declarations: Vec<(String, Registration)>,
    context_factory: Option<ContextFactory>,
    args: Option<Vec<String>>,
    command: Option<CommandFn>,
    finder_declared: bool,
    state: Extensions,
}

impl ApplicationBuilder {
    /// Creates a builder with an empty registry and no declarations.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: HandlerRegistry::new(),
            declarations: Vec::new(),
            context_factory: None,
            args: None,
            command: None,
            finder_declared: false,
            state: Extensions::new(),
        }
    }

    /// Supplies the default-handler registry consulted by
    /// [`enable`](Self::enable) declarations.
    pub fn registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Declares a role by name with an explicit [`Registration`] value. The
    /// general form behind the convenience methods; also the way to pass
    /// `before_X`/`after_X` names directly.
    pub fn handler(mut self, name: impl Into<String>, registration: Registration) -> Self {
        self.declarations.push((name.into(), registration));
        self
    }

    /// Enables a role, using the registry default.
    pub fn enable(self, name: impl Into<String>) -> Self {
        self.handler(name, Registration::Enable)
    }

    /// Explicitly disables a role.
    pub fn disable(self, name: impl Into<String>) -> Self {
        self.handler(name, Registration::Disable)
    }

    /// Registers a step under a role name, overriding any default.
    pub fn step<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Application, &mut Context) -> Result<(), StepError> + 'static,
    {
        self.handler(name, Registration::step(f))
    }

    /// Inserts a step immediately before an already-declared role. Stored
    /// under the name `before_<target>`.
    pub fn before<F>(self, target: &str, f: F) -> Self
    where
        F: Fn(&mut Application, &mut Context) -> Result<(), StepError> + 'static,
    {
        self.handler(format!("before_{target}"), Registration::step(f))
    }

    /// Inserts a step immediately after an already-declared role. Stored
    /// under the name `after_<target>`.
    pub fn after<F>(self, target: &str, f: F) -> Self
    where
        F: Fn(&mut Application, &mut Context) -> Result<(), StepError> + 'static,
    {
        self.handler(format!("after_{target}"), Registration::step(f))
    }

    /// Replaces the default error handler.
    pub fn error_handler<F>(self, f: F) -> Self
    where
        F: Fn(&Application, &Context, &StepError) + 'static,
    {
        self.handler(ERROR_HANDLER, Registration::error_handler(f))
    }

    /// Replaces the default execute handler. In practice applications
    /// should not need to override this.
    pub fn execute_handler<F>(self, f: F) -> Self
    where
        F: Fn(Application) -> executor::Outcome + 'static,
    {
        self.handler(EXECUTE_HANDLER, Registration::execute(f))
    }

    /// Sets a fixed command function, bypassing command selection. Mutually
    /// exclusive with [`command_finder`](Self::command_finder).
    pub fn command<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Context) -> Result<(), StepError> + 'static,
    {
        self.command = Some(Rc::new(f));
        self
    }

    /// Registers a command-finder step under the `command_finder` role. The
    /// step is expected to set `app.command`. Mutually exclusive with
    /// [`command`](Self::command).
    pub fn command_finder<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Application, &mut Context) -> Result<(), StepError> + 'static,
    {
        self.finder_declared = true;
        self.handler("command_finder", Registration::step(f))
    }

    /// Replaces the context factory. The default produces an empty
    /// [`Context`].
    pub fn context_factory<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Context + 'static,
    {
        self.context_factory = Some(Rc::new(f));
        self
    }

    /// Supplies the raw command-line arguments (including the program
    /// name). Defaults to `std::env::args()`.
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches typed application state available to all handlers via
    /// `app.state`.
    pub fn state<T: 'static>(mut self, value: T) -> Self {
        self.state.insert(value);
        self
    }

    /// Builds the Application, applying declarations in call order.
    ///
    /// # Errors
    ///
    /// Any [`SetupError`]: arity mismatch between a callable and its role,
    /// enabling a role without a default, relative insertion against an
    /// unknown anchor, duplicate names, or conflicting command wiring.
    pub fn build(mut self) -> Result<Application, SetupError> {
        if self.command.is_some() && self.finder_declared {
            return Err(SetupError::ConflictingCommand);
        }

        let mut pipeline = Pipeline::new();
        let mut error_handler: ErrorFn = Rc::new(executor::print_error);
        let mut execute_handler: ExecuteFn = Rc::new(executor::execute);

        for (name, registration) in self.declarations.drain(..) {
            match name.as_str() {
                ERROR_HANDLER => match registration {
                    Registration::ErrorHandler(f) => error_handler = f,
                    // Sentinels keep the framework default.
                    Registration::Enable | Registration::Disable => {}
                    other => {
                        return Err(SetupError::ArityMismatch {
                            name,
                            required: ERROR_ARITY,
                            found: other.arity().unwrap_or(0),
                        });
                    }
                },
                EXECUTE_HANDLER => match registration {
                    Registration::Execute(f) => execute_handler = f,
                    Registration::Enable | Registration::Disable => {}
                    other => {
                        return Err(SetupError::ArityMismatch {
                            name,
                            required: EXECUTE_ARITY,
                            found: other.arity().unwrap_or(0),
                        });
                    }
                },
                _ => match registration {
                    Registration::Enable => pipeline.enable(&name, &self.registry)?,
                    // A later disable wins over an earlier enable.
                    Registration::Disable => pipeline.remove(&name),
                    Registration::Step(f) => match parse_relative(&name) {
                        Some((position, target)) => {
                            let target = target.to_string();
                            pipeline.insert_relative(&name, &target, position, f)?;
                        }
                        None => pipeline.register(&name, f),
                    },
                    other => {
                        return Err(SetupError::ArityMismatch {
                            name,
                            required: STEP_ARITY,
                            found: other.arity().unwrap_or(0),
                        });
                    }
                },
            }
        }

        Ok(Application {
            name: self.name,
            version: self.version,
            args: self
                .args
                .unwrap_or_else(|| std::env::args().collect()),
            context_factory: self
                .context_factory
                .unwrap_or_else(|| Rc::new(Context::new)),
            pipeline,
            error_handler,
            execute_handler,
            command: self.command,
            state: self.state,
        })
    }
}

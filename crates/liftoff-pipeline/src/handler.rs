//! Handler contracts and registration values.
//!
//! A handler's "shape" is fixed at registration time by the [`Registration`]
//! variant it arrives in, not discovered by runtime signature inspection:
//!
//! - ordinary steps take `(app, ctx)` — arity 2;
//! - the error handler takes `(app, ctx, error)` — arity 3;
//! - the execute handler takes `(app)` — arity 1.
//!
//! Each variant carries its arity and the builder checks it once against the
//! role being registered, so a step callable handed to the error role fails
//! construction with an arity mismatch naming both counts.
//!
//! # Single-Threaded Design
//!
//! Bootstrap pipelines are single-threaded: one Application, one run, one
//! step at a time. Handlers are shared as `Rc<dyn Fn>` rather than
//! `Arc<dyn Fn + Send + Sync>`, allowing natural closures without interior
//! mutability wrappers.

use crate::app::Application;
use crate::context::Context;
use crate::error::StepError;
use crate::executor::Outcome;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// An ordinary pipeline step. Mutates the application and context in place;
/// either may be wholesale replaced through the `&mut` reference.
pub type StepFn = Rc<dyn Fn(&mut Application, &mut Context) -> Result<(), StepError>>;

/// The error role. Receives the failing run's application, context, and the
/// error that stopped it. Runs at most once per invocation.
pub type ErrorFn = Rc<dyn Fn(&Application, &Context, &StepError)>;

/// The execute role. Consumes the Application and drives the full
/// setup-then-command sequence, returning the terminal [`Outcome`].
pub type ExecuteFn = Rc<dyn Fn(Application) -> Outcome>;

/// The command selected by the setup pipeline, invoked once with the
/// context after setup completes.
pub type CommandFn = Rc<dyn Fn(&mut Context) -> Result<(), StepError>>;

/// Argument count of the ordinary step contract `(app, ctx)`.
pub const STEP_ARITY: usize = 2;
/// Argument count of the error-handler contract `(app, ctx, error)`.
pub const ERROR_ARITY: usize = 3;
/// Argument count of the execute-handler contract `(app)`.
pub const EXECUTE_ARITY: usize = 1;

/// A registration declaration value: what the caller binds a role name to.
///
/// This is the Rust rendition of the `{true, None, callable}` declaration
/// surface: `Enable` asks for the registry default, `Disable` turns the role
/// off, and the callable variants carry the handler itself, tagged with its
/// contract.
#[derive(Clone)]
pub enum Registration {
    /// Use the registry default for this role.
    Enable,
    /// Explicitly turn this role off. The role is absent from the execution
    /// order, indistinguishable at run time from never being mentioned.
    Disable,
    /// An ordinary step (override or relative insert).
    Step(StepFn),
    /// The error role callable.
    ErrorHandler(ErrorFn),
    /// The execute role callable.
    Execute(ExecuteFn),
}

impl Registration {
    /// Wraps a closure as a step registration.
    pub fn step<F>(f: F) -> Self
    where
        F: Fn(&mut Application, &mut Context) -> Result<(), StepError> + 'static,
    {
        Registration::Step(Rc::new(f))
    }

    /// Wraps a closure as an error-handler registration.
    pub fn error_handler<F>(f: F) -> Self
    where
        F: Fn(&Application, &Context, &StepError) + 'static,
    {
        Registration::ErrorHandler(Rc::new(f))
    }

    /// Wraps a closure as an execute-handler registration.
    pub fn execute<F>(f: F) -> Self
    where
        F: Fn(Application) -> Outcome + 'static,
    {
        Registration::Execute(Rc::new(f))
    }

    /// Returns the declared arity of a callable variant, `None` for the
    /// sentinel variants.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Registration::Enable | Registration::Disable => None,
            Registration::Step(_) => Some(STEP_ARITY),
            Registration::ErrorHandler(_) => Some(ERROR_ARITY),
            Registration::Execute(_) => Some(EXECUTE_ARITY),
        }
    }
}

impl From<bool> for Registration {
    /// `true` enables the registry default, `false` disables the role —
    /// the declaration-map sentinels.
    fn from(enabled: bool) -> Self {
        if enabled {
            Registration::Enable
        } else {
            Registration::Disable
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Registration::Enable => "Enable",
            Registration::Disable => "Disable",
            Registration::Step(_) => "Step",
            Registration::ErrorHandler(_) => "ErrorHandler",
            Registration::Execute(_) => "Execute",
        };
        f.write_str(name)
    }
}

/// Type-safe container for state handlers attach to the Application.
///
/// Context values must be representable as JSON data; anything that is not —
/// a logging guard, a database handle — lives here instead, keyed by type.
/// Each type is stored at most once; inserting again replaces the previous
/// value.
#[derive(Default)]
pub struct Extensions {
    map: HashMap<TypeId, Box<dyn Any>>,
}

impl Extensions {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value of the same type if
    /// one existed.
    pub fn insert<T: 'static>(&mut self, val: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(val))
            .and_then(|boxed| boxed.downcast().ok().map(|b| *b))
    }

    /// Gets a reference to the value of the given type.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Gets a mutable reference to the value of the given type.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    /// Gets a reference to the value of the given type, failing the step
    /// when nothing of that type was attached. The usual accessor inside
    /// handlers that depend on state an earlier step set up.
    pub fn required<T: 'static>(&self) -> Result<&T, StepError> {
        self.get::<T>().ok_or_else(|| {
            StepError::failed(format!(
                "application state has no value of type {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Removes the value of the given type, returning it if it existed.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok().map(|b| *b))
    }

    /// Returns `true` if a value of the given type is stored.
    pub fn contains<T: 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.map.len())
            .finish()
    }
}

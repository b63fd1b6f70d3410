//! Error types for the pipeline engine.
//!
//! Two distinct failure families exist and never mix:
//!
//! - [`SetupError`]: construction-time problems (bad registration, missing
//!   defaults, conflicting command wiring). These are returned from
//!   [`ApplicationBuilder::build`](crate::ApplicationBuilder::build) and are
//!   never deferred to run time.
//! - [`StepError`]: runtime problems raised by a pipeline step or by the
//!   selected command. These are caught exactly once per run at the executor
//!   boundary and forwarded to the error handler.

use crate::context::ValueKind;
use thiserror::Error;

/// Construction-time error. Raised while the builder applies registration
/// declarations; an Application with a `SetupError` is never built.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A callable was registered for a role whose contract requires a
    /// different number of arguments.
    #[error(
        "handler `{name}` must take {required} arguments, but the registered callable takes {found}"
    )]
    ArityMismatch {
        /// Declaration name the callable was registered under.
        name: String,
        /// Argument count the role's contract requires.
        required: usize,
        /// Argument count of the callable that was actually registered.
        found: usize,
    },

    /// A role was enabled but the handler registry has no default for it.
    #[error("enabling `{0}` requires a default handler, but none is registered")]
    NoDefault(String),

    /// A `before_X`/`after_X` declaration named a target that is not in the
    /// execution order yet. Relative insertion only works against steps that
    /// were registered earlier in the declaration sequence.
    #[error("expecting to insert `{name}` relative to `{target}`, but `{target}` is not registered")]
    UnknownAnchor {
        /// The full prefixed declaration name.
        name: String,
        /// The anchor the prefix resolved to.
        target: String,
    },

    /// Two declarations used the same name.
    #[error("duplicate handler name: `{0}`")]
    DuplicateHandler(String),

    /// Both a fixed command function and a command finder were supplied.
    #[error("cannot provide both a command function and a command finder")]
    ConflictingCommand,
}

/// Runtime error raised by a pipeline step or by the command.
///
/// Handlers fail by returning one of these; the executor routes the first
/// failure to the error handler and halts. Arbitrary handler failures travel
/// through the [`StepError::Failed`] variant via `anyhow`.
#[derive(Debug, Error)]
pub enum StepError {
    /// A handler precondition expressed through [`confirm::expr`](crate::confirm::expr)
    /// did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// A dotted context path did not resolve to a value.
    #[error("missing context value at `{path}`")]
    MissingValue {
        /// The dotted path that failed to resolve.
        path: String,
    },

    /// A dotted context path resolved to a value of the wrong kind.
    #[error("context value at `{path}` should be {expected}, found {found}")]
    TypeMismatch {
        /// The dotted path that resolved.
        path: String,
        /// The kind the handler required.
        expected: ValueKind,
        /// The kind actually stored.
        found: ValueKind,
    },

    /// The setup pipeline completed without any step selecting a command.
    #[error("no command was selected by the setup pipeline")]
    NoCommand,

    /// Filesystem failure while asserting or creating a directory.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other handler failure.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl StepError {
    /// Creates a generic step failure from a message.
    pub fn failed(message: impl std::fmt::Display) -> Self {
        StepError::Failed(anyhow::anyhow!("{message}"))
    }
}

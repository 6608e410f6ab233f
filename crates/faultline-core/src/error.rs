//! The structured [`Error`] type and the capability-free [`Plain`] error.

use std::fmt;
use std::io;

use crate::inspect::{shared, Inspect, SharedError};
use crate::types::{Kind, Op};

/// Message of the error [`unwrap`](crate::unwrap) synthesizes when a chain
/// holds no structured [`Error`].
pub const INTERNAL_MESSAGE: &str = "Internal error or inconsistency";

// ─── Error ────────────────────────────────────────────────────────────────────

/// Normalized error: a message, a kind, an optional operation and an owned
/// link to the error that caused it.
///
/// ```rust
/// use faultline_core::{kind_of, shared, Error, Kind, Plain};
///
/// let err = shared(Error::wrap(Kind::NOT_FOUND, Plain::msg("no such row")).with_op("user.get"));
/// assert_eq!(kind_of(Some(&err)), Kind::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    kind: Kind,
    op: Option<Op>,
    cause: Option<SharedError>,
}

impl Error {
    /// A new error with no cause.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            op: None,
            cause: None,
        }
    }

    /// Classify `cause` as `kind`, reusing its text as the message.
    pub fn wrap(kind: Kind, cause: impl Inspect) -> Self {
        let cause = shared(cause);
        Self {
            message: cause.to_string(),
            kind,
            op: None,
            cause: Some(cause),
        }
    }

    /// The fallback for a chain with no structured error in it.
    pub(crate) fn internal(cause: SharedError) -> Self {
        Self::new(Kind::INTERNAL, INTERNAL_MESSAGE).with_shared_cause(cause)
    }

    /// Set the operation that failed.
    pub fn with_op(mut self, op: impl Into<Op>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the cause.
    pub fn with_cause(self, cause: impl Inspect) -> Self {
        self.with_shared_cause(shared(cause))
    }

    /// Set the cause to an error that is already shared.
    pub fn with_shared_cause(mut self, cause: SharedError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> Kind {
        self.kind.clone()
    }

    pub fn op(&self) -> Option<&Op> {
        self.op.as_ref()
    }

    pub fn cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = &self.op {
            write!(f, "{op}: ")?;
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

impl Inspect for Error {
    fn caused_by(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }

    fn kind(&self) -> Option<Kind> {
        Some(self.kind.clone())
    }

    fn op(&self) -> Option<&Op> {
        self.op.as_ref()
    }
}

// ─── Plain ────────────────────────────────────────────────────────────────────

/// An error with no capabilities: it ends a chain and declares no kind.
#[derive(Debug, thiserror::Error)]
pub enum Plain {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

impl Plain {
    /// A plain error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Adopt any std error into a chain.
    pub fn foreign(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Foreign(Box::new(err))
    }
}

impl Inspect for Plain {}

// ─── std::io::Error ───────────────────────────────────────────────────────────

/// Classifies by `io::ErrorKind`. An `io::Error` ends the chain; when its kind
/// maps to nothing (e.g. `io::Error::other(err)`), a structured [`Error`]
/// boxed inside it supplies the kind and op instead.
impl Inspect for io::Error {
    fn kind(&self) -> Option<Kind> {
        use io::ErrorKind as K;
        let kind = match io::Error::kind(self) {
            K::NotFound => Kind::NOT_FOUND,
            K::PermissionDenied => Kind::PERMISSION,
            K::AlreadyExists => Kind::EXISTS,
            K::InvalidInput | K::InvalidData => Kind::INVALID,
            K::TimedOut => Kind::TIMEOUT,
            K::ConnectionRefused
            | K::ConnectionReset
            | K::ConnectionAborted
            | K::NotConnected
            | K::BrokenPipe => Kind::UNAVAILABLE,
            _ => return boxed_structured(self).map(Error::kind),
        };
        Some(kind)
    }

    fn op(&self) -> Option<&Op> {
        boxed_structured(self).and_then(Error::op)
    }
}

fn boxed_structured(err: &io::Error) -> Option<&Error> {
    err.get_ref()?.downcast_ref::<Error>()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

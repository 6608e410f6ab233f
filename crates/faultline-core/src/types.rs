//! Classification tokens: [`Kind`] and [`Op`].

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ─── Kind ─────────────────────────────────────────────────────────────────────

/// Coarse classification of an error, used for handling decisions.
///
/// `Kind` is an opaque token compared by name, so crates that know nothing
/// about each other can still agree on a classification. The built-in
/// constants cover the common cases; define your own with [`Kind::new`]:
///
/// ```rust
/// use faultline_core::Kind;
///
/// const QUOTA: Kind = Kind::new("quota");
/// assert_ne!(QUOTA, Kind::INTERNAL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    /// Internal error or inconsistency. The default when nothing in a
    /// chain declares a kind.
    pub const INTERNAL: Kind = Kind::new("internal");
    /// Invalid input or arguments.
    pub const INVALID: Kind = Kind::new("invalid");
    /// The requested item does not exist.
    pub const NOT_FOUND: Kind = Kind::new("not_found");
    /// The item already exists.
    pub const EXISTS: Kind = Kind::new("exists");
    /// The caller is not allowed to perform the operation.
    pub const PERMISSION: Kind = Kind::new("permission");
    /// The caller could not be identified.
    pub const UNAUTHENTICATED: Kind = Kind::new("unauthenticated");
    /// A dependency is unreachable or overloaded.
    pub const UNAVAILABLE: Kind = Kind::new("unavailable");
    /// The operation ran out of time.
    pub const TIMEOUT: Kind = Kind::new("timeout");

    /// Create a kind from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a kind from a runtime string (e.g. read from a report).
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` for kinds where retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        *self == Self::UNAVAILABLE || *self == Self::TIMEOUT
    }
}

impl Default for Kind {
    fn default() -> Self {
        Self::INTERNAL
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Op ───────────────────────────────────────────────────────────────────────

/// Label of the operation that failed (e.g. `"user.get"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Op(Cow<'static, str>);

impl Op {
    /// Create an operation label from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create an operation label from a runtime string.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Op {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

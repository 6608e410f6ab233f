//! faultline-core — error chain inspection and classification.
//!
//! This crate defines:
//! - [`Inspect`] — the optional capabilities an error exposes (cause, kind, op)
//! - [`Error`] — the structured error: message, [`Kind`], [`Op`], owned cause
//! - [`Kind`] — the opaque, comparable classification token
//! - [`Chain`] — the iterator every inspection walks
//! - [`cause`], [`unwrap`], [`kind_of`], [`is_kind`], [`op_of`], [`ops`]
//! - [`Report`] — a serializable chain snapshot (feature `report`)
//!
//! # Quick Start
//!
//! ```rust
//! use faultline_core::{cause, is_kind, kind_of, shared, unwrap, Error, Kind, Plain};
//!
//! let root = shared(Plain::msg("no rows returned"));
//! let err = shared(
//!     Error::new(Kind::NOT_FOUND, "user does not exist")
//!         .with_op("user.get")
//!         .with_shared_cause(root.clone()),
//! );
//!
//! assert_eq!(kind_of(Some(&err)), Kind::NOT_FOUND);
//! assert!(!is_kind(Some(&err), &Kind::INTERNAL));
//! assert_eq!(cause(Some(&err)).unwrap().to_string(), "no rows returned");
//! assert_eq!(unwrap(Some(&err)).unwrap().message(), "user does not exist");
//! ```

pub mod error;
pub mod inspect;
#[cfg(feature = "report")]
pub mod report;
pub mod types;

pub use error::{Error, Plain, INTERNAL_MESSAGE};
pub use inspect::{
    cause, chain, is_kind, kind_of, op_of, ops, shared, unwrap, Chain, Inspect, SharedError,
};
#[cfg(feature = "report")]
pub use report::{Frame, Report};
pub use types::{Kind, Op};

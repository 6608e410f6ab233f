//! Serializable snapshots of an error chain, for logging layers and other
//! consumers that need the chain as data.

use serde::{Deserialize, Serialize};

use crate::inspect::{as_structured, chain, kind_of, op_of, Inspect, SharedError};
use crate::types::{Kind, Op};

/// One element of a captured chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// The element's own message (a structured error's message, otherwise
    /// its `Display` text).
    pub message: String,
    /// Kind declared by this element, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    /// Operation declared by this element, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<Op>,
    /// Whether this element is a structured [`Error`](crate::Error).
    #[serde(default)]
    pub structured: bool,
}

/// Snapshot of an error chain: its resolved classification plus one
/// [`Frame`] per element, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Resolved kind of the whole chain.
    pub kind: Kind,
    /// First operation label in the chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<Op>,
    /// `Display` text of the outermost error.
    pub message: String,
    pub chain: Vec<Frame>,
}

impl Report {
    /// Capture the chain starting at `err`.
    pub fn capture(err: &SharedError) -> Self {
        let frames = chain(Some(err))
            .map(|link| {
                let structured = as_structured(link);
                Frame {
                    message: structured
                        .map(|e| e.message().to_string())
                        .unwrap_or_else(|| link.to_string()),
                    kind: link.kind(),
                    op: link.op().cloned(),
                    structured: structured.is_some(),
                }
            })
            .collect();

        Self {
            kind: kind_of(Some(err)),
            op: op_of(Some(err)).cloned(),
            message: err.to_string(),
            chain: frames,
        }
    }

    /// The deepest frame.
    pub fn root(&self) -> Option<&Frame> {
        self.chain.last()
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

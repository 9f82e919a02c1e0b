//! Refspec parsing: `[+][local][:remote]`.
//!
//! The leading `+` is the force flag, a first-class input that bypasses
//! the fast-forward check on push.

use serde::{Deserialize, Serialize};

/// A parsed refspec mapping a local ref to a remote ref.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSpec {
    /// Local ref name; empty means "no local source" (a deletion push).
    pub src: String,
    /// Remote ref name.
    pub dst: String,
    /// Bypass the fast-forward check.
    pub force: bool,
}

impl RefSpec {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            force: false,
        }
    }

    pub fn forced(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            force: true,
        }
    }

    /// Parse `[+][local][:remote]`. A missing `:remote` mirrors the local
    /// name; an empty local side with a remote side is a deletion.
    pub fn parse(s: &str) -> Option<Self> {
        let (force, rest) = match s.strip_prefix('+') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        if rest.is_empty() {
            return None;
        }
        let mut parts = rest.splitn(2, ':');
        let src = parts.next()?.to_string();
        let dst = match parts.next() {
            Some(dst) => dst.to_string(),
            None => src.clone(),
        };
        if dst.is_empty() {
            return None;
        }
        Some(Self { src, dst, force })
    }

    /// Whether this spec deletes the remote ref instead of updating it.
    pub fn is_delete(&self) -> bool {
        self.src.is_empty()
    }
}

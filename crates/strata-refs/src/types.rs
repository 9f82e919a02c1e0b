//! Reference types: the only mutable state in a repository.
//!
//! A ref is a named pointer, either directly to an object or symbolically
//! to another ref. `HEAD` is normally symbolic, naming the checked-out
//! branch.

use serde::{Deserialize, Serialize};
use strata_types::ObjectId;

/// The well-known symbolic head ref.
pub const HEAD: &str = "HEAD";

/// Namespace prefix for branches.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Namespace prefix for tags.
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Namespace prefix for remote-tracking refs.
pub const REMOTES_PREFIX: &str = "refs/remotes/";

/// A named reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ref {
    /// Points directly at an object.
    Direct { name: String, target: ObjectId },
    /// Points at another ref by name.
    Symbolic { name: String, target: String },
}

impl Ref {
    pub fn direct(name: impl Into<String>, target: ObjectId) -> Self {
        Self::Direct {
            name: name.into(),
            target,
        }
    }

    pub fn symbolic(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Symbolic {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Direct { name, .. } => name,
            Self::Symbolic { name, .. } => name,
        }
    }

    /// The object a direct ref points at; `None` for symbolic refs.
    pub fn target_id(&self) -> Option<ObjectId> {
        match self {
            Self::Direct { target, .. } => Some(*target),
            Self::Symbolic { .. } => None,
        }
    }

    /// The ref a symbolic ref points at; `None` for direct refs.
    pub fn symbolic_target(&self) -> Option<&str> {
        match self {
            Self::Direct { .. } => None,
            Self::Symbolic { target, .. } => Some(target),
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic { .. })
    }

    /// The last `/`-separated segment of the name.
    pub fn short_name(&self) -> &str {
        self.name().rsplit('/').next().unwrap_or(self.name())
    }
}

/// The canonical branch ref name for a short branch name.
pub fn branch_ref(branch: &str) -> String {
    format!("{HEADS_PREFIX}{branch}")
}

/// The canonical tag ref name for a short tag name.
pub fn tag_ref(tag: &str) -> String {
    format!("{TAGS_PREFIX}{tag}")
}

/// The remote-tracking ref name for a branch on a remote.
pub fn remote_ref(remote: &str, branch: &str) -> String {
    format!("{REMOTES_PREFIX}{remote}/{branch}")
}

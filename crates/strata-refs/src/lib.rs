//! Named reference storage for Strata.
//!
//! References are the only mutable state in a repository: branches under
//! `refs/heads/`, tags under `refs/tags/`, remote-tracking refs under
//! `refs/remotes/`, and the symbolic `HEAD`. Updates go through a strict
//! compare-and-swap so concurrent pushes cannot silently clobber each
//! other.

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use memory::InMemoryRefStore;
pub use names::validate_ref_name;
pub use traits::{RefStore, MAX_SYMREF_DEPTH};
pub use types::{branch_ref, remote_ref, tag_ref, Ref, HEAD, HEADS_PREFIX, REMOTES_PREFIX, TAGS_PREFIX};

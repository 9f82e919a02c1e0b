//! Object graph traversal for Strata.
//!
//! The object graph is an immutable DAG: commits reference parent commits
//! and a root tree; trees reference features, feature types, and subtrees.
//! This crate walks it:
//!
//! - [`PostOrderWalk`] — lazy post-order enumeration of everything
//!   reachable from a root, the backbone of pack streaming
//! - [`is_ancestor`] — commit ancestry test backing fast-forward checks
//! - [`history_slice`] — bounded `{id, parents}` adjacency slices for
//!   sync negotiation
//! - [`verify_connectivity`] — reference integrity after an ingest

pub mod error;
pub mod history;
pub mod walk;

pub use error::{GraphError, GraphResult};
pub use history::{history_slice, is_ancestor, verify_connectivity, HistoryEntry, HistorySlice};
pub use walk::{successor_ids, PostOrderWalk};

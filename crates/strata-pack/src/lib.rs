//! The packed-object stream exchanged between Strata peers.
//!
//! A pack stream is the wire payload of push and fetch: a concatenation of
//! `digest ‖ canonical_object_bytes` records terminated by EOF. Post-order
//! writing guarantees every object is preceded by every object it
//! references, so a strict receiver can validate on the fly, and the
//! `sent`/`have` bookkeeping guarantees no record appears twice in one
//! stream.

pub mod cancel;
pub mod error;
pub mod reader;
pub mod writer;

pub use cancel::CancelToken;
pub use error::{PackError, PackResult};
pub use reader::{ingest, IngestResults};
pub use writer::{write_pack, PackOptions, PackStats};

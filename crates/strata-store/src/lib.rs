//! Content-addressed object storage for Strata.
//!
//! Every revision object — commit, tree, feature, feature type, tag — is
//! stored immutably under the SHA-1 digest of its canonical bytes. The
//! database is append-only: references carry the only mutable state in a
//! repository.
//!
//! # Design Rules
//!
//! 1. Objects are write-once; storing an object is idempotent.
//! 2. Writes are durable before `put` returns; read-after-write holds
//!    across threads.
//! 3. Concurrent reads are always safe (objects are immutable).
//! 4. The null ID is never a valid key.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectDatabase;
pub use traits::ObjectDatabase;

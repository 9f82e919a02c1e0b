//! Wire protocol between Strata peers.
//!
//! Everything a serving peer and a syncing client agree on outside the
//! pack stream itself: endpoint paths, the `{want, have}` JSON bodies,
//! the `{history, missing}` probe response, the text ref manifest, and
//! the XML ref documents.

pub mod endpoint;
pub mod error;
pub mod manifest;
pub mod message;
pub mod xml;

pub use endpoint::endpoints;
pub use error::{ProtocolError, ProtocolResult};
pub use manifest::{format_manifest, parse_manifest, ManifestEntry};
pub use message::{HistoryEntryMessage, HistoryResponse, RevListRequest};
pub use xml::{ChangedRefDocument, RefDocument};

//! The plain-text ref manifest served at `/repo/manifest`.
//!
//! One line per ref: `name SP [symref_target SP] digest`, HEAD first.
//! Symbolic refs carry their target name in the middle column.

use strata_types::ObjectId;

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::parse_id;

/// One parsed manifest line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    /// Present when the ref is symbolic (e.g. HEAD -> refs/heads/master).
    pub symref_target: Option<String>,
    pub id: ObjectId,
}

impl ManifestEntry {
    pub fn direct(name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            name: name.into(),
            symref_target: None,
            id,
        }
    }

    pub fn symbolic(name: impl Into<String>, target: impl Into<String>, id: ObjectId) -> Self {
        Self {
            name: name.into(),
            symref_target: Some(target.into()),
            id,
        }
    }
}

/// Render manifest lines, in the order given.
pub fn format_manifest(entries: &[ManifestEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.name);
        out.push(' ');
        if let Some(target) = &entry.symref_target {
            out.push_str(target);
            out.push(' ');
        }
        out.push_str(&entry.id.to_hex());
        out.push('\n');
    }
    out
}

/// Parse a manifest body. Blank lines are ignored.
pub fn parse_manifest(text: &str) -> ProtocolResult<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(' ').collect();
        let entry = match fields.as_slice() {
            [name, id] => ManifestEntry::direct(*name, parse_id(id)?),
            [name, target, id] => ManifestEntry::symbolic(*name, *target, parse_id(id)?),
            _ => {
                return Err(ProtocolError::Parse(format!(
                    "bad manifest line: {line:?}"
                )))
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}

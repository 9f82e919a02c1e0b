//! JSON message bodies for negotiation endpoints.
//!
//! Object ids travel as lowercase 40-character hex strings on the wire.

use serde::{Deserialize, Serialize};
use strata_graph::{HistoryEntry, HistorySlice};
use strata_types::ObjectId;

use crate::error::{ProtocolError, ProtocolResult};

/// The `{want, have}` pair driving both pack download and history probes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevListRequest {
    #[serde(default)]
    pub want: Vec<String>,
    #[serde(default)]
    pub have: Vec<String>,
}

impl RevListRequest {
    pub fn new(want: &[ObjectId], have: &[ObjectId]) -> Self {
        Self {
            want: want.iter().map(ObjectId::to_hex).collect(),
            have: have.iter().map(ObjectId::to_hex).collect(),
        }
    }

    pub fn want_ids(&self) -> ProtocolResult<Vec<ObjectId>> {
        parse_ids(&self.want)
    }

    pub fn have_ids(&self) -> ProtocolResult<Vec<ObjectId>> {
        parse_ids(&self.have)
    }
}

/// One commit in a history probe response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryMessage {
    pub id: String,
    pub parents: Vec<String>,
}

/// Response body of the history probe endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntryMessage>,
    #[serde(default)]
    pub missing: Vec<String>,
}

impl HistoryResponse {
    pub fn from_slice(slice: &HistorySlice) -> Self {
        Self {
            history: slice
                .history
                .iter()
                .map(|entry| HistoryEntryMessage {
                    id: entry.id.to_hex(),
                    parents: entry.parents.iter().map(ObjectId::to_hex).collect(),
                })
                .collect(),
            missing: slice.missing.iter().map(ObjectId::to_hex).collect(),
        }
    }

    pub fn to_slice(&self) -> ProtocolResult<HistorySlice> {
        let history = self
            .history
            .iter()
            .map(|entry| {
                Ok(HistoryEntry {
                    id: parse_id(&entry.id)?,
                    parents: parse_ids(&entry.parents)?,
                })
            })
            .collect::<ProtocolResult<Vec<_>>>()?;
        Ok(HistorySlice {
            history,
            missing: parse_ids(&self.missing)?,
        })
    }
}

pub(crate) fn parse_id(hex: &str) -> ProtocolResult<ObjectId> {
    ObjectId::from_hex(hex).map_err(|e| ProtocolError::Parse(format!("bad object id: {e}")))
}

fn parse_ids(hex: &[String]) -> ProtocolResult<Vec<ObjectId>> {
    hex.iter().map(|s| parse_id(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> ObjectId {
        ObjectId::from_raw([byte; 20])
    }

    #[test]
    fn rev_list_roundtrip() {
        let request = RevListRequest::new(&[id(1)], &[id(2), id(3)]);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: RevListRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.want_ids().unwrap(), vec![id(1)]);
        assert_eq!(parsed.have_ids().unwrap(), vec![id(2), id(3)]);
    }

    #[test]
    fn rev_list_ids_are_lowercase_hex() {
        let request = RevListRequest::new(&[id(0xAB)], &[]);
        assert_eq!(request.want[0], "ab".repeat(20));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let parsed: RevListRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.want.is_empty());
        assert!(parsed.have.is_empty());
    }

    #[test]
    fn bad_hex_is_a_parse_error() {
        let request = RevListRequest {
            want: vec!["zz".into()],
            have: vec![],
        };
        assert!(matches!(
            request.want_ids(),
            Err(ProtocolError::Parse(_))
        ));
    }

    #[test]
    fn history_response_roundtrip() {
        let slice = HistorySlice {
            history: vec![HistoryEntry {
                id: id(9),
                parents: vec![id(8), id(7)],
            }],
            missing: vec![id(1)],
        };
        let response = HistoryResponse::from_slice(&slice);
        let json = serde_json::to_string(&response).unwrap();
        let parsed: HistoryResponse = serde_json::from_str(&json).unwrap();
        let back = parsed.to_slice().unwrap();
        assert_eq!(back.history, slice.history);
        assert_eq!(back.missing, slice.missing);
    }
}

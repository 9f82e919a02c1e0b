//! The fixed-shape XML documents served by `/refparse` and `/updateref`.
//!
//! Both documents are single-level elements with a known child set, so
//! they are produced and consumed with plain string helpers instead of an
//! XML machinery dependency.

use strata_types::ObjectId;

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::parse_id;

/// The `<Ref>` document: a resolved ref, with its symref target if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefDocument {
    pub name: String,
    pub object_id: ObjectId,
    pub target: Option<String>,
}

impl RefDocument {
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<Ref>");
        push_element(&mut out, "name", &self.name);
        push_element(&mut out, "objectId", &self.object_id.to_hex());
        if let Some(target) = &self.target {
            push_element(&mut out, "target", target);
        }
        out.push_str("</Ref>");
        out
    }

    pub fn from_xml(xml: &str) -> ProtocolResult<Self> {
        Ok(Self {
            name: extract_element(xml, "name")?
                .ok_or_else(|| ProtocolError::Parse("Ref document missing <name>".into()))?,
            object_id: parse_id(&extract_element(xml, "objectId")?.ok_or_else(|| {
                ProtocolError::Parse("Ref document missing <objectId>".into())
            })?)?,
            target: extract_element(xml, "target")?,
        })
    }
}

/// The `<ChangedRef>` document acknowledging a ref update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedRefDocument {
    pub name: String,
    pub object_id: ObjectId,
}

impl ChangedRefDocument {
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<ChangedRef>");
        push_element(&mut out, "name", &self.name);
        push_element(&mut out, "objectId", &self.object_id.to_hex());
        out.push_str("</ChangedRef>");
        out
    }

    pub fn from_xml(xml: &str) -> ProtocolResult<Self> {
        Ok(Self {
            name: extract_element(xml, "name")?.ok_or_else(|| {
                ProtocolError::Parse("ChangedRef document missing <name>".into())
            })?,
            object_id: parse_id(&extract_element(xml, "objectId")?.ok_or_else(|| {
                ProtocolError::Parse("ChangedRef document missing <objectId>".into())
            })?)?,
        })
    }
}

fn push_element(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn extract_element(xml: &str, tag: &str) -> ProtocolResult<Option<String>> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let Some(start) = xml.find(&open) else {
        return Ok(None);
    };
    let body_start = start + open.len();
    let Some(end) = xml[body_start..].find(&close) else {
        return Err(ProtocolError::Parse(format!("unclosed <{tag}> element")));
    };
    Ok(Some(unescape(&xml[body_start..body_start + end])))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> ObjectId {
        ObjectId::from_raw([byte; 20])
    }

    #[test]
    fn ref_document_roundtrip() {
        let doc = RefDocument {
            name: "refs/heads/master".into(),
            object_id: id(1),
            target: None,
        };
        assert_eq!(RefDocument::from_xml(&doc.to_xml()).unwrap(), doc);
    }

    #[test]
    fn symbolic_ref_document_roundtrip() {
        let doc = RefDocument {
            name: "HEAD".into(),
            object_id: id(2),
            target: Some("refs/heads/master".into()),
        };
        let xml = doc.to_xml();
        assert!(xml.contains("<target>refs/heads/master</target>"));
        assert_eq!(RefDocument::from_xml(&xml).unwrap(), doc);
    }

    #[test]
    fn changed_ref_roundtrip() {
        let doc = ChangedRefDocument {
            name: "refs/heads/master".into(),
            object_id: id(3),
        };
        assert_eq!(ChangedRefDocument::from_xml(&doc.to_xml()).unwrap(), doc);
    }

    #[test]
    fn missing_elements_are_rejected() {
        assert!(RefDocument::from_xml("<Ref></Ref>").is_err());
        assert!(ChangedRefDocument::from_xml("<ChangedRef><name>x</name></ChangedRef>").is_err());
    }

    #[test]
    fn unclosed_element_is_rejected() {
        assert!(RefDocument::from_xml("<Ref><name>x</Ref>").is_err());
    }

    #[test]
    fn escaping_survives_roundtrip() {
        let doc = RefDocument {
            name: "refs/heads/a&b".into(),
            object_id: id(4),
            target: None,
        };
        assert_eq!(RefDocument::from_xml(&doc.to_xml()).unwrap(), doc);
    }
}

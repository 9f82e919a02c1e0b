/// HTTP endpoint paths exposed by a serving peer.
pub mod endpoints {
    /// Ref listing, one text line per ref, HEAD first.
    pub const MANIFEST: &str = "/repo/manifest";
    /// Pack download: JSON `{want, have}` in, pack stream out.
    pub const BATCH_OBJECTS: &str = "/repo/batchobjects";
    /// Pack upload: pack stream in (optionally gzip-encoded).
    pub const SEND_OBJECT: &str = "/repo/sendobject";
    /// History probe: JSON `{want, have}` in, `{history, missing}` out.
    pub const EXISTS: &str = "/repo/exists";
    /// Open a push session.
    pub const BEGIN_PUSH: &str = "/repo/beginpush";
    /// Close a push session with a CAS ref update.
    pub const END_PUSH: &str = "/repo/endpush";
    /// Resolve a single ref to an XML document.
    pub const REF_PARSE: &str = "/refparse";
    /// Point a ref at a new value (or delete it).
    pub const UPDATE_REF: &str = "/updateref";
}

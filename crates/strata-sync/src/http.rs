//! HTTP implementation of [`RemoteRepo`] against a serving peer.
//!
//! Read-side calls (manifest, ref parse, probes, pack download) are
//! retried with bounded backoff on transport failures; mutating calls are
//! driven once and their verdicts surfaced. Pack uploads are
//! gzip-compressed; downloads advertise gzip and are decompressed
//! transparently.

use std::io::Write;

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::StatusCode;
use strata_graph::HistorySlice;
use strata_protocol::{
    endpoints, parse_manifest, HistoryResponse, ManifestEntry, RefDocument, RevListRequest,
};
use strata_types::ObjectId;
use tracing::debug;

use crate::backoff::{with_retries, RetryPolicy};
use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteRepo;

/// A remote repository served over HTTP.
pub struct HttpRemote {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpRemote {
    /// Create a remote for a base repository URL
    /// (e.g. `http://peer.example.com:8182`).
    pub fn new(base_url: impl Into<String>) -> SyncResult<Self> {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: impl Into<String>, retry: RetryPolicy) -> SyncResult<Self> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        Ok(Self {
            base_url,
            client,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Map an HTTP status onto the sync error taxonomy.
fn check_status(status: StatusCode, context: &str) -> SyncResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::CONFLICT {
        return Err(SyncError::RemoteHasChanges);
    }
    Err(SyncError::Transport(format!("{context}: HTTP {status}")))
}

#[async_trait]
impl RemoteRepo for HttpRemote {
    async fn open(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn close(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn manifest(&self) -> SyncResult<Vec<ManifestEntry>> {
        let url = self.url(endpoints::MANIFEST);
        with_retries(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                let response = client.get(&url).send().await?;
                check_status(response.status(), "manifest")?;
                let text = response.text().await?;
                Ok(parse_manifest(&text)?)
            }
        })
        .await
    }

    async fn ref_parse(&self, name: &str) -> SyncResult<Option<RefDocument>> {
        let url = self.url(endpoints::REF_PARSE);
        let name = name.to_string();
        with_retries(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let name = name.clone();
            async move {
                let response = client.get(&url).query(&[("name", name)]).send().await?;
                if response.status() == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                check_status(response.status(), "refparse")?;
                let xml = response.text().await?;
                Ok(Some(RefDocument::from_xml(&xml)?))
            }
        })
        .await
    }

    async fn batch_objects(&self, want: &[ObjectId], have: &[ObjectId]) -> SyncResult<Vec<u8>> {
        let url = self.url(endpoints::BATCH_OBJECTS);
        let body = RevListRequest::new(want, have);
        with_retries(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = client.post(&url).json(&body).send().await?;
                check_status(response.status(), "batchobjects")?;
                let bytes = response.bytes().await?;
                debug!(bytes = bytes.len(), "received pack round");
                Ok(bytes.to_vec())
            }
        })
        .await
    }

    async fn send_objects(&self, pack: Vec<u8>) -> SyncResult<()> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&pack)
            .map_err(|e| SyncError::Transport(format!("gzip: {e}")))?;
        let compressed = encoder
            .finish()
            .map_err(|e| SyncError::Transport(format!("gzip: {e}")))?;
        debug!(
            raw = pack.len(),
            compressed = compressed.len(),
            "uploading pack"
        );
        let response = self
            .client
            .post(self.url(endpoints::SEND_OBJECT))
            .header(reqwest::header::CONTENT_ENCODING, "gzip")
            .body(compressed)
            .send()
            .await?;
        check_status(response.status(), "sendobject")
    }

    async fn history_probe(
        &self,
        want: &[ObjectId],
        have: &[ObjectId],
    ) -> SyncResult<HistorySlice> {
        let url = self.url(endpoints::EXISTS);
        let body = RevListRequest::new(want, have);
        with_retries(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = client.post(&url).json(&body).send().await?;
                check_status(response.status(), "exists")?;
                let parsed: HistoryResponse = response.json().await?;
                Ok(parsed.to_slice()?)
            }
        })
        .await
    }

    async fn begin_push(&self) -> SyncResult<()> {
        let response = self
            .client
            .get(self.url(endpoints::BEGIN_PUSH))
            .send()
            .await?;
        check_status(response.status(), "beginpush")
    }

    async fn end_push(
        &self,
        refspec: &str,
        new_id: ObjectId,
        expected_old: ObjectId,
    ) -> SyncResult<()> {
        let response = self
            .client
            .get(self.url(endpoints::END_PUSH))
            .query(&[
                ("refspec", refspec.to_string()),
                ("objectId", new_id.to_hex()),
                ("originalRefValue", expected_old.to_hex()),
            ])
            .send()
            .await?;
        check_status(response.status(), "endpush")
    }

    async fn update_ref(&self, name: &str, value: Option<ObjectId>) -> SyncResult<()> {
        let mut query = vec![("name".to_string(), name.to_string())];
        match value {
            Some(id) => query.push(("newValue".to_string(), id.to_hex())),
            None => query.push(("delete".to_string(), "true".to_string())),
        }
        let response = self
            .client
            .get(self.url(endpoints::UPDATE_REF))
            .query(&query)
            .send()
            .await?;
        check_status(response.status(), "updateref")
    }
}

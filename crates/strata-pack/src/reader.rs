//! Pack stream ingest.
//!
//! The reader loops over `digest ‖ canonical_bytes` records until a clean
//! EOF at a record boundary. Each object is parsed with the same codec
//! that produced it; the exact bytes consumed are captured so already
//! canonical data lands in the database without a re-encode.

use std::io::Read;

use strata_store::ObjectDatabase;
use strata_types::{ObjectId, RevObject};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{PackError, PackResult};

/// Counters from one ingest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestResults {
    /// Objects newly written to the database.
    pub inserted: usize,
    /// Objects the database already had.
    pub existing: usize,
}

impl IngestResults {
    pub fn total(&self) -> usize {
        self.inserted + self.existing
    }
}

/// Ingest a pack stream into the database.
///
/// The callback observes every record exactly once, existing or not: the
/// negotiation driver needs want/have updates even for commits whose bytes
/// arrived in an earlier, interrupted round. Cancellation takes effect
/// after the current record; partially ingested streams are safe because
/// each record is self-contained and `put_raw` is idempotent.
pub fn ingest<R: Read>(
    input: &mut R,
    db: &dyn ObjectDatabase,
    cancel: &CancelToken,
    mut callback: impl FnMut(&ObjectId, &RevObject),
) -> PackResult<IngestResults> {
    let mut results = IngestResults::default();
    while let Some(id) = read_record_id(input)? {
        let mut tee = TeeReader {
            inner: input,
            captured: Vec::new(),
        };
        let object = strata_codec::decode_reader(&mut tee)
            .map_err(|e| PackError::MalformedStream(e.to_string()))?;
        if db.exists(&id)? {
            results.existing += 1;
        } else {
            db.put_raw(id, tee.captured)?;
            results.inserted += 1;
        }
        callback(&id, &object);
        if cancel.is_cancelled() {
            break;
        }
    }
    debug!(
        inserted = results.inserted,
        existing = results.existing,
        "pack ingested"
    );
    Ok(results)
}

/// Read the 20-byte record digest. A clean EOF before the first byte ends
/// the stream; an EOF inside the digest is a truncated record.
fn read_record_id<R: Read>(input: &mut R) -> PackResult<Option<ObjectId>> {
    let mut buf = [0u8; 20];
    let mut filled = 0;
    while filled < buf.len() {
        let n = input.read(&mut buf[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(PackError::MalformedStream(
                "stream truncated inside a record digest".into(),
            ));
        }
        filled += n;
    }
    Ok(Some(ObjectId::from_raw(buf)))
}

/// Captures every byte read through it, so ingest can store the exact
/// canonical form it parsed.
struct TeeReader<'a, R: Read> {
    inner: &'a mut R,
    captured: Vec<u8>,
}

impl<R: Read> Read for TeeReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.captured.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}
